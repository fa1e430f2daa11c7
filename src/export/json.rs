//! JSON export of the budget summary

use std::io::Write;

use crate::error::{GrantError, GrantResult};
use crate::models::BudgetSummary;

/// Write the budget summary as pretty-printed JSON
pub fn export_summary_json<W: Write>(summary: &BudgetSummary, writer: &mut W) -> GrantResult<()> {
    serde_json::to_writer_pretty(&mut *writer, summary)
        .map_err(|e| GrantError::Export(format!("Failed to serialize summary: {}", e)))?;
    writer
        .write_all(b"\n")
        .map_err(|e| GrantError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetCalculator;
    use crate::models::BudgetSpecification;

    #[test]
    fn test_json_export_shape() {
        let spec = BudgetSpecification::from_yaml(
            "years_in_budget: 1\npersonnel:\n  senior_key:\n    - name: PI\n      year_1: 50000\n",
        )
        .unwrap();
        let summary = BudgetCalculator::new(spec).summary();

        let mut out = Vec::new();
        export_summary_json(&summary, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["senior_personnel"]["year_1"], 50000);
        assert_eq!(value["grand_total"], 50000);
    }
}
