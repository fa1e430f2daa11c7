//! YAML export of the budget summary

use std::io::Write;

use crate::error::{GrantError, GrantResult};
use crate::models::BudgetSummary;

/// Write the budget summary as YAML
pub fn export_summary_yaml<W: Write>(summary: &BudgetSummary, writer: &mut W) -> GrantResult<()> {
    let contents = serde_yaml::to_string(summary)
        .map_err(|e| GrantError::Export(format!("Failed to serialize summary: {}", e)))?;
    writer
        .write_all(contents.as_bytes())
        .map_err(|e| GrantError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetCalculator;
    use crate::models::BudgetSpecification;

    #[test]
    fn test_yaml_export_contains_totals() {
        let spec = BudgetSpecification::from_yaml(
            "years_in_budget: 1\npersonnel:\n  senior_key:\n    - name: PI\n      year_1: 50000\n",
        )
        .unwrap();
        let summary = BudgetCalculator::new(spec).summary();

        let mut out = Vec::new();
        export_summary_yaml(&summary, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("grand_total: 50000"));
        assert!(text.contains("senior_personnel:"));
    }
}
