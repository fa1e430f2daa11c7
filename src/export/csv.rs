//! CSV export of the budget summary
//!
//! One row per category with per-year columns, suitable for spreadsheet
//! import.

use std::io::Write;

use crate::error::{GrantError, GrantResult};
use crate::models::{BudgetSummary, CategoryTotals};

/// Write the budget summary as CSV
pub fn export_summary_csv<W: Write>(summary: &BudgetSummary, writer: W) -> GrantResult<()> {
    let years = summary.year_count();
    let mut csv_writer = csv::Writer::from_writer(writer);

    let mut header = vec!["category".to_string()];
    for year in 1..=years {
        header.push(format!("year_{}", year));
    }
    header.push("total".to_string());
    csv_writer
        .write_record(&header)
        .map_err(|e| GrantError::Export(e.to_string()))?;

    let rows: [(&str, &CategoryTotals); 9] = [
        ("senior_personnel", &summary.senior_personnel),
        ("other_personnel", &summary.other_personnel),
        ("fringe_benefits", &summary.fringe_benefits),
        ("equipment", &summary.equipment),
        ("travel", &summary.travel),
        ("participant_support", &summary.participant_support),
        ("other_direct_costs", &summary.other_direct_costs),
        ("total_direct_costs", &summary.total_direct_costs),
        ("indirect_costs", &summary.indirect_costs),
    ];

    for (name, totals) in rows {
        let mut record = vec![name.to_string()];
        for year in 1..=years {
            record.push(totals.year(year).amount().to_string());
        }
        record.push(totals.total().amount().to_string());
        csv_writer
            .write_record(&record)
            .map_err(|e| GrantError::Export(e.to_string()))?;
    }

    let mut grand = vec!["grand_total".to_string()];
    for year in 1..=years {
        grand.push(summary.year_total(year).amount().to_string());
    }
    grand.push(summary.grand_total.amount().to_string());
    csv_writer
        .write_record(&grand)
        .map_err(|e| GrantError::Export(e.to_string()))?;

    csv_writer
        .flush()
        .map_err(|e| GrantError::Export(e.to_string()))?;
    Ok(())
}
