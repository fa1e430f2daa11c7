//! Budget summary display formatting
//!
//! Renders the derived budget summary as a terminal table, one row per
//! funder form category.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::models::{BudgetSummary, CategoryTotals};

/// Funder form rows in display order: (label, accessor)
fn category_rows(summary: &BudgetSummary) -> Vec<(&'static str, &CategoryTotals)> {
    vec![
        ("A. Senior Personnel", &summary.senior_personnel),
        ("B. Other Personnel", &summary.other_personnel),
        ("C. Fringe Benefits", &summary.fringe_benefits),
        ("D. Equipment", &summary.equipment),
        ("E. Travel", &summary.travel),
        ("F. Participant Support", &summary.participant_support),
        ("G. Other Direct Costs", &summary.other_direct_costs),
    ]
}

/// Format the budget summary as a table with per-year columns
pub fn format_budget_table(summary: &BudgetSummary) -> String {
    let years = summary.year_count();
    let mut builder = Builder::default();

    let mut header = vec!["Category".to_string()];
    for year in 1..=years {
        header.push(format!("Year {}", year));
    }
    header.push("Total".to_string());
    builder.push_record(header);

    for (label, totals) in category_rows(summary) {
        builder.push_record(totals_row(label, totals, years));
    }

    builder.push_record(totals_row(
        "Total Direct Costs",
        &summary.total_direct_costs,
        years,
    ));

    let indirect_label = match summary.indirect_costs.rate() {
        Some(rate) if rate > 0.0 => format!("Indirect Costs ({:.1}% MTDC)", rate * 100.0),
        _ => "Indirect Costs".to_string(),
    };
    builder.push_record(totals_row(&indirect_label, &summary.indirect_costs, years));

    let mut grand = vec!["Grand Total".to_string()];
    for year in 1..=years {
        grand.push(summary.year_total(year).to_string());
    }
    grand.push(summary.grand_total.to_string());
    builder.push_record(grand);

    let mut table = builder.build();
    table.with(Style::sharp());
    table.to_string()
}

fn totals_row(label: &str, totals: &CategoryTotals, years: usize) -> Vec<String> {
    let mut row = vec![label.to_string()];
    for year in 1..=years {
        row.push(totals.year(year).to_string());
    }
    row.push(totals.total().to_string());
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::BudgetCalculator;
    use crate::models::BudgetSpecification;

    #[test]
    fn test_table_contains_categories_and_totals() {
        let spec = BudgetSpecification::from_yaml(
            r#"
years_in_budget: 2
personnel:
  senior_key:
    - name: PI
      year_1: 50000
      year_2: 50000
fringe_benefits:
  rate: 0.30
indirect_costs:
  rate: 0.10
  base: mtdc
"#,
        )
        .unwrap();
        let summary = BudgetCalculator::new(spec).summary();
        let table = format_budget_table(&summary);

        assert!(table.contains("A. Senior Personnel"));
        assert!(table.contains("Year 1"));
        assert!(table.contains("Year 2"));
        assert!(table.contains("Grand Total"));
        assert!(table.contains("$50,000"));
        assert!(table.contains("10.0% MTDC"));
    }
}
