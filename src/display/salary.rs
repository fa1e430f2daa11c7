//! Salary validation display formatting

use crate::models::Dollars;
use crate::salary::SalaryValidationResult;

/// Format one salary validation result for terminal output
pub fn format_salary_result(result: &SalaryValidationResult) -> String {
    let mut lines = Vec::new();

    let verdict = if result.is_valid { "OK" } else { "FLAGGED" };
    let percentile = match result.percentile {
        Some(pct) => format!("{:.0}th percentile", pct),
        None => "percentile unavailable".to_string(),
    };

    lines.push(format!(
        "[{}] {}/year for {} in area {} ({})",
        verdict,
        Dollars::truncate(result.salary),
        result.occupation_code,
        result.area_code,
        percentile
    ));

    for issue in &result.issues {
        lines.push(format!("  issue: {}", issue));
    }
    for warning in &result.warnings {
        lines.push(format!("  warning: {}", warning));
    }
    for suggestion in &result.suggestions {
        lines.push(format!("  note: {}", suggestion));
    }

    lines.join("\n")
}

/// Format a batch of salary validation results
pub fn format_salary_results(results: &[SalaryValidationResult]) -> String {
    if results.is_empty() {
        return "No personnel items could be classified for salary validation.".to_string();
    }

    results
        .iter()
        .map(format_salary_result)
        .collect::<Vec<_>>()
        .join("\n\n")
}
