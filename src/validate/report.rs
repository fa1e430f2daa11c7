//! Human-readable validation report rendering

use super::issue::{Severity, ValidationResult};

/// Render validation results as a terminal report
pub fn render_report(results: &[ValidationResult]) -> String {
    let mut lines = Vec::new();

    lines.push("=== Validation Report ===".to_string());
    lines.push(String::new());

    let errors: usize = results.iter().map(|r| r.errors_count()).sum();
    let warnings: usize = results.iter().map(|r| r.warnings_count()).sum();
    let total_issues: usize = results.iter().map(|r| r.issues.len()).sum();

    if total_issues == 0 {
        lines.push("All checks passed.".to_string());
        return lines.join("\n");
    }

    lines.push(format!("{} error(s), {} warning(s)", errors, warnings));
    lines.push(String::new());

    for result in results {
        for issue in &result.issues {
            let marker = match issue.severity {
                Severity::Error => "ERROR",
                Severity::Warning => "WARN ",
                Severity::Info => "INFO ",
            };
            lines.push(format!("[{}] {}: {}", marker, issue.category, issue.message));

            if let Some(location) = &issue.location {
                lines.push(format!("        at {}", location));
            }
            if let Some(suggestion) = &issue.suggestion {
                lines.push(format!("        fix: {}", suggestion));
            }
            if let Some(rule) = &issue.rule {
                lines.push(format!("        rule: {}", rule));
            }
        }
    }

    if errors == 0 {
        lines.push(String::new());
        lines.push("Validation passed with warnings.".to_string());
    }

    lines.join("\n")
}
