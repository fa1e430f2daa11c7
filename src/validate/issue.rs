//! Validation issue and result types

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Info => write!(f, "info"),
        }
    }
}

/// A single validation finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,

    /// Rule family: "content", "compliance", "structure", "formatting"
    pub category: String,

    pub message: String,

    /// Where the finding was detected (e.g., "Line 42")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// How to fix it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Funder rule citation (e.g., "PAPPG Ch. II.D")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
}

impl ValidationIssue {
    /// Create an error-severity issue
    pub fn error(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, category, message)
    }

    /// Create a warning-severity issue
    pub fn warning(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, category, message)
    }

    /// Create an info-severity issue
    pub fn info(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, category, message)
    }

    fn new(severity: Severity, category: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            category: category.into(),
            message: message.into(),
            location: None,
            suggestion: None,
            rule: None,
        }
    }

    /// Attach a location
    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Attach a fix suggestion
    pub fn suggest(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a rule citation
    pub fn cite(mut self, rule: impl Into<String>) -> Self {
        self.rule = Some(rule.into());
        self
    }
}

/// The outcome of one validation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    /// Wrap a list of findings
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        Self { issues }
    }

    /// Number of error-severity findings
    pub fn errors_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    /// Number of warning-severity findings
    pub fn warnings_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// True iff no error-severity findings exist
    pub fn passed(&self) -> bool {
        self.errors_count() == 0
    }

    /// Strict-mode pass: warnings fail too
    pub fn passed_strict(&self) -> bool {
        self.errors_count() == 0 && self.warnings_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_issue() {
        let issue = ValidationIssue::error("compliance", "Test issue");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.category, "compliance");
        assert_eq!(issue.message, "Test issue");
        assert!(issue.location.is_none());
    }

    #[test]
    fn test_issue_with_details() {
        let issue = ValidationIssue::warning("formatting", "Test warning")
            .at("Line 42")
            .suggest("Fix it")
            .cite("PAPPG II.C");

        assert_eq!(issue.location.as_deref(), Some("Line 42"));
        assert_eq!(issue.suggestion.as_deref(), Some("Fix it"));
        assert_eq!(issue.rule.as_deref(), Some("PAPPG II.C"));
    }

    #[test]
    fn test_passed_with_no_errors() {
        let result = ValidationResult::default();
        assert!(result.passed());
        assert_eq!(result.errors_count(), 0);
    }

    #[test]
    fn test_counts_by_severity() {
        let result = ValidationResult::new(vec![
            ValidationIssue::error("compliance", "Error 1"),
            ValidationIssue::warning("formatting", "Warning 1"),
            ValidationIssue::error("content", "Error 2"),
        ]);

        assert_eq!(result.errors_count(), 2);
        assert_eq!(result.warnings_count(), 1);
        assert!(!result.passed());
    }

    #[test]
    fn test_strict_mode_fails_on_warnings() {
        let result = ValidationResult::new(vec![ValidationIssue::warning("structure", "W")]);
        assert!(result.passed());
        assert!(!result.passed_strict());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
