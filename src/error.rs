//! Custom error types for grantplan
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for grantplan operations
#[derive(Error, Debug)]
pub enum GrantError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// YAML parse/serialize errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for inputs
    #[error("Validation error: {0}")]
    Validation(String),

    /// Budget specification errors (malformed or incomplete budget.yaml)
    #[error("Budget error: {0}")]
    Budget(String),

    /// One or more budget caps exceeded; every violation is collected
    #[error("Budget cap exceeded:\n{}", violations.join("\n"))]
    CapExceeded { violations: Vec<String> },

    /// Required file not found
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Sync errors (grant.yaml update)
    #[error("Sync error: {0}")]
    Sync(String),
}

impl GrantError {
    /// Create a "file not found" error from a path
    pub fn file_not_found(path: impl AsRef<std::path::Path>) -> Self {
        Self::FileNotFound(path.as_ref().display().to_string())
    }

    /// Check if this is a cap violation error
    pub fn is_cap_exceeded(&self) -> bool {
        matches!(self, Self::CapExceeded { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for GrantError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_yaml::Error> for GrantError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<serde_json::Error> for GrantError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for grantplan operations
pub type GrantResult<T> = Result<T, GrantError>;
