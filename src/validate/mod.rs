//! NSF compliance validation
//!
//! Rule-based scanning of proposal documents: content rules (emails,
//! prohibited links, non-ASCII), structural rules (required sections,
//! headings), and report rendering.

pub mod issue;
pub mod report;
pub mod rules;
pub mod validator;

pub use issue::{Severity, ValidationIssue, ValidationResult};
pub use report::render_report;
pub use validator::NsfValidator;
