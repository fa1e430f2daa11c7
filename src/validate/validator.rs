//! NSF document compliance validation
//!
//! Scans assembled proposal text for content and structural violations
//! against a fixed funder rule set. Severity is document-type dependent:
//! NSF rejects non-compliant biographical sketches outright, so missing
//! biosketch sections are errors, while missing merit/impact narrative in a
//! full proposal is scored by reviewers and only warns.

use super::issue::{ValidationIssue, ValidationResult};
use super::report::render_report;
use super::rules::{
    is_allowed_host, prohibited_host, url_host, BIOSKETCH_SECTIONS, BUDGET_NARRATIVE_CATEGORIES,
    DOLLAR_PATTERN, EMAIL_PATTERN, PROPOSAL_SECTIONS, URL_PATTERN,
};

/// Validates proposal documents against NSF compliance rules
#[derive(Debug, Default)]
pub struct NsfValidator;

impl NsfValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a full proposal body
    ///
    /// Applies content rules (emails, prohibited links, non-ASCII characters)
    /// and structural rules (merit/impacts sections, heading presence).
    pub fn validate_proposal(&self, content: &str) -> ValidationResult {
        let mut issues = Vec::new();

        self.check_emails(content, &mut issues);
        self.check_links(content, &mut issues);
        self.check_non_ascii(content, &mut issues);
        self.check_headings(content, &mut issues);

        let lower = content.to_lowercase();
        for section in PROPOSAL_SECTIONS {
            if !lower.contains(&section.to_lowercase()) {
                issues.push(
                    ValidationIssue::warning(
                        "structure",
                        format!(
                            "Section \"{}\" not found - NSF requires this to be \
                             explicitly addressed in the project description",
                            section
                        ),
                    )
                    .cite("PAPPG Ch. II.D"),
                );
            }
        }

        ValidationResult::new(issues)
    }

    /// Validate a biographical sketch
    ///
    /// Missing required sections are errors: a non-compliant biosketch is
    /// returned without review.
    pub fn validate_biographical_sketch(&self, content: &str) -> ValidationResult {
        let mut issues = Vec::new();
        let lower = content.to_lowercase();

        for section in BIOSKETCH_SECTIONS {
            if !lower.contains(&section.to_lowercase()) {
                issues.push(
                    ValidationIssue::error(
                        "structure",
                        format!(
                            "Required biosketch section \"{}\" not found",
                            section
                        ),
                    )
                    .suggest(format!("Add a \"{}\" section heading", section))
                    .cite("PAPPG Ch. II.D.2.h"),
                );
            }
        }

        self.check_non_ascii(content, &mut issues);

        ValidationResult::new(issues)
    }

    /// Validate a budget narrative
    ///
    /// Expects the named cost categories to be discussed and at least one
    /// dollar amount to appear.
    pub fn validate_budget_narrative(&self, content: &str) -> ValidationResult {
        let mut issues = Vec::new();
        let lower = content.to_lowercase();

        for category in BUDGET_NARRATIVE_CATEGORIES {
            if !lower.contains(&category.to_lowercase()) {
                issues.push(ValidationIssue::warning(
                    "structure",
                    format!(
                        "Cost category \"{}\" not discussed in budget narrative",
                        category
                    ),
                ));
            }
        }

        if !DOLLAR_PATTERN.is_match(content) {
            issues.push(
                ValidationIssue::warning(
                    "content",
                    "No dollar amounts found in budget narrative",
                )
                .suggest("Justifications should cite the specific costs being requested"),
            );
        }

        ValidationResult::new(issues)
    }

    /// Render a human-readable report over one or more validation results
    pub fn get_validation_report(&self, results: &[ValidationResult]) -> String {
        render_report(results)
    }

    fn check_emails(&self, content: &str, issues: &mut Vec<ValidationIssue>) {
        for m in EMAIL_PATTERN.find_iter(content) {
            issues.push(
                ValidationIssue::error(
                    "content",
                    format!(
                        "Email address '{}' found - remove personal contact \
                         information from proposal text",
                        m.as_str()
                    ),
                )
                .cite("PAPPG Ch. II.D"),
            );
        }
    }

    fn check_links(&self, content: &str, issues: &mut Vec<ValidationIssue>) {
        for m in URL_PATTERN.find_iter(content) {
            let Some(host) = url_host(m.as_str()) else {
                continue;
            };
            if is_allowed_host(host) {
                continue;
            }
            if let Some(name) = prohibited_host(host) {
                issues.push(
                    ValidationIssue::error(
                        "compliance",
                        format!(
                            "Link to {} ({}) is prohibited - personal file-sharing \
                             services are not allowed in proposals",
                            name, host
                        ),
                    )
                    .suggest("Host materials on a code repository, DOI-resolved archive, or .gov site"),
                );
            }
        }
    }

    fn check_non_ascii(&self, content: &str, issues: &mut Vec<ValidationIssue>) {
        for (line_number, line) in content.lines().enumerate() {
            // First offending character per line keeps the report readable
            if let Some(ch) = line.chars().find(|c| !c.is_ascii()) {
                issues.push(
                    ValidationIssue::warning(
                        "formatting",
                        format!(
                            "Non-ASCII character '{}' (U+{:04X}) may corrupt PDF rendering",
                            ch, ch as u32
                        ),
                    )
                    .at(format!("Line {}", line_number + 1))
                    .suggest("Replace smart quotes and special characters with ASCII equivalents"),
                );
            }
        }
    }

    fn check_headings(&self, content: &str, issues: &mut Vec<ValidationIssue>) {
        let has_heading = content
            .lines()
            .any(|line| line.trim_start().starts_with('#'));
        if !has_heading {
            issues.push(ValidationIssue::warning(
                "structure",
                "No markdown headings found - document may lack visible structure",
            ));
        }
    }
}
