//! Grant metadata model
//!
//! Typed view of `grant.yaml`: funder-facing fields the toolkit reads (caps,
//! requested amount) plus a flattened remainder so unrelated fields survive a
//! read-modify-write cycle untouched.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{GrantError, GrantResult};

/// The `research_gov` sub-record mirrored by the sync hook
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResearchGovInfo {
    /// Total requested, kept in lockstep with the computed grand total
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_requested: Option<f64>,

    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Grant metadata loaded from `grant.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GrantMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foundation: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,

    /// Overall award ceiling for the full project period
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_cap: Option<f64>,

    /// Per-year award ceiling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_budget_cap: Option<f64>,

    /// Display duplicate of the computed grand total; overwritten by sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount_requested: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research_gov: Option<ResearchGovInfo>,

    /// Everything else in grant.yaml, preserved verbatim
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl GrantMetadata {
    /// Load grant metadata from a YAML file
    pub fn from_path(path: impl AsRef<Path>) -> GrantResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(GrantError::file_not_found(path));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| GrantError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| GrantError::Yaml(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Extract the cap constraints this grant declares
    pub fn caps(&self) -> CapConstraint {
        CapConstraint {
            budget_cap: self.budget_cap,
            annual_budget_cap: self.annual_budget_cap,
        }
    }
}

/// Optional budget ceilings sourced from grant metadata
///
/// Used only for validation; never mutates the budget specification.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CapConstraint {
    pub budget_cap: Option<f64>,
    pub annual_budget_cap: Option<f64>,
}

impl CapConstraint {
    /// Load caps from a grant.yaml file
    pub fn from_path(path: impl AsRef<Path>) -> GrantResult<Self> {
        Ok(GrantMetadata::from_path(path)?.caps())
    }

    /// True when neither cap is declared
    pub fn is_empty(&self) -> bool {
        self.budget_cap.is_none() && self.annual_budget_cap.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grant_with_caps() {
        let yaml = r#"
name: Test Grant
foundation: NSF
deadline: 2026-12-01
budget_cap: 600000
annual_budget_cap: 200000
amount_requested: 550000
"#;
        let grant: GrantMetadata = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(grant.name.as_deref(), Some("Test Grant"));
        assert_eq!(grant.deadline, NaiveDate::from_ymd_opt(2026, 12, 1));
        assert_eq!(grant.caps().budget_cap, Some(600000.0));
        assert_eq!(grant.caps().annual_budget_cap, Some(200000.0));
    }

    #[test]
    fn test_no_caps_declared() {
        let grant: GrantMetadata = serde_yaml::from_str("name: Uncapped\n").unwrap();
        assert!(grant.caps().is_empty());
    }

    #[test]
    fn test_unknown_fields_preserved() {
        let yaml = "name: Test\nprogram_officer: Dr. Chen\nsolicitation: 24-501\n";
        let grant: GrantMetadata = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(grant.extra.len(), 2);
        assert!(grant.extra.contains_key("program_officer"));

        let round_trip = serde_yaml::to_string(&grant).unwrap();
        assert!(round_trip.contains("program_officer: Dr. Chen"));
        assert!(round_trip.contains("solicitation: 24-501"));
    }

    #[test]
    fn test_research_gov_sub_record() {
        let yaml = "research_gov:\n  total_requested: 100000\n  proposal_id: ABC-123\n";
        let grant: GrantMetadata = serde_yaml::from_str(yaml).unwrap();

        let rg = grant.research_gov.unwrap();
        assert_eq!(rg.total_requested, Some(100000.0));
        assert!(rg.extra.contains_key("proposal_id"));
    }
}
