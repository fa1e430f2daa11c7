//! Budget specification model
//!
//! Typed representation of a `budget.yaml` file: per-category line items with
//! sparse per-year amounts. The specification is the single durable store;
//! all totals are recomputed from it on demand.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::years::YearAmounts;
use crate::error::{GrantError, GrantResult};

/// A senior or other personnel entry with per-year salary amounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonnelItem {
    /// Person or position name
    #[serde(default)]
    pub name: String,

    /// Role on the project (e.g., "PI", "Co-PI")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Position title for non-senior personnel
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Funder form category (e.g., "Other Professionals")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Full-time annual salary, used by the salary auditor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_salary: Option<f64>,

    /// Months of effort the base salary covers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months: Option<f64>,

    /// SOC occupation code or alias, used by the salary auditor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupation: Option<String>,

    /// BLS metro area code or alias
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,

    /// Per-year requested amounts
    #[serde(flatten)]
    pub years: YearAmounts,
}

impl PersonnelItem {
    /// Best human-readable label for messages: role, then title, then name
    pub fn label(&self) -> &str {
        self.role
            .as_deref()
            .or(self.title.as_deref())
            .filter(|s| !s.is_empty())
            .unwrap_or(&self.name)
    }
}

/// A non-personnel line item (equipment, travel, participant support, ODC)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    /// What the funds are for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Funder form category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Default amount applied to every year without an explicit override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub funds_per_year: Option<f64>,

    /// Explicit per-year overrides
    #[serde(flatten)]
    pub years: YearAmounts,
}

impl LineItem {
    /// Amount this item contributes in a given year: explicit `year_N`,
    /// else `funds_per_year`, else zero
    pub fn amount_for_year(&self, year: usize) -> f64 {
        self.years
            .get(year)
            .or(self.funds_per_year)
            .unwrap_or(0.0)
    }
}

/// Senior and other personnel collections
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonnelSpec {
    /// Senior/key personnel (the on-disk key is `senior_key`)
    #[serde(default, rename = "senior_key")]
    pub senior: Vec<PersonnelItem>,

    /// Other personnel (students, staff, professionals)
    #[serde(default)]
    pub other: Vec<PersonnelItem>,
}

/// Fringe benefit configuration: a rate, optionally overridden per year
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FringeSpec {
    /// Fringe rate applied to total salaries when no explicit override exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,

    /// Explicit per-year fringe amounts; these win over the rate
    #[serde(flatten)]
    pub years: YearAmounts,
}

/// Domestic and foreign travel line items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TravelSpec {
    #[serde(default)]
    pub domestic: Vec<LineItem>,

    #[serde(default)]
    pub foreign: Vec<LineItem>,
}

/// Indirect cost configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndirectSpec {
    /// Negotiated indirect rate applied to the MTDC base
    #[serde(default)]
    pub rate: f64,

    /// Cost base label; MTDC is the only base the calculator applies
    #[serde(default = "default_base")]
    pub base: String,
}

fn default_base() -> String {
    "mtdc".to_string()
}

impl Default for IndirectSpec {
    fn default() -> Self {
        Self {
            rate: 0.0,
            base: default_base(),
        }
    }
}

/// Hand-recorded totals for one year, checked against recalculation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordedYearTotals {
    /// Recorded indirect cost amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indirect: Option<f64>,

    /// Recorded direct cost amount
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct: Option<f64>,
}

/// Optional hand-recorded summary block, keyed by year
#[derive(Debug, Clone, Default)]
pub struct RecordedSummary(BTreeMap<usize, RecordedYearTotals>);

impl RecordedSummary {
    /// Recorded totals for a year, if present
    pub fn year(&self, year: usize) -> Option<&RecordedYearTotals> {
        self.0.get(&year)
    }

    /// Check whether any year is recorded
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RecordedSummary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (year, totals) in &self.0 {
            map.serialize_entry(&format!("year_{}", year), totals)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RecordedSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SummaryVisitor;

        impl<'de> Visitor<'de> for SummaryVisitor {
            type Value = RecordedSummary;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of year_N to recorded totals")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut years = BTreeMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    let totals: RecordedYearTotals = map.next_value()?;
                    if let Some(year) = key
                        .strip_prefix("year_")
                        .and_then(|s| s.parse::<usize>().ok())
                        .filter(|y| *y >= 1)
                    {
                        years.insert(year, totals);
                    }
                }
                Ok(RecordedSummary(years))
            }
        }

        deserializer.deserialize_map(SummaryVisitor)
    }
}

/// The declarative budget specification loaded from `budget.yaml`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetSpecification {
    /// Number of budget years; required, must be at least 1
    pub years_in_budget: usize,

    #[serde(default)]
    pub personnel: PersonnelSpec,

    #[serde(default)]
    pub fringe_benefits: FringeSpec,

    #[serde(default)]
    pub equipment: Vec<LineItem>,

    #[serde(default)]
    pub travel: TravelSpec,

    #[serde(default)]
    pub participant_support: Vec<LineItem>,

    #[serde(default)]
    pub other_direct_costs: Vec<LineItem>,

    #[serde(default)]
    pub indirect_costs: IndirectSpec,

    /// Hand-recorded totals; never authoritative, only consistency-checked
    #[serde(default, skip_serializing_if = "RecordedSummary::is_empty")]
    pub summary: RecordedSummary,
}

impl BudgetSpecification {
    /// Load a budget specification from a YAML file
    ///
    /// Missing optional sections default to empty; a missing file, malformed
    /// YAML, an absent `years_in_budget`, or a year count of zero are hard
    /// errors.
    pub fn from_path(path: impl AsRef<Path>) -> GrantResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(GrantError::file_not_found(path));
        }

        let contents = std::fs::read_to_string(path)
            .map_err(|e| GrantError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

        let spec: Self = serde_yaml::from_str(&contents)
            .map_err(|e| GrantError::Budget(format!("Failed to parse {}: {}", path.display(), e)))?;

        spec.check_years()?;
        Ok(spec)
    }

    /// Parse a budget specification from a YAML string
    pub fn from_yaml(contents: &str) -> GrantResult<Self> {
        let spec: Self = serde_yaml::from_str(contents)
            .map_err(|e| GrantError::Budget(format!("Failed to parse budget: {}", e)))?;
        spec.check_years()?;
        Ok(spec)
    }

    fn check_years(&self) -> GrantResult<()> {
        if self.years_in_budget < 1 {
            return Err(GrantError::Budget(
                "years_in_budget must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
years_in_budget: 3
personnel:
  senior_key:
    - name: "Ada Researcher"
      role: PI
      base_salary: 180000
      year_1: 30000
      year_2: 22500
      year_3: 15000
  other:
    - title: Research Software Engineer
      base_salary: 140000
      year_1: 70000
      year_2: 77000
      year_3: 77000
fringe_benefits:
  rate: 0.30
  year_1: 41250
travel:
  domestic:
    - description: PI meeting
      funds_per_year: 2000
  foreign: []
other_direct_costs:
  - category: Computer Services
    description: Cloud computing
    funds_per_year: 12000
indirect_costs:
  rate: 0.10
  base: mtdc
"#;

    #[test]
    fn test_parse_sample_budget() {
        let spec = BudgetSpecification::from_yaml(SAMPLE).unwrap();

        assert_eq!(spec.years_in_budget, 3);
        assert_eq!(spec.personnel.senior.len(), 1);
        assert_eq!(spec.personnel.senior[0].years.get(1), Some(30000.0));
        assert_eq!(spec.personnel.other[0].years.get(2), Some(77000.0));
        assert_eq!(spec.fringe_benefits.rate, Some(0.30));
        assert_eq!(spec.fringe_benefits.years.get(1), Some(41250.0));
        assert_eq!(spec.fringe_benefits.years.get(2), None);
        assert_eq!(spec.travel.domestic[0].funds_per_year, Some(2000.0));
        assert_eq!(spec.indirect_costs.rate, 0.10);
    }

    #[test]
    fn test_missing_years_in_budget_is_error() {
        let result = BudgetSpecification::from_yaml("personnel:\n  senior_key: []\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_years_is_error() {
        let result = BudgetSpecification::from_yaml("years_in_budget: 0\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_sections_default_empty() {
        let spec = BudgetSpecification::from_yaml("years_in_budget: 1\n").unwrap();

        assert!(spec.personnel.senior.is_empty());
        assert!(spec.equipment.is_empty());
        assert!(spec.travel.domestic.is_empty());
        assert_eq!(spec.indirect_costs.rate, 0.0);
        assert_eq!(spec.indirect_costs.base, "mtdc");
        assert!(spec.summary.is_empty());
    }

    #[test]
    fn test_line_item_year_fallback() {
        let item = LineItem {
            funds_per_year: Some(5000.0),
            ..Default::default()
        };
        assert_eq!(item.amount_for_year(1), 5000.0);
        assert_eq!(item.amount_for_year(3), 5000.0);

        let mut with_override = item.clone();
        with_override.years.set(2, 1000.0);
        assert_eq!(with_override.amount_for_year(1), 5000.0);
        assert_eq!(with_override.amount_for_year(2), 1000.0);
    }

    #[test]
    fn test_recorded_summary_parses_year_keys() {
        let yaml = r#"
years_in_budget: 1
summary:
  year_1:
    indirect: 13000
"#;
        let spec = BudgetSpecification::from_yaml(yaml).unwrap();
        assert_eq!(spec.summary.year(1).unwrap().indirect, Some(13000.0));
        assert!(spec.summary.year(2).is_none());
    }

    #[test]
    fn test_personnel_label_precedence() {
        let item = PersonnelItem {
            name: "Ada".into(),
            role: Some("PI".into()),
            ..Default::default()
        };
        assert_eq!(item.label(), "PI");

        let untitled = PersonnelItem {
            name: "Grace".into(),
            ..Default::default()
        };
        assert_eq!(untitled.label(), "Grace");
    }
}
