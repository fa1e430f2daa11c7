//! Market salary validation
//!
//! Classifies proposed salaries against OEWS wage-distribution statistics.
//! NSF requires salaries be "reasonable and consistent with that paid for
//! similar work"; reviewers flag salaries well above local market rates, so
//! anything at or past the 95th percentile is an error-level finding while
//! the 75th-95th band only warns.

use tracing::debug;

use super::codes::{resolve_area_code, resolve_occupation_code};
use super::oews::{estimate_percentile, OewsClient, WageData, WageDataProvider};
use crate::error::{GrantError, GrantResult};
use crate::models::{Dollars, PersonnelItem};

/// Warn at or above this percentile
const WARNING_PERCENTILE: f64 = 75.0;
/// Error at or above this percentile
const ERROR_PERCENTILE: f64 = 95.0;
/// Warn at or below this percentile; often a data-entry error
const LOW_WARNING_PERCENTILE: f64 = 10.0;

/// Result of validating one salary against market data
///
/// Constructed per validation call; never persisted.
#[derive(Debug, Clone)]
pub struct SalaryValidationResult {
    /// False only for error-level findings
    pub is_valid: bool,
    /// Annualized salary that was evaluated
    pub salary: f64,
    pub occupation_code: String,
    pub area_code: String,
    pub wage_data: Option<WageData>,
    pub percentile: Option<f64>,
    /// Validation failures
    pub issues: Vec<String>,
    /// Soft flags
    pub warnings: Vec<String>,
    /// Informational market context
    pub suggestions: Vec<String>,
}

/// Validates personnel salaries against OEWS market data
pub struct SalaryValidator {
    provider: Box<dyn WageDataProvider>,
    default_area: String,
    data_year: u16,
}

impl SalaryValidator {
    /// Create a validator backed by the live BLS client
    pub fn new(bls_api_key: Option<String>, default_area: impl Into<String>, data_year: u16) -> Self {
        Self::with_provider(Box::new(OewsClient::new(bls_api_key)), default_area, data_year)
    }

    /// Create a validator over any wage data source
    pub fn with_provider(
        provider: Box<dyn WageDataProvider>,
        default_area: impl Into<String>,
        data_year: u16,
    ) -> Self {
        Self {
            provider,
            default_area: default_area.into(),
            data_year,
        }
    }

    /// Validate a salary against market wage statistics
    ///
    /// A salary covering fewer than 12 months is annualized before the
    /// percentile lookup. Missing market data degrades to a warning with
    /// `is_valid` still true; absence of data never blocks a proposal.
    pub fn validate_salary(
        &mut self,
        salary: f64,
        occupation: &str,
        months: f64,
        area: Option<&str>,
        role_description: Option<&str>,
    ) -> GrantResult<SalaryValidationResult> {
        if months <= 0.0 {
            return Err(GrantError::Validation(format!(
                "months must be positive, got {}",
                months
            )));
        }

        let annual_salary = if months != 12.0 {
            salary * (12.0 / months)
        } else {
            salary
        };

        let occupation_code = resolve_occupation_code(occupation);
        let area_code = resolve_area_code(area.unwrap_or(&self.default_area));

        let mut result = SalaryValidationResult {
            is_valid: true,
            salary: annual_salary,
            occupation_code: occupation_code.clone(),
            area_code: area_code.clone(),
            wage_data: None,
            percentile: None,
            issues: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
        };

        let wage_data = self
            .provider
            .get_wage_data(&occupation_code, &area_code, self.data_year);

        let Some(wage_data) = wage_data else {
            result.warnings.push(format!(
                "Could not fetch OEWS data for {} in area {}. \
                 Unable to validate salary against market rates.",
                occupation_code, area_code
            ));
            return Ok(result);
        };

        let percentile = estimate_percentile(annual_salary, &wage_data);
        result.percentile = percentile;

        let role_name = role_description.unwrap_or(occupation);
        let annual = Dollars::truncate(annual_salary);

        if let Some(percentile) = percentile {
            if percentile >= ERROR_PERCENTILE {
                result.is_valid = false;
                result.issues.push(format!(
                    "Salary for {} ({}/year) is at the {:.0}th percentile - \
                     significantly above market rate. NSF reviewers may question \
                     this salary level.",
                    role_name, annual, percentile
                ));
                if let Some(pct_75) = wage_data.pct_75 {
                    result.suggestions.push(format!(
                        "Consider reducing to {} (75th percentile) or provide \
                         strong justification for the higher rate.",
                        Dollars::truncate(pct_75)
                    ));
                }
            } else if percentile >= WARNING_PERCENTILE {
                result.warnings.push(format!(
                    "Salary for {} ({}/year) is at the {:.0}th percentile - \
                     above market median. Ensure strong justification is provided.",
                    role_name, annual, percentile
                ));
            } else if percentile <= LOW_WARNING_PERCENTILE {
                result.warnings.push(format!(
                    "Salary for {} ({}/year) is at the {:.0}th percentile - \
                     unusually low. This may indicate a data entry error or \
                     difficulty recruiting.",
                    role_name, annual, percentile
                ));
            }
        }

        if let Some(median) = wage_data.median_annual {
            result.suggestions.push(format!(
                "Market reference: Median salary for {} is {}/year",
                occupation_code,
                Dollars::truncate(median)
            ));
        }

        if let (Some(pct_25), Some(pct_75)) = (wage_data.pct_25, wage_data.pct_75) {
            result.suggestions.push(format!(
                "Typical range (25th-75th percentile): {} - {}",
                Dollars::truncate(pct_25),
                Dollars::truncate(pct_75)
            ));
        }

        result.wage_data = Some(wage_data);

        Ok(result)
    }

    /// Validate every personnel salary in a budget
    ///
    /// Items without an explicit occupation get one inferred from their role
    /// text; items matching no known keyword are skipped rather than guessed.
    pub fn validate_budget_personnel(
        &mut self,
        items: &[PersonnelItem],
        default_area: Option<&str>,
    ) -> GrantResult<Vec<SalaryValidationResult>> {
        let mut results = Vec::new();

        for item in items {
            let role_text = [
                item.role.as_deref(),
                item.title.as_deref(),
                item.category.as_deref(),
                Some(item.name.as_str()),
            ]
            .iter()
            .flatten()
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");

            let occupation = match item.occupation.as_deref() {
                Some(occ) => occ.to_string(),
                None => match infer_occupation(&role_text) {
                    Some(occ) => occ.to_string(),
                    None => {
                        debug!("Skipping unclassifiable personnel item: {}", item.label());
                        continue;
                    }
                },
            };

            let salary = item.base_salary.or_else(|| item.years.get(1)).unwrap_or(0.0);
            let months = item.months.unwrap_or(12.0);
            let area = item.area.as_deref().or(default_area);

            let result =
                self.validate_salary(salary, &occupation, months, area, Some(item.label()))?;
            results.push(result);
        }

        Ok(results)
    }
}

/// Infer an occupation alias from free-text role description
fn infer_occupation(description: &str) -> Option<&'static str> {
    let desc = description.to_lowercase();

    if desc.contains("pi") || desc.contains("principal investigator") {
        Some("postsecondary_teacher")
    } else if desc.contains("postdoc") {
        Some("postdoc")
    } else if desc.contains("graduate") || desc.contains("student") {
        Some("research_assistant")
    } else if desc.contains("software") || desc.contains("developer") {
        Some("software_developer")
    } else if desc.contains("data scientist") {
        Some("data_scientist")
    } else {
        None
    }
}
