//! Salary validation CLI commands

use std::path::PathBuf;

use clap::Subcommand;

use crate::budget::BudgetCalculator;
use crate::config::{ProjectPaths, Settings};
use crate::display::{format_salary_result, format_salary_results};
use crate::error::{GrantError, GrantResult};
use crate::salary::SalaryValidator;

/// Salary validation subcommands
#[derive(Subcommand)]
pub enum SalaryCommands {
    /// Check one salary against market wage statistics
    Check {
        /// Proposed salary amount in dollars
        amount: f64,

        /// Occupation code or alias (e.g., "software_developer", "15-1252")
        #[arg(short, long)]
        occupation: String,

        /// Months the salary covers; annualized when fewer than 12
        #[arg(short, long, default_value_t = 12.0)]
        months: f64,

        /// Metro area code or alias (e.g., "boston")
        #[arg(short, long)]
        area: Option<String>,

        /// Role description for report messages
        #[arg(short, long)]
        role: Option<String>,
    },

    /// Validate every personnel salary in the project budget
    Audit {
        /// Grant project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Metro area override for all personnel
        #[arg(short, long)]
        area: Option<String>,
    },
}

/// Handle a salary command
pub fn handle_salary_command(settings: &Settings, cmd: SalaryCommands) -> GrantResult<()> {
    let mut validator = SalaryValidator::new(
        settings.resolved_api_key(),
        settings.default_area.clone(),
        settings.data_year,
    );

    match cmd {
        SalaryCommands::Check {
            amount,
            occupation,
            months,
            area,
            role,
        } => {
            let result = validator.validate_salary(
                amount,
                &occupation,
                months,
                area.as_deref(),
                role.as_deref(),
            )?;
            println!("{}", format_salary_result(&result));

            if result.is_valid {
                Ok(())
            } else {
                Err(GrantError::Validation(
                    "salary exceeds market-rate thresholds".into(),
                ))
            }
        }

        SalaryCommands::Audit { dir, area } => {
            let paths = ProjectPaths::new(dir);
            let calc = BudgetCalculator::from_path(paths.budget_file())?;
            let spec = calc.spec();

            let personnel: Vec<_> = spec
                .personnel
                .senior
                .iter()
                .chain(spec.personnel.other.iter())
                .cloned()
                .collect();

            let results = validator.validate_budget_personnel(&personnel, area.as_deref())?;
            println!("{}", format_salary_results(&results));

            let flagged = results.iter().filter(|r| !r.is_valid).count();
            if flagged == 0 {
                Ok(())
            } else {
                Err(GrantError::Validation(format!(
                    "{} personnel salar{} exceed market-rate thresholds",
                    flagged,
                    if flagged == 1 { "y" } else { "ies" }
                )))
            }
        }
    }
}
