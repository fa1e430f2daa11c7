//! Budget CLI commands

use std::io;
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};

use crate::budget::{sync_budget_to_grant, BudgetCalculator};
use crate::config::ProjectPaths;
use crate::display::format_budget_table;
use crate::error::{GrantError, GrantResult};
use crate::export::{export_summary_csv, export_summary_json, export_summary_yaml};
use crate::models::CapConstraint;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show computed budget totals
    Summary {
        /// Grant project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Check the budget for internal inconsistencies and cap violations
    Check {
        /// Grant project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },

    /// Write the computed grand total back into grant.yaml
    Sync {
        /// Grant project directory
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

/// Output format for budget summaries
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
    Csv,
}

/// Handle a budget command
pub fn handle_budget_command(cmd: BudgetCommands) -> GrantResult<()> {
    match cmd {
        BudgetCommands::Summary { dir, format } => {
            let paths = ProjectPaths::new(dir);
            let calc = BudgetCalculator::from_path(paths.budget_file())?;
            let summary = calc.summary();

            let mut stdout = io::stdout();
            match format {
                OutputFormat::Table => println!("{}", format_budget_table(&summary)),
                OutputFormat::Json => export_summary_json(&summary, &mut stdout)?,
                OutputFormat::Yaml => export_summary_yaml(&summary, &mut stdout)?,
                OutputFormat::Csv => export_summary_csv(&summary, &mut stdout)?,
            }
            Ok(())
        }

        BudgetCommands::Check { dir } => {
            let paths = ProjectPaths::new(dir);
            let calc = BudgetCalculator::from_path(paths.budget_file())?;

            let warnings = calc.validate();
            for warning in &warnings {
                println!("warning: {}", warning);
            }

            let caps = if paths.grant_file().exists() {
                CapConstraint::from_path(paths.grant_file())?
            } else {
                CapConstraint::default()
            };

            let violations = calc.validate_against_caps(&caps);
            if !violations.is_empty() {
                return Err(GrantError::CapExceeded { violations });
            }

            if warnings.is_empty() {
                println!("Budget checks passed: grand total {}", calc.grand_total());
            } else {
                println!(
                    "Budget within caps with {} warning(s): grand total {}",
                    warnings.len(),
                    calc.grand_total()
                );
            }
            Ok(())
        }

        BudgetCommands::Sync { dir } => {
            let paths = ProjectPaths::new(dir);
            let total = sync_budget_to_grant(paths.budget_file(), paths.grant_file())?;
            println!("Synced amount_requested = {}", total);
            Ok(())
        }
    }
}
