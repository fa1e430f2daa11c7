use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grantplan_cli::cli::{
    handle_budget_command, handle_salary_command, handle_validate_command, BudgetCommands,
    SalaryCommands, ValidateCommands,
};
use grantplan_cli::config::Settings;

#[derive(Parser)]
#[command(
    name = "grantplan",
    version,
    about = "Command-line grant proposal budgeting and compliance toolkit",
    long_about = "grantplan assembles NSF-style grant budgets from declarative \
                  YAML specifications, validates proposal documents against \
                  funder compliance rules, and checks personnel salaries \
                  against market wage statistics."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget calculation and cap checking
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Market salary validation
    #[command(subcommand)]
    Salary(SalaryCommands),

    /// Document compliance validation
    #[command(subcommand)]
    Validate(ValidateCommands),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::load_or_create()?;

    match cli.command {
        Commands::Budget(cmd) => handle_budget_command(cmd)?,
        Commands::Salary(cmd) => handle_salary_command(&settings, cmd)?,
        Commands::Validate(cmd) => handle_validate_command(cmd)?,
        Commands::Config => {
            match Settings::settings_file() {
                Some(path) => println!("Settings file: {}", path.display()),
                None => println!("Settings file: (no config directory available)"),
            }
            println!("Default area:  {}", settings.default_area);
            println!("Data year:     {}", settings.data_year);
            println!(
                "BLS API key:   {}",
                if settings.resolved_api_key().is_some() {
                    "configured"
                } else {
                    "not set"
                }
            );
        }
    }

    Ok(())
}
