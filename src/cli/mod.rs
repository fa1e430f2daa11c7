//! CLI command handlers

pub mod budget;
pub mod salary;
pub mod validate;

pub use budget::{handle_budget_command, BudgetCommands, OutputFormat};
pub use salary::{handle_salary_command, SalaryCommands};
pub use validate::{handle_validate_command, ValidateCommands};
