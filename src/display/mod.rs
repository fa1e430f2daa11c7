//! Display formatting for terminal output

pub mod budget;
pub mod salary;

pub use budget::format_budget_table;
pub use salary::{format_salary_result, format_salary_results};
