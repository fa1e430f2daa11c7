//! grantplan - grant proposal budgeting and compliance toolkit
//!
//! This library provides the core functionality for the grantplan CLI: a
//! deterministic budget engine over declarative YAML specifications, a
//! market salary validator backed by BLS OEWS wage statistics, and an NSF
//! document compliance validator.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Project file locations and user settings
//! - `error`: Custom error types
//! - `models`: Core data models (budget specification, grant metadata, totals)
//! - `budget`: Rollup calculator, cap validation, and the grant.yaml sync hook
//! - `salary`: OEWS client, percentile estimation, and salary classification
//! - `validate`: Document compliance rules and report rendering
//! - `display`: Terminal table formatting
//! - `export`: Summary export to JSON/YAML/CSV
//! - `cli`: Command handlers for the `grantplan` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use grantplan_cli::budget::BudgetCalculator;
//!
//! let calc = BudgetCalculator::from_path("budget.yaml")?;
//! println!("grand total: {}", calc.grand_total());
//! ```

pub mod budget;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod salary;
pub mod validate;

pub use error::{GrantError, GrantResult};
