//! Document validation CLI commands

use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::error::{GrantError, GrantResult};
use crate::validate::{NsfValidator, ValidationResult};

/// Document validation subcommands
#[derive(Subcommand)]
pub enum ValidateCommands {
    /// Validate an assembled full proposal
    Proposal {
        /// Markdown file to validate
        file: PathBuf,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Validate a biographical sketch
    Biosketch {
        /// Markdown file to validate
        file: PathBuf,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Validate a budget narrative
    Narrative {
        /// Markdown file to validate
        file: PathBuf,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
}

/// Handle a validate command
pub fn handle_validate_command(cmd: ValidateCommands) -> GrantResult<()> {
    let validator = NsfValidator::new();

    let (result, strict) = match cmd {
        ValidateCommands::Proposal { file, strict } => {
            (validator.validate_proposal(&read_document(&file)?), strict)
        }
        ValidateCommands::Biosketch { file, strict } => (
            validator.validate_biographical_sketch(&read_document(&file)?),
            strict,
        ),
        ValidateCommands::Narrative { file, strict } => (
            validator.validate_budget_narrative(&read_document(&file)?),
            strict,
        ),
    };

    report_outcome(&validator, result, strict)
}

fn read_document(path: &Path) -> GrantResult<String> {
    if !path.exists() {
        return Err(GrantError::file_not_found(path));
    }
    std::fs::read_to_string(path)
        .map_err(|e| GrantError::Io(format!("Failed to read {}: {}", path.display(), e)))
}

fn report_outcome(
    validator: &NsfValidator,
    result: ValidationResult,
    strict: bool,
) -> GrantResult<()> {
    let results = [result];
    println!("{}", validator.get_validation_report(&results));
    let [result] = results;

    let failed = if strict {
        !result.passed_strict()
    } else {
        !result.passed()
    };

    if failed {
        Err(GrantError::Validation(format!(
            "document failed validation with {} error(s) and {} warning(s)",
            result.errors_count(),
            result.warnings_count()
        )))
    } else {
        Ok(())
    }
}
