//! Budget-to-grant synchronization
//!
//! `grant.yaml` carries a display copy of the requested amount. The sync hook
//! recomputes the grand total from `budget.yaml` and writes it back so the
//! duplicated value can never drift from the authoritative specification.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_yaml::Value;

use super::calculator::BudgetCalculator;
use crate::error::{GrantError, GrantResult};
use crate::models::Dollars;

/// Recompute the grand total and write it into grant metadata
///
/// Updates the top-level `amount_requested` field, and
/// `research_gov.total_requested` when that sub-record exists. Every other
/// field in grant.yaml is preserved. Returns the synced total.
pub fn sync_budget_to_grant(
    budget_path: impl AsRef<Path>,
    grant_path: impl AsRef<Path>,
) -> GrantResult<Dollars> {
    let grant_path = grant_path.as_ref();

    let calc = BudgetCalculator::from_path(budget_path)?;
    let total = calc.grand_total();

    if !grant_path.exists() {
        return Err(GrantError::file_not_found(grant_path));
    }

    let contents = fs::read_to_string(grant_path)
        .map_err(|e| GrantError::Io(format!("Failed to read {}: {}", grant_path.display(), e)))?;

    let mut grant: Value = serde_yaml::from_str(&contents)
        .map_err(|e| GrantError::Yaml(format!("Failed to parse {}: {}", grant_path.display(), e)))?;

    let mapping = grant.as_mapping_mut().ok_or_else(|| {
        GrantError::Sync(format!(
            "{} is not a mapping document",
            grant_path.display()
        ))
    })?;

    mapping.insert(
        Value::String("amount_requested".into()),
        Value::Number(total.amount().into()),
    );

    if let Some(research_gov) = mapping
        .get_mut(&Value::String("research_gov".into()))
        .and_then(Value::as_mapping_mut)
    {
        research_gov.insert(
            Value::String("total_requested".into()),
            Value::Number(total.amount().into()),
        );
    }

    write_yaml_atomic(grant_path, &grant)?;

    Ok(total)
}

/// Assemble the record a remote collaboration backend upserts for this grant:
/// the raw budget document with the computed summary attached
pub fn build_push_record(budget_path: impl AsRef<Path>) -> GrantResult<serde_json::Value> {
    let budget_path = budget_path.as_ref();

    let calc = BudgetCalculator::from_path(budget_path)?;
    let summary = calc.summary();

    let contents = fs::read_to_string(budget_path)
        .map_err(|e| GrantError::Io(format!("Failed to read {}: {}", budget_path.display(), e)))?;
    let raw: Value = serde_yaml::from_str(&contents)?;

    let mut record = serde_json::to_value(&raw)?;
    let object = record
        .as_object_mut()
        .ok_or_else(|| GrantError::Sync("budget document is not a mapping".into()))?;
    object.insert("summary".into(), serde_json::to_value(&summary)?);

    Ok(record)
}

/// Write YAML to a file via a temp-file rename so a crash mid-write can't
/// leave a truncated document behind
fn write_yaml_atomic(path: &Path, value: &Value) -> GrantResult<()> {
    let temp_path = path.with_extension("yaml.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| GrantError::Io(format!("Failed to create temp file: {}", e)))?;
    let mut writer = BufWriter::new(file);

    let serialized = serde_yaml::to_string(value)?;
    writer
        .write_all(serialized.as_bytes())
        .map_err(|e| GrantError::Io(format!("Failed to write data: {}", e)))?;
    writer
        .flush()
        .map_err(|e| GrantError::Io(format!("Failed to flush data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        GrantError::Io(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}
