//! End-to-end CLI tests for the grantplan binary

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BUDGET: &str = r#"
years_in_budget: 2
personnel:
  senior_key:
    - name: Ada
      role: PI
      year_1: 50000
      year_2: 50000
fringe_benefits:
  rate: 0.30
indirect_costs:
  rate: 0.10
  base: mtdc
"#;

fn grantplan() -> Command {
    Command::cargo_bin("grantplan").expect("binary builds")
}

fn project_with(budget: &str, grant: Option<&str>) -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("budget.yaml"), budget).unwrap();
    if let Some(grant) = grant {
        std::fs::write(dir.path().join("grant.yaml"), grant).unwrap();
    }
    dir
}

#[test]
fn budget_summary_renders_table() {
    let dir = project_with(BUDGET, None);

    grantplan()
        .args(["budget", "summary", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Grand Total"))
        .stdout(predicate::str::contains("A. Senior Personnel"))
        // 50000 salary + 15000 fringe + 6500 indirect per year
        .stdout(predicate::str::contains("$71,500"));
}

#[test]
fn budget_summary_exports_json() {
    let dir = project_with(BUDGET, None);

    let output = grantplan()
        .args(["budget", "summary", "--format", "json", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["grand_total"], 143000);
    assert_eq!(value["fringe_benefits"]["year_1"], 15000);
}

#[test]
fn budget_check_passes_under_caps() {
    let dir = project_with(BUDGET, Some("name: Test\nbudget_cap: 200000\n"));

    grantplan()
        .args(["budget", "check", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Budget checks passed"));
}

#[test]
fn budget_check_fails_on_cap_violation() {
    let dir = project_with(
        BUDGET,
        Some("name: Test\nbudget_cap: 100000\nannual_budget_cap: 60000\n"),
    );

    grantplan()
        .args(["budget", "check", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds total cap"))
        .stderr(predicate::str::contains("exceeds annual cap"));
}

#[test]
fn budget_sync_updates_grant_yaml() {
    let dir = project_with(BUDGET, Some("name: Test\namount_requested: 1\n"));

    grantplan()
        .args(["budget", "sync", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("$143,000"));

    let grant = std::fs::read_to_string(dir.path().join("grant.yaml")).unwrap();
    assert!(grant.contains("amount_requested: 143000"));
    assert!(grant.contains("name: Test"));
}

#[test]
fn missing_budget_file_is_an_error() {
    let dir = TempDir::new().unwrap();

    grantplan()
        .args(["budget", "summary", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("File not found"));
}

#[test]
fn validate_proposal_flags_email() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("proposal.md");
    std::fs::write(
        &file,
        "# Project\n\n## Intellectual Merit\nGood.\n\n## Broader Impacts\nWide.\n\nContact user@example.com\n",
    )
    .unwrap();

    grantplan()
        .args(["validate", "proposal"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Email address"));
}

#[test]
fn validate_clean_proposal_passes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("proposal.md");
    std::fs::write(
        &file,
        "# Project\n\n## Intellectual Merit\nGood.\n\n## Broader Impacts\nWide.\n",
    )
    .unwrap();

    grantplan()
        .args(["validate", "proposal"])
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));
}

#[test]
fn validate_biosketch_missing_section_fails() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("biosketch.md");
    std::fs::write(&file, "# Bio\n\n## Professional Preparation\nPhD\n").unwrap();

    grantplan()
        .args(["validate", "biosketch"])
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Collaborators"));
}

#[test]
fn validate_strict_mode_fails_on_warnings() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("proposal.md");
    // Headings present but merit/impacts sections missing: warnings only
    std::fs::write(&file, "# Project\n\nDescription text.\n").unwrap();

    grantplan()
        .args(["validate", "proposal"])
        .arg(&file)
        .assert()
        .success();

    grantplan()
        .args(["validate", "proposal", "--strict"])
        .arg(&file)
        .assert()
        .failure();
}
