//! Integration tests for the bodylog binary.
//!
//! These tests verify end-to-end behavior including:
//! - Report output for a well-formed log
//! - Date cutoff filtering with `after`
//! - Chart and CSV export

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const LOG: &str = r#"
DOB: 24 May 1995
samples:
  - date: 2020-05-24
    weight: 70 kg
    height: 175 cm
  - date: 14 June 2020
    weight: 152 lb
    height: 5ft9
  - date: 2020-07-04
    weight: 68.5 kg
    height: 175 cm
"#;

/// Helper to create a test directory holding a log file
fn setup_log(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("data.yaml");
    fs::write(&log_path, contents).expect("Failed to write log");
    (temp_dir, log_path)
}

/// Helper to get the CLI with an isolated config
fn cli(temp_dir: &Path) -> Command {
    let config_path = temp_dir.join("config.toml");
    if !config_path.exists() {
        fs::write(&config_path, "").expect("Failed to write config");
    }
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("bodylog"));
    cmd.arg("--config").arg(config_path);
    cmd
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("bodylog"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Weight and height log with BMI trends",
        ));
}

#[test]
fn test_default_report() {
    let (temp_dir, log_path) = setup_log(LOG);

    cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Date of birth: 1995-05-24"))
        .stdout(predicate::str::contains("2020-05-24"))
        .stdout(predicate::str::contains("25.0"))
        .stdout(predicate::str::contains("22.86"))
        .stdout(predicate::str::contains("Trend 2020-05-24 → 2020-07-04 (42 days)"));
}

#[test]
fn test_report_subcommand_matches_default() {
    let (temp_dir, log_path) = setup_log(LOG);

    let default = cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .output()
        .unwrap();
    let report = cli(temp_dir.path())
        .arg("report")
        .arg("--log")
        .arg(&log_path)
        .output()
        .unwrap();

    assert_eq!(default.stdout, report.stdout);
}

#[test]
fn test_after_filters_records() {
    let (temp_dir, log_path) = setup_log(LOG);

    cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .args(["after", "1", "June", "2020"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Showing records on or after 2020-06-01"))
        .stdout(predicate::str::contains("2020-06-14"))
        .stdout(predicate::str::contains("2020-05-24").not());
}

#[test]
fn test_after_is_case_insensitive() {
    let (temp_dir, log_path) = setup_log(LOG);

    for keyword in ["AFTER", "aFter"] {
        cli(temp_dir.path())
            .arg("--log")
            .arg(&log_path)
            .args([keyword, "2020-07-01"])
            .assert()
            .success()
            .stdout(predicate::str::contains("2020-07-04"))
            .stdout(predicate::str::contains("showing measurements only"));
    }
}

#[test]
fn test_after_bad_date_fails() {
    let (temp_dir, log_path) = setup_log(LOG);

    cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .args(["after", "whenever"])
        .assert()
        .failure();
}

#[test]
fn test_after_everything_leaves_no_records() {
    let (temp_dir, log_path) = setup_log(LOG);

    cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .args(["after", "2030-01-01"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No records on or after 2030-01-01."));
}

#[test]
fn test_export_json() {
    let (temp_dir, log_path) = setup_log(LOG);
    let out_dir = temp_dir.path().join("out");

    cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .arg("export")
        .arg("--out")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote chart data for 3 records"));

    let chart: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(out_dir.join("chart.json")).unwrap()).unwrap();
    assert_eq!(chart["scatter"]["weight"].as_array().unwrap().len(), 3);
    assert_eq!(chart["trends"]["weight"].as_array().unwrap().len(), 42);
    assert_eq!(chart["trends"]["weight_delta"].as_array().unwrap().len(), 42);
    assert_eq!(chart["fit_lines"]["weight"].as_array().unwrap().len(), 4);
    assert_eq!(chart["bands"].as_array().unwrap().len(), 5);
}

#[test]
fn test_export_csv_with_after() {
    let (temp_dir, log_path) = setup_log(LOG);
    let out_dir = temp_dir.path().join("out");

    cli(temp_dir.path())
        .arg("--log")
        .arg(&log_path)
        .arg("export")
        .arg("--format")
        .arg("csv")
        .arg("--after")
        .arg("10 June 2020")
        .arg("--out")
        .arg(&out_dir)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 records"));

    let records = fs::read_to_string(out_dir.join("records.csv")).unwrap();
    assert_eq!(records.lines().count(), 3); // header + 2 rows
    assert!(records.starts_with("date,age_years,weight_kg,height_cm,bmi"));

    let series = fs::read_to_string(out_dir.join("series.csv")).unwrap();
    assert_eq!(series.lines().count(), 1 + 21);
}

#[test]
fn test_log_path_from_config() {
    let (temp_dir, log_path) = setup_log(LOG);
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!("[data]\nlog_path = {:?}\n", log_path.to_str().unwrap()),
    )
    .unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("bodylog"))
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("2020-07-04"));
}

#[test]
fn test_oversized_fit_extension_is_a_config_error() {
    let (temp_dir, log_path) = setup_log(LOG);
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[trend]\nfit_extension_days = 2000000000\n").unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("bodylog"))
        .arg("--config")
        .arg(&config_path)
        .arg("--log")
        .arg(&log_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("fit_extension_days"))
        .stderr(predicate::str::contains("panicked").not());
}
