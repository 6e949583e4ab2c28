//! CLI integration tests using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

fn fraudscope() -> Command {
    Command::cargo_bin("fraudscope").unwrap()
}

#[test]
fn test_missing_input_file_fails() {
    fraudscope()
        .args(["--input", "no_such_file.csv"])
        .assert()
        .failure();
}

#[test]
fn test_full_run_reports_all_sections() {
    let mut df = common::fraud_frame(100);
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    fraudscope()
        .args(["--input", csv_path.to_str().unwrap(), "--trees", "25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Descriptive Statistics"))
        .stdout(predicate::str::contains("IQR Outlier Detection"))
        .stdout(predicate::str::contains("Z-Score Standardization"))
        .stdout(predicate::str::contains("Correlation with Fraud Label"))
        .stdout(predicate::str::contains("Train/Test Split"))
        .stdout(predicate::str::contains("Accuracy:"))
        .stdout(predicate::str::contains("Confusion matrix"))
        .stdout(predicate::str::contains("feature importances"));
}

#[test]
fn test_missing_column_aborts_before_analysis() {
    let mut df = common::fraud_frame(50).drop("region").unwrap();
    let (_temp_dir, csv_path) = common::create_temp_csv(&mut df);

    fraudscope()
        .args(["--input", csv_path.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("region"));
}

#[test]
fn test_export_writes_json_report() {
    let mut df = common::fraud_frame(100);
    let (temp_dir, csv_path) = common::create_temp_csv(&mut df);
    let report_path = temp_dir.path().join("report.json");

    fraudscope()
        .args([
            "--input",
            csv_path.to_str().unwrap(),
            "--trees",
            "10",
            "--export",
            report_path.to_str().unwrap(),
        ])
        .assert()
        .success();

    let contents = std::fs::read_to_string(&report_path).unwrap();
    let report: serde_json::Value = serde_json::from_str(&contents).unwrap();

    assert_eq!(report["metadata"]["seed"], 42);
    assert_eq!(report["rows"], 100);
    assert!(report["evaluation"]["accuracy"].as_f64().unwrap() <= 1.0);
    assert!(report["feature_importances"].as_array().unwrap().len() > 0);
}

#[test]
fn test_invalid_test_fraction_is_rejected() {
    fraudscope()
        .args(["--test-fraction", "2.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("test_fraction"));
}
