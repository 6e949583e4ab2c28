//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Deterministic synthetic transaction dataset with the full expected
/// schema (12 numeric columns, 6 nominal columns, 2 binary flags, target).
///
/// Every 10th row is fraud, so `rows = 100` yields exactly 10 fraud rows.
/// Fraud rows carry clearly elevated transaction and fraud amounts so the
/// classifier has real signal to learn.
pub fn fraud_frame(rows: usize) -> DataFrame {
    let is_fraud = |i: usize| i % 10 == 0;

    let pick = |options: &[&str], i: usize| options[i % options.len()].to_string();

    let age: Vec<f64> = (0..rows).map(|i| 20.0 + (i % 50) as f64).collect();
    let familyincome: Vec<f64> = (0..rows).map(|i| 30_000.0 + (i % 40) as f64 * 1_500.0).collect();
    let creditscore: Vec<f64> = (0..rows).map(|i| 450.0 + (i % 35) as f64 * 10.0).collect();
    let transactionamount: Vec<f64> = (0..rows)
        .map(|i| {
            if is_fraud(i) {
                2_000.0 + i as f64 * 7.0
            } else {
                50.0 + (i % 25) as f64 * 12.0
            }
        })
        .collect();
    let loanamount: Vec<f64> = (0..rows).map(|i| (i % 20) as f64 * 2_500.0).collect();
    let personalincome: Vec<f64> = (0..rows).map(|i| 18_000.0 + (i % 30) as f64 * 900.0).collect();
    let accountagedays: Vec<f64> = (0..rows).map(|i| 30.0 + (i % 60) as f64 * 50.0).collect();
    let numprevtransactions: Vec<f64> = (0..rows).map(|i| (i % 45) as f64).collect();
    let avgtransactionvalue: Vec<f64> = (0..rows).map(|i| 40.0 + (i % 22) as f64 * 9.0).collect();
    let internetusagehrs: Vec<f64> = (0..rows).map(|i| (i % 12) as f64 + 0.5).collect();
    let mobileusagehrs: Vec<f64> = (0..rows).map(|i| (i % 8) as f64 + 1.0).collect();
    let fraudamount: Vec<f64> = (0..rows)
        .map(|i| if is_fraud(i) { 800.0 + i as f64 * 3.0 } else { 0.0 })
        .collect();

    let gender: Vec<String> = (0..rows).map(|i| pick(&["female", "male"], i)).collect();
    let education: Vec<String> = (0..rows)
        .map(|i| pick(&["bachelor", "highschool", "master"], i))
        .collect();
    let maritalstatus: Vec<String> = (0..rows).map(|i| pick(&["married", "single"], i)).collect();
    let region: Vec<String> = (0..rows)
        .map(|i| pick(&["east", "north", "south", "west"], i))
        .collect();
    let transactiontype: Vec<String> = (0..rows).map(|i| pick(&["online", "pos"], i)).collect();
    let devicetype: Vec<String> = (0..rows)
        .map(|i| pick(&["desktop", "mobile", "tablet"], i))
        .collect();

    let hasloan: Vec<i32> = (0..rows).map(|i| (i % 2) as i32).collect();
    let ownshome: Vec<i32> = (0..rows).map(|i| ((i / 2) % 2) as i32).collect();
    let isfraud: Vec<i64> = (0..rows).map(|i| i64::from(is_fraud(i))).collect();

    df! {
        "age" => age,
        "familyincome" => familyincome,
        "creditscore" => creditscore,
        "transactionamount" => transactionamount,
        "loanamount" => loanamount,
        "personalincome" => personalincome,
        "accountagedays" => accountagedays,
        "numprevtransactions" => numprevtransactions,
        "avgtransactionvalue" => avgtransactionvalue,
        "internetusagehrs" => internetusagehrs,
        "mobileusagehrs" => mobileusagehrs,
        "fraudamount" => fraudamount,
        "gender" => gender,
        "education" => education,
        "maritalstatus" => maritalstatus,
        "region" => region,
        "transactiontype" => transactiontype,
        "devicetype" => devicetype,
        "hasloan" => hasloan,
        "ownshome" => ownshome,
        "isfraud" => isfraud,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Assert that a DataFrame contains specific columns
pub fn assert_has_columns(df: &DataFrame, expected_cols: &[&str]) {
    let actual_cols: Vec<String> = df.get_column_names().iter().map(|s| s.to_string()).collect();
    for col in expected_cols {
        assert!(
            actual_cols.contains(&col.to_string()),
            "Missing expected column: '{}'. Actual columns: {:?}",
            col,
            actual_cols
        );
    }
}
