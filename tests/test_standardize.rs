//! Unit tests for z-score standardization

use fraudscope::pipeline::standardize;
use polars::prelude::*;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_z_columns_have_zero_mean_unit_variance() {
    let df = common::fraud_frame(60);
    let columns = vec![
        "transactionamount".to_string(),
        "personalincome".to_string(),
    ];

    let (standardized, summaries) = standardize(&df, &columns).unwrap();

    for name in &columns {
        let z: Vec<f64> = standardized
            .column(&format!("z_{}", name))
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();

        let n = z.len() as f64;
        let mean: f64 = z.iter().sum::<f64>() / n;
        let var: f64 = z.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

        assert!(mean.abs() < 1e-9, "mean of z_{} should be 0, got {}", name, mean);
        assert!(
            (var - 1.0).abs() < 1e-9,
            "variance of z_{} should be 1, got {}",
            name,
            var
        );
    }

    assert_eq!(summaries.len(), 2);
    for summary in &summaries {
        assert!(summary.std > 0.0);
        assert!(summary.z_min < 0.0 && summary.z_max > 0.0);
    }
}

#[test]
fn test_known_parameters() {
    let df = df! {
        "x" => [2.0f64, 4.0, 6.0, 8.0],
    }
    .unwrap();

    let (standardized, summaries) = standardize(&df, &["x".to_string()]).unwrap();

    // mean 5, population std sqrt(5)
    assert!((summaries[0].mean - 5.0).abs() < 1e-12);
    assert!((summaries[0].std - 5.0f64.sqrt()).abs() < 1e-12);

    let z: Vec<f64> = standardized
        .column("z_x")
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert!((z[0] - (2.0 - 5.0) / 5.0f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_original_columns_are_preserved() {
    let df = common::fraud_frame(20);
    let columns = vec!["loanamount".to_string()];

    let (standardized, _) = standardize(&df, &columns).unwrap();

    assert_eq!(standardized.height(), df.height());
    common::assert_has_columns(&standardized, &["loanamount", "z_loanamount"]);
    assert_eq!(
        standardized.column("loanamount").unwrap().f64().unwrap()
            .into_iter().collect::<Vec<_>>(),
        df.column("loanamount").unwrap().f64().unwrap()
            .into_iter().collect::<Vec<_>>(),
    );
}

#[test]
fn test_zero_variance_column_is_fatal() {
    let df = df! {
        "flat" => [7.5f64, 7.5, 7.5, 7.5, 7.5],
        "other" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
    }
    .unwrap();

    let result = standardize(&df, &["other".to_string(), "flat".to_string()]);
    assert!(result.is_err());
    let message = result.unwrap_err().to_string();
    assert!(message.contains("flat"));
    assert!(message.contains("zero variance"));
}
