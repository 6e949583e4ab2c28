//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// Fraudscope - Exploratory fraud analysis over a transaction dataset
#[derive(Parser, Debug)]
#[command(name = "fraudscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet). Defaults to the conventional
    /// dataset location so a bare invocation analyzes the standard file.
    #[arg(short, long, default_value = "fraud_analysis.csv")]
    pub input: PathBuf,

    /// Target column name (binary fraud label)
    #[arg(short, long, default_value = "isfraud")]
    pub target: String,

    /// Random seed - controls the train/test split and tree construction.
    /// Same seed + same input produces identical results every run.
    #[arg(long, default_value = "42")]
    pub seed: u64,

    /// Number of trees in the random forest ensemble
    #[arg(long, default_value = "200")]
    pub trees: usize,

    /// Maximum tree depth. Unbounded when not provided.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Fraction of rows held out for testing (stratified by target)
    #[arg(long, default_value = "0.25", value_parser = validate_test_fraction)]
    pub test_fraction: f64,

    /// IQR multiplier for outlier bounds (values outside
    /// [Q1 - k*IQR, Q3 + k*IQR] are flagged)
    #[arg(long, default_value = "1.5")]
    pub iqr_multiplier: f64,

    /// Number of top feature importances to display
    #[arg(long, default_value = "15")]
    pub top_importances: usize,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for full table scan (slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,

    /// Export the full analysis report as JSON to this path
    #[arg(long)]
    pub export: Option<PathBuf>,
}

/// Validator for test_fraction parameter
fn validate_test_fraction(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if value <= 0.0 || value >= 1.0 {
        Err(format!(
            "test_fraction must be strictly between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}
