//! Dataset loader and schema validation for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::path::Path;

use super::config::AnalysisConfig;
use super::error::PipelineError;

/// Load a dataset from a file (CSV or Parquet based on extension) into
/// memory. The whole run is a single batch pass, so the frame is collected
/// eagerly.
pub fn load_dataset(path: &Path, infer_schema_length: usize) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // 0 means scan the whole file for schema inference
    let infer = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    let lf = match extension.as_str() {
        "csv" => LazyCsvReader::new(path)
            .with_infer_schema_length(infer)
            .finish()
            .with_context(|| format!("Failed to load CSV file: {}", path.display()))?,
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    let df = lf
        .collect()
        .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    Ok(df)
}

/// Validate the loaded frame against the analysis configuration.
///
/// Fails fast before any computation when an expected column is absent or a
/// numeric feature column carries a non-numeric dtype. There is no schema
/// negotiation; a mismatched file is a fatal input error.
pub fn validate_schema(df: &DataFrame, config: &AnalysisConfig) -> Result<()> {
    let present: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    for col in config.expected_columns() {
        if !present.contains(&col) {
            return Err(PipelineError::MissingColumn(col).into());
        }
    }

    for col_name in &config.numeric_columns {
        let col = df.column(col_name)?;
        if !col.dtype().is_primitive_numeric() {
            return Err(PipelineError::NonNumericColumn {
                column: col_name.clone(),
                dtype: col.dtype().to_string(),
            }
            .into());
        }
    }

    Ok(())
}

/// Drop rows where the target label is missing, returning a new frame.
///
/// An empty result is an explicit data-quality failure rather than a silent
/// run over zero rows.
pub fn drop_missing_target(df: &DataFrame, target: &str) -> Result<DataFrame> {
    let mask = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?
        .as_materialized_series()
        .is_not_null();

    let filtered = df.filter(&mask)?;

    if filtered.height() == 0 {
        return Err(PipelineError::EmptyAfterTargetFilter(target.to_string()).into());
    }

    Ok(filtered)
}

/// Basic size statistics for the loaded frame: rows, columns, estimated MB.
pub fn dataset_size(df: &DataFrame) -> (usize, usize, f64) {
    let (rows, cols) = df.shape();
    let memory_mb = df.estimated_size() as f64 / (1024.0 * 1024.0);
    (rows, cols, memory_mb)
}
