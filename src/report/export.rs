//! JSON export of the full analysis run

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{ColumnSummary, OutlierSummary, TargetCorrelation, ZScoreSummary};

use super::evaluation::Evaluation;

/// Metadata about the analysis run
#[derive(Serialize)]
pub struct RunMetadata {
    /// Timestamp of the analysis (ISO 8601 format)
    pub timestamp: String,
    /// Fraudscope version
    pub version: String,
    /// Input file path
    pub input_file: String,
    /// Target column name
    pub target_column: String,
    /// Random seed used for splitting and training
    pub seed: u64,
    /// Number of trees in the forest
    pub trees: usize,
    /// Held-out test fraction
    pub test_fraction: f64,
    /// IQR multiplier for outlier bounds
    pub iqr_multiplier: f64,
}

/// One ranked feature importance entry
#[derive(Serialize)]
pub struct ImportanceEntry {
    pub feature: String,
    pub importance: f64,
}

/// Complete machine-readable report of one analysis run
#[derive(Serialize)]
pub struct RunReport {
    pub metadata: RunMetadata,
    pub rows: usize,
    pub descriptive_stats: Vec<ColumnSummary>,
    pub outliers: Vec<OutlierSummary>,
    pub z_scores: Vec<ZScoreSummary>,
    pub correlations: Vec<TargetCorrelation>,
    pub evaluation: Evaluation,
    pub feature_importances: Vec<ImportanceEntry>,
}

impl RunMetadata {
    pub fn now(
        input_file: &Path,
        target_column: &str,
        seed: u64,
        trees: usize,
        test_fraction: f64,
        iqr_multiplier: f64,
    ) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            target_column: target_column.to_string(),
            seed,
            trees,
            test_fraction,
            iqr_multiplier,
        }
    }
}

/// Write the run report as pretty-printed JSON.
pub fn write_report(report: &RunReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize analysis report")?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write report file: {}", path.display()))?;
    Ok(())
}
