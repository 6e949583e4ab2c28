//! Correlation of numeric features against the fraud label

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::stats::column_values;

/// Pearson correlation of one feature against the target label.
#[derive(Debug, Clone, Serialize)]
pub struct TargetCorrelation {
    pub feature: String,
    pub correlation: f64,
}

/// Compute the Pearson correlation of every numeric column (and the target
/// itself) against the target label, sorted descending by value.
///
/// Constant columns have no defined correlation and are omitted rather than
/// reported as NaN. Rows where either side is null are skipped pairwise.
pub fn correlations_with_target(
    df: &DataFrame,
    numeric_columns: &[String],
    target: &str,
) -> Result<Vec<TargetCorrelation>> {
    let target_values = column_values(df, target)?;

    let mut correlations = Vec::with_capacity(numeric_columns.len() + 1);

    // The target correlates perfectly with itself; kept in the report to
    // mirror the full correlation column of the label.
    correlations.push(TargetCorrelation {
        feature: target.to_string(),
        correlation: 1.0,
    });

    for name in numeric_columns {
        let values = column_values(df, name)?;
        if let Some(corr) = pearson_correlation(&values, &target_values) {
            correlations.push(TargetCorrelation {
                feature: name.clone(),
                correlation: corr,
            });
        }
    }

    correlations.sort_by(|a, b| {
        b.correlation
            .partial_cmp(&a.correlation)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(correlations)
}

/// Single-pass Welford Pearson correlation over paired values.
///
/// Returns `None` when fewer than two complete pairs exist or either side
/// has zero variance.
pub fn pearson_correlation(xs: &[Option<f64>], ys: &[Option<f64>]) -> Option<f64> {
    if xs.len() != ys.len() {
        return None;
    }

    let mut n = 0.0;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in xs.iter().zip(ys.iter()) {
        if let (Some(x), Some(y)) = (x, y) {
            n += 1.0;
            let dx = x - mean_x;
            let dy = y - mean_y;
            mean_x += dx / n;
            mean_y += dy / n;
            var_x += dx * (x - mean_x);
            var_y += dy * (y - mean_y);
            cov_xy += dx * (y - mean_y);
        }
    }

    if n < 2.0 {
        return None;
    }

    let std_x = (var_x / n).sqrt();
    let std_y = (var_y / n).sqrt();

    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }

    Some(cov_xy / (n * std_x * std_y))
}
