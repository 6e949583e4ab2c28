//! IQR-based outlier detection
//!
//! Flags values strictly outside `[Q1 - k*IQR, Q3 + k*IQR]` per monitored
//! column. Flagging is non-destructive: rows are never removed or altered,
//! a derived 0/1 column is appended per monitored column.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::stats::{column_values, quantile};

/// Per-column outlier detection result.
#[derive(Debug, Clone, Serialize)]
pub struct OutlierSummary {
    pub column: String,
    pub outliers: usize,
    pub lower_bound: f64,
    pub upper_bound: f64,
}

/// Compute the IQR outlier mask and bounds for a series of values.
///
/// Nulls are never outliers. A zero IQR (constant column) is deliberately
/// not special-cased: any value different from the constant is flagged.
pub fn iqr_outliers(values: &[Option<f64>], k: f64) -> (Vec<bool>, f64, f64) {
    let mut sorted: Vec<f64> = values.iter().flatten().copied().collect();
    sorted.sort_by(|a, b| a.total_cmp(b));

    if sorted.is_empty() {
        return (vec![false; values.len()], f64::NAN, f64::NAN);
    }

    let q1 = quantile(&sorted, 0.25);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let lower = q1 - k * iqr;
    let upper = q3 + k * iqr;

    let mask = values
        .iter()
        .map(|v| matches!(v, Some(x) if *x < lower || *x > upper))
        .collect();

    (mask, lower, upper)
}

/// Flag outliers for every monitored column.
///
/// Returns a new frame with one `{col}_outlier` integer column appended per
/// monitored column, plus the per-column summaries for reporting.
pub fn flag_outliers(
    df: &DataFrame,
    outlier_columns: &[String],
    k: f64,
) -> Result<(DataFrame, Vec<OutlierSummary>)> {
    let mut flagged = df.clone();
    let mut summaries = Vec::with_capacity(outlier_columns.len());

    for name in outlier_columns {
        let values = column_values(df, name)?;
        let (mask, lower, upper) = iqr_outliers(&values, k);

        let flags: Vec<i32> = mask.iter().map(|&m| i32::from(m)).collect();
        let flag_col = Column::new(format!("{}_outlier", name).into(), flags);
        flagged = flagged.hstack(&[flag_col])?;

        summaries.push(OutlierSummary {
            column: name.clone(),
            outliers: mask.iter().filter(|&&m| m).count(),
            lower_bound: lower,
            upper_bound: upper,
        });
    }

    Ok((flagged, summaries))
}
