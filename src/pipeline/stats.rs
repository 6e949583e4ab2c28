//! Descriptive statistics for numeric columns

use anyhow::{Context, Result};
use polars::prelude::*;
use serde::Serialize;

/// Summary statistics for one numeric column (pandas `describe` layout:
/// count, mean, sample std, min, quartiles, max).
#[derive(Debug, Clone, Serialize)]
pub struct ColumnSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Compute per-column summary statistics over the non-null values of each
/// configured numeric column.
pub fn describe_numeric(df: &DataFrame, numeric_columns: &[String]) -> Result<Vec<ColumnSummary>> {
    let mut summaries = Vec::with_capacity(numeric_columns.len());

    for name in numeric_columns {
        let mut values = non_null_values(df, name)?;
        values.sort_by(|a, b| a.total_cmp(b));

        let count = values.len();
        if count == 0 {
            anyhow::bail!("column '{}' has no non-null values to describe", name);
        }

        let mean = mean(&values);
        summaries.push(ColumnSummary {
            name: name.clone(),
            count,
            mean,
            std: sample_std(&values, mean),
            min: values[0],
            q25: quantile(&values, 0.25),
            median: quantile(&values, 0.5),
            q75: quantile(&values, 0.75),
            max: values[count - 1],
        });
    }

    Ok(summaries)
}

/// Extract a column as Float64 values, nulls preserved.
pub(crate) fn column_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;

    Ok(col.f64()?.into_iter().collect())
}

/// Extract a column as Float64 values with nulls dropped.
pub(crate) fn non_null_values(df: &DataFrame, name: &str) -> Result<Vec<f64>> {
    Ok(column_values(df, name)?.into_iter().flatten().collect())
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1), matching the pandas `describe`
/// convention. Returns 0 for fewer than two values.
pub(crate) fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Linearly interpolated quantile over pre-sorted values (pandas
/// `quantile` semantics). `q` is in [0, 1].
pub(crate) fn quantile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    debug_assert!((0.0..=1.0).contains(&q));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let frac = pos - lower as f64;

    if lower + 1 >= n {
        sorted[n - 1]
    } else {
        sorted[lower] + frac * (sorted[lower + 1] - sorted[lower])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let values = [1.0, 2.0, 3.0, 4.0];
        // pos = 0.25 * 3 = 0.75 -> 1.0 + 0.75 * (2.0 - 1.0)
        assert!((quantile(&values, 0.25) - 1.75).abs() < 1e-12);
        assert!((quantile(&values, 0.5) - 2.5).abs() < 1e-12);
        assert!((quantile(&values, 0.75) - 3.25).abs() < 1e-12);
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 4.0);
    }

    #[test]
    fn test_quantile_single_value() {
        assert_eq!(quantile(&[7.0], 0.25), 7.0);
    }

    #[test]
    fn test_sample_std_known_value() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let m = mean(&values);
        assert!((m - 5.0).abs() < 1e-12);
        // Sum of squared deviations = 32, ddof=1 -> 32/7
        assert!((sample_std(&values, m) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_describe_numeric() {
        let df = df! {
            "x" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
        }
        .unwrap();

        let summaries = describe_numeric(&df, &["x".to_string()]).unwrap();
        assert_eq!(summaries.len(), 1);
        let s = &summaries[0];
        assert_eq!(s.count, 5);
        assert!((s.mean - 3.0).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 5.0);
        assert!((s.median - 3.0).abs() < 1e-12);
        assert!((s.q25 - 2.0).abs() < 1e-12);
        assert!((s.q75 - 4.0).abs() < 1e-12);
    }
}
