//! Z-score standardization of selected numeric columns
//!
//! Scaling parameters (mean, population standard deviation) are fit over
//! the full frame the stage receives. The derived `z_{col}` columns are
//! report-only artifacts and never enter the model matrix.

use anyhow::Result;
use polars::prelude::*;
use serde::Serialize;

use super::error::PipelineError;
use super::stats::{column_values, mean};

/// Fitted parameters and observed output range for one standardized column.
#[derive(Debug, Clone, Serialize)]
pub struct ZScoreSummary {
    pub column: String,
    pub mean: f64,
    pub std: f64,
    pub z_min: f64,
    pub z_max: f64,
}

/// Standardize the configured columns to zero mean and unit variance,
/// appending a `z_{col}` column per input column.
///
/// Uses the population standard deviation (divide by n). A zero-variance
/// column is a fatal [`PipelineError::ZeroVariance`] rather than a silent
/// NaN in the output.
pub fn standardize(
    df: &DataFrame,
    standardize_columns: &[String],
) -> Result<(DataFrame, Vec<ZScoreSummary>)> {
    let mut standardized = df.clone();
    let mut summaries = Vec::with_capacity(standardize_columns.len());

    for name in standardize_columns {
        let values = column_values(df, name)?;
        let non_null: Vec<f64> = values.iter().flatten().copied().collect();

        let mu = mean(&non_null);
        let sigma = population_std(&non_null, mu);

        if sigma == 0.0 {
            return Err(PipelineError::ZeroVariance {
                column: name.clone(),
            }
            .into());
        }

        let z_values: Vec<Option<f64>> = values
            .iter()
            .map(|v| v.map(|x| (x - mu) / sigma))
            .collect();

        let (z_min, z_max) = z_values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| {
                (lo.min(z), hi.max(z))
            });

        let z_col = Column::new(format!("z_{}", name).into(), z_values);
        standardized = standardized.hstack(&[z_col])?;

        summaries.push(ZScoreSummary {
            column: name.clone(),
            mean: mu,
            std: sigma,
            z_min,
            z_max,
        });
    }

    Ok((standardized, summaries))
}

/// Population standard deviation (divide by n).
pub(crate) fn population_std(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / values.len() as f64).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_std() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        // Variance = 2.0 with the population convention
        assert!((population_std(&values, 3.0) - 2.0f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_is_fatal() {
        let df = df! {
            "flat" => [3.0f64, 3.0, 3.0, 3.0],
        }
        .unwrap();

        let result = standardize(&df, &["flat".to_string()]);
        assert!(result.is_err());
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("zero variance"));
    }
}
