//! Typed errors for the analysis pipeline.
//!
//! All of these are fatal: the run is a one-shot batch job and every error
//! propagates to the top and aborts. There is no retry or partial-result
//! recovery anywhere in the pipeline.

use thiserror::Error;

/// Domain failures the pipeline can surface.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An expected column is absent from the loaded dataset.
    #[error("column '{0}' not found in dataset")]
    MissingColumn(String),

    /// A column that must be numeric could not be cast to a float type.
    #[error("column '{column}' is not numeric (dtype: {dtype})")]
    NonNumericColumn { column: String, dtype: String },

    /// Every row had a missing target label, leaving nothing to analyze.
    #[error("no rows remain after dropping records with a missing '{0}' label")]
    EmptyAfterTargetFilter(String),

    /// Standardizing a constant column is undefined; surfaced explicitly
    /// instead of propagating NaN through the report.
    #[error("column '{column}' has zero variance; z-score standardization is undefined")]
    ZeroVariance { column: String },

    /// A binary flag column contained something other than 0/1 or booleans.
    #[error("flag column '{column}' is not boolean-like (found value '{value}')")]
    NonBooleanFlag { column: String, value: String },

    /// A target class is too small to stratify at the requested ratio.
    #[error(
        "class {label} has {count} row(s); too few to stratify \
         at a {test_fraction:.2} test fraction"
    )]
    ClassTooSmall {
        label: i64,
        count: usize,
        test_fraction: f64,
    },

    /// A feature cell was null when building the model matrix. Imputation
    /// is out of scope; the dataset is expected to be complete.
    #[error("missing value in feature column '{column}' at row {row}")]
    MissingFeatureValue { column: String, row: usize },
}
