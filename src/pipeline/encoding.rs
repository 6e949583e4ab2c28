//! Feature encoding: binary flag casting and one-hot expansion
//!
//! Produces the fully numeric model frame: numeric features, 0/1 flag
//! columns, indicator columns for nominal categoricals (lexicographically
//! first category dropped as reference), and the integer target label.
//! The output column set and order are deterministic for identical input.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use polars::prelude::*;

use super::config::AnalysisConfig;
use super::error::PipelineError;

/// Tolerance for treating a float as an exact 0/1 flag value
const FLAG_TOLERANCE: f64 = 1e-9;

/// Encode the frame into the numeric-only model table.
///
/// Column order: numeric features, binary flags, indicator columns (per
/// nominal column, categories sorted lexicographically with the first
/// dropped), then the target label as the final column.
pub fn encode_features(df: &DataFrame, config: &AnalysisConfig) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::new();

    for name in &config.numeric_columns {
        let col = df
            .column(name)?
            .cast(&DataType::Float64)
            .with_context(|| format!("Column '{}' is not numeric", name))?;
        columns.push(col);
    }

    for name in &config.binary_flag_columns {
        columns.push(cast_flag_column(df, name)?);
    }

    for name in &config.nominal_columns {
        columns.extend(one_hot_columns(df, name)?);
    }

    columns.push(cast_label_column(df, &config.target_column)?);

    Ok(DataFrame::new(columns)?)
}

/// Cast a boolean-like flag column to 0/1 integers.
///
/// Accepts a boolean dtype or a numeric column whose values are exactly 0
/// or 1. Anything else (including nulls) is a validation error; flags are
/// expected to arrive clean.
fn cast_flag_column(df: &DataFrame, name: &str) -> Result<Column> {
    let col = df
        .column(name)
        .with_context(|| format!("Flag column '{}' not found", name))?;

    let flags: Vec<i32> = match col.dtype() {
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| match v {
                Some(b) => Ok(i32::from(b)),
                None => Err(PipelineError::NonBooleanFlag {
                    column: name.to_string(),
                    value: "null".to_string(),
                }),
            })
            .collect::<Result<_, _>>()?,
        dtype if dtype.is_primitive_numeric() => {
            let float_col = col.cast(&DataType::Float64)?;
            float_col
                .f64()?
                .into_iter()
                .map(|v| match v {
                    Some(x) if (x - 0.0).abs() < FLAG_TOLERANCE => Ok(0),
                    Some(x) if (x - 1.0).abs() < FLAG_TOLERANCE => Ok(1),
                    Some(x) => Err(PipelineError::NonBooleanFlag {
                        column: name.to_string(),
                        value: x.to_string(),
                    }),
                    None => Err(PipelineError::NonBooleanFlag {
                        column: name.to_string(),
                        value: "null".to_string(),
                    }),
                })
                .collect::<Result<_, _>>()?
        }
        other => {
            return Err(PipelineError::NonBooleanFlag {
                column: name.to_string(),
                value: format!("dtype {}", other),
            }
            .into())
        }
    };

    Ok(Column::new(name.into(), flags))
}

/// Expand a nominal column into indicator columns, one per observed
/// category minus the lexicographically first (the reference category).
///
/// A null cell contributes 0 to every indicator. A column with a single
/// observed category produces no indicators at all.
fn one_hot_columns(df: &DataFrame, name: &str) -> Result<Vec<Column>> {
    let values = column_as_strings(df, name)?;

    let categories: BTreeSet<&String> = values.iter().flatten().collect();

    // BTreeSet iterates in lexicographic order; skip the reference category
    let encoded_categories: Vec<&String> = categories.into_iter().skip(1).collect();

    let mut columns = Vec::with_capacity(encoded_categories.len());
    for category in encoded_categories {
        let indicators: Vec<i32> = values
            .iter()
            .map(|v| i32::from(v.as_ref() == Some(category)))
            .collect();
        columns.push(Column::new(
            format!("{}_{}", name, category).into(),
            indicators,
        ));
    }

    Ok(columns)
}

/// Cast the target column to integer labels.
fn cast_label_column(df: &DataFrame, target: &str) -> Result<Column> {
    let col = df
        .column(target)
        .with_context(|| format!("Target column '{}' not found", target))?
        .cast(&DataType::Int64)
        .with_context(|| format!("Target column '{}' is not numeric", target))?;
    Ok(col)
}

/// Read a column's cells as owned strings, preserving nulls.
fn column_as_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let col = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::String)
        .with_context(|| format!("Column '{}' cannot be read as strings", name))?;

    Ok(col
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect())
}
