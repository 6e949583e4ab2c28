//! Row-major feature matrix consumed by the classifier

use anyhow::Result;
use polars::prelude::*;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::pipeline::PipelineError;

/// Fully numeric training data: named feature columns, one row per
/// transaction, and the integer label per row.
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    pub feature_names: Vec<String>,
    pub rows: Vec<Vec<f64>>,
    pub labels: Vec<i64>,
}

impl FeatureMatrix {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_features(&self) -> usize {
        self.feature_names.len()
    }

    /// Build the matrix from the encoded model frame. Every column except
    /// the target becomes a feature, in frame order. A null feature cell is
    /// a fatal error; imputation is out of scope.
    pub fn from_encoded(df: &DataFrame, target: &str) -> Result<Self> {
        let feature_names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .filter(|name| name != target)
            .collect();

        let n_rows = df.height();
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(feature_names.len());

        for name in &feature_names {
            let col = df.column(name)?.cast(&DataType::Float64)?;
            let mut values = Vec::with_capacity(n_rows);
            for (row, v) in col.f64()?.into_iter().enumerate() {
                match v {
                    Some(x) => values.push(x),
                    None => {
                        return Err(PipelineError::MissingFeatureValue {
                            column: name.clone(),
                            row,
                        }
                        .into())
                    }
                }
            }
            columns.push(values);
        }

        let label_col = df.column(target)?.cast(&DataType::Int64)?;
        let labels: Vec<i64> = label_col
            .i64()?
            .into_iter()
            .enumerate()
            .map(|(row, v)| {
                v.ok_or_else(|| PipelineError::MissingFeatureValue {
                    column: target.to_string(),
                    row,
                })
            })
            .collect::<Result<_, _>>()?;

        // Transpose column-major extraction into row-major storage
        let rows: Vec<Vec<f64>> = (0..n_rows)
            .map(|r| columns.iter().map(|c| c[r]).collect())
            .collect();

        Ok(Self {
            feature_names,
            rows,
            labels,
        })
    }

    /// New matrix containing only the given row indices.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            feature_names: self.feature_names.clone(),
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
            labels: indices.iter().map(|&i| self.labels[i]).collect(),
        }
    }

    /// Bootstrap resample (with replacement) of the same size, seeded.
    pub fn bootstrap_sample(&self, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let n = self.n_rows();
        let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
        self.subset(&indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_encoded_excludes_target() {
        let df = df! {
            "a" => [1.0f64, 2.0, 3.0],
            "b" => [0i32, 1, 0],
            "isfraud" => [0i64, 1, 0],
        }
        .unwrap();

        let matrix = FeatureMatrix::from_encoded(&df, "isfraud").unwrap();
        assert_eq!(matrix.feature_names, vec!["a", "b"]);
        assert_eq!(matrix.n_rows(), 3);
        assert_eq!(matrix.rows[1], vec![2.0, 1.0]);
        assert_eq!(matrix.labels, vec![0, 1, 0]);
    }

    #[test]
    fn test_bootstrap_is_seeded() {
        let df = df! {
            "a" => [1.0f64, 2.0, 3.0, 4.0, 5.0],
            "isfraud" => [0i64, 1, 0, 1, 0],
        }
        .unwrap();
        let matrix = FeatureMatrix::from_encoded(&df, "isfraud").unwrap();

        let s1 = matrix.bootstrap_sample(7);
        let s2 = matrix.bootstrap_sample(7);
        assert_eq!(s1.rows, s2.rows);
        assert_eq!(s1.n_rows(), matrix.n_rows());
    }
}
