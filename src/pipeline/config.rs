//! Analysis configuration - the explicit column contract every stage
//! receives instead of reaching for global constants

use serde::{Deserialize, Serialize};

/// Column-level configuration for a full analysis run.
///
/// Enumerates which columns are numeric features, nominal categoricals,
/// binary flags, which column is the target, and which subsets get outlier
/// flagging and z-score standardization. The loader validates the whole set
/// against the file schema before any computation starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Numeric feature columns
    pub numeric_columns: Vec<String>,
    /// Nominal categorical columns (one-hot encoded, reference dropped)
    pub nominal_columns: Vec<String>,
    /// Boolean-like flag columns (cast to 0/1 integers, not one-hot targets)
    pub binary_flag_columns: Vec<String>,
    /// Binary target label column
    pub target_column: String,
    /// Numeric columns monitored for IQR outliers
    pub outlier_columns: Vec<String>,
    /// Numeric columns standardized to z-scores
    pub standardize_columns: Vec<String>,
}

impl Default for AnalysisConfig {
    /// The conventional fraud transaction dataset layout.
    fn default() -> Self {
        let strings = |names: &[&str]| names.iter().map(|s| s.to_string()).collect();

        Self {
            numeric_columns: strings(&[
                "age",
                "familyincome",
                "creditscore",
                "transactionamount",
                "loanamount",
                "personalincome",
                "accountagedays",
                "numprevtransactions",
                "avgtransactionvalue",
                "internetusagehrs",
                "mobileusagehrs",
                "fraudamount",
            ]),
            nominal_columns: strings(&[
                "gender",
                "education",
                "maritalstatus",
                "region",
                "transactiontype",
                "devicetype",
            ]),
            binary_flag_columns: strings(&["hasloan", "ownshome"]),
            target_column: "isfraud".to_string(),
            outlier_columns: strings(&[
                "transactionamount",
                "loanamount",
                "avgtransactionvalue",
                "fraudamount",
            ]),
            standardize_columns: strings(&[
                "transactionamount",
                "loanamount",
                "personalincome",
                "familyincome",
            ]),
        }
    }
}

impl AnalysisConfig {
    /// Every column the input file must contain.
    pub fn expected_columns(&self) -> Vec<String> {
        let mut cols = self.numeric_columns.clone();
        cols.extend(self.nominal_columns.iter().cloned());
        cols.extend(self.binary_flag_columns.iter().cloned());
        cols.push(self.target_column.clone());
        cols
    }
}
