//! Random forest: bagged decision trees with randomized feature subsets
//!
//! Trees train in parallel via Rayon; each tree gets a seed derived from
//! the forest seed, so the trained ensemble (and therefore every aggregate
//! prediction) is reproducible for a fixed seed regardless of thread
//! scheduling.

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use super::dataset::FeatureMatrix;
use super::tree::{DecisionTree, TreeParams};

/// Random forest configuration
#[derive(Debug, Clone)]
pub struct ForestParams {
    /// Number of trees in the ensemble
    pub n_trees: usize,
    /// Maximum depth per tree; unbounded when `None`
    pub max_depth: Option<usize>,
    /// Minimum samples required to split a node
    pub min_samples_split: usize,
    /// Minimum samples allowed in a leaf
    pub min_samples_leaf: usize,
    /// Features considered per split; `sqrt(n_features)` when `None`
    pub max_features: Option<usize>,
    /// Base seed for bootstrap sampling and per-split feature subsets
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 200,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

/// Trained random forest classifier.
#[derive(Debug, Clone)]
pub struct RandomForest {
    params: ForestParams,
    trees: Vec<DecisionTree>,
    feature_names: Vec<String>,
    importances: Vec<f64>,
}

impl RandomForest {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            trees: Vec::new(),
            feature_names: Vec::new(),
            importances: Vec::new(),
        }
    }

    /// Train the ensemble on bootstrap samples of the training matrix,
    /// showing a progress bar across trees.
    pub fn fit(&mut self, data: &FeatureMatrix) {
        self.feature_names = data.feature_names.clone();
        let n_features = data.n_features();

        let max_features = self
            .params
            .max_features
            .unwrap_or_else(|| (n_features as f64).sqrt().ceil() as usize)
            .min(n_features)
            .max(1);

        let pb = ProgressBar::new(self.params.n_trees as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("   Training trees [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("=>-"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let trees: Vec<DecisionTree> = (0..self.params.n_trees)
            .into_par_iter()
            .map(|i| {
                let tree_params = TreeParams {
                    max_depth: self.params.max_depth,
                    min_samples_split: self.params.min_samples_split,
                    min_samples_leaf: self.params.min_samples_leaf,
                    max_features: Some(max_features),
                    seed: self.params.seed.wrapping_add(i as u64),
                };

                let sample = data.bootstrap_sample(self.params.seed.wrapping_add(i as u64));
                let mut tree = DecisionTree::new(tree_params);
                tree.fit(&sample);

                pb.inc(1);
                tree
            })
            .collect();

        pb.finish_and_clear();
        self.trees = trees;

        // Aggregate per-tree importance shares and renormalize to sum to 1
        self.importances = vec![0.0; n_features];
        for tree in &self.trees {
            for (slot, &imp) in self.importances.iter_mut().zip(tree.feature_importances()) {
                *slot += imp;
            }
        }
        let total: f64 = self.importances.iter().sum();
        if total > 0.0 {
            for imp in &mut self.importances {
                *imp /= total;
            }
        }
    }

    /// Majority-vote label for one feature row.
    pub fn predict_one(&self, row: &[f64]) -> i64 {
        if self.trees.is_empty() {
            return 0;
        }
        let positive_votes = self
            .trees
            .iter()
            .filter(|tree| tree.predict_one(row) > 0)
            .count();
        i64::from(positive_votes * 2 > self.trees.len())
    }

    /// Predicted labels for every row in the matrix.
    pub fn predict(&self, data: &FeatureMatrix) -> Vec<i64> {
        data.rows.par_iter().map(|row| self.predict_one(row)).collect()
    }

    /// Positive-class probability (fraction of trees voting fraud).
    pub fn predict_proba_one(&self, row: &[f64]) -> f64 {
        if self.trees.is_empty() {
            return 0.5;
        }
        self.trees
            .iter()
            .filter(|tree| tree.predict_one(row) > 0)
            .count() as f64
            / self.trees.len() as f64
    }

    /// Normalized per-feature importances, aligned with the training
    /// matrix's feature order. Sums to 1 across all features.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }

    /// Feature importances sorted descending, paired with feature names.
    pub fn importance_ranking(&self) -> Vec<(&str, f64)> {
        let mut ranking: Vec<(&str, f64)> = self
            .feature_names
            .iter()
            .zip(self.importances.iter())
            .map(|(name, &imp)| (name.as_str(), imp))
            .collect();

        ranking.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(b.0))
        });
        ranking
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }
}
