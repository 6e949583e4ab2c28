//! CART decision tree for binary classification
//!
//! Splits on gini impurity; candidate thresholds are midpoints between
//! consecutive distinct feature values. A randomized feature subset per
//! split makes trees suitable for bagging in the forest.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::dataset::FeatureMatrix;

/// Nodes with impurity below this are treated as pure leaves.
const PURITY_EPSILON: f64 = 1e-12;

/// Decision tree configuration
#[derive(Debug, Clone)]
pub struct TreeParams {
    /// Maximum depth; unbounded when `None`
    pub max_depth: Option<usize>,
    /// Minimum samples required to attempt a split
    pub min_samples_split: usize,
    /// Minimum samples allowed in a leaf
    pub min_samples_leaf: usize,
    /// Features considered per split; all when `None`
    pub max_features: Option<usize>,
    /// Seed for the per-split feature subsampling
    pub seed: u64,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            max_features: None,
            seed: 42,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    feature_idx: usize,
    threshold: f64,
    /// Majority label of the samples that reached this node
    label: i64,
    /// Fraction of positive labels at this node
    positive_fraction: f64,
    left: Option<Box<Node>>,
    right: Option<Box<Node>>,
}

impl Node {
    fn leaf(labels: &[i64]) -> Self {
        let positive_fraction = positive_fraction(labels);
        Self {
            feature_idx: 0,
            threshold: 0.0,
            label: i64::from(positive_fraction > 0.5),
            positive_fraction,
            left: None,
            right: None,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// A single trained decision tree.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    params: TreeParams,
    root: Option<Node>,
    importances: Vec<f64>,
}

impl DecisionTree {
    pub fn new(params: TreeParams) -> Self {
        Self {
            params,
            root: None,
            importances: Vec::new(),
        }
    }

    /// Train on the full matrix.
    pub fn fit(&mut self, data: &FeatureMatrix) {
        self.importances = vec![0.0; data.n_features()];

        let indices: Vec<usize> = (0..data.n_rows()).collect();
        let mut rng = ChaCha8Rng::seed_from_u64(self.params.seed);
        let root = self.build_node(data, &indices, 0, &mut rng);
        self.root = Some(root);

        // Normalize per-tree so importances are comparable across trees
        let total: f64 = self.importances.iter().sum();
        if total > 0.0 {
            for imp in &mut self.importances {
                *imp /= total;
            }
        }
    }

    fn build_node(
        &mut self,
        data: &FeatureMatrix,
        indices: &[usize],
        depth: usize,
        rng: &mut ChaCha8Rng,
    ) -> Node {
        let labels: Vec<i64> = indices.iter().map(|&i| data.labels[i]).collect();
        let impurity = gini(&labels);

        let depth_reached = self
            .params
            .max_depth
            .is_some_and(|limit| depth >= limit);

        if depth_reached || indices.len() < self.params.min_samples_split || impurity < PURITY_EPSILON
        {
            return Node::leaf(&labels);
        }

        match self.find_best_split(data, indices, impurity, rng) {
            Some(split) => {
                if split.left.len() < self.params.min_samples_leaf
                    || split.right.len() < self.params.min_samples_leaf
                {
                    return Node::leaf(&labels);
                }

                // Impurity-decrease contribution, weighted by node size
                self.importances[split.feature_idx] += split.gain * indices.len() as f64;

                let left = self.build_node(data, &split.left, depth + 1, rng);
                let right = self.build_node(data, &split.right, depth + 1, rng);

                Node {
                    feature_idx: split.feature_idx,
                    threshold: split.threshold,
                    label: i64::from(positive_fraction(&labels) > 0.5),
                    positive_fraction: positive_fraction(&labels),
                    left: Some(Box::new(left)),
                    right: Some(Box::new(right)),
                }
            }
            None => Node::leaf(&labels),
        }
    }

    fn find_best_split(
        &self,
        data: &FeatureMatrix,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut ChaCha8Rng,
    ) -> Option<BestSplit> {
        let n_features = data.n_features();
        let max_features = self.params.max_features.unwrap_or(n_features).min(n_features);

        let mut feature_indices: Vec<usize> = (0..n_features).collect();
        feature_indices.shuffle(rng);
        feature_indices.truncate(max_features);

        let mut best: Option<BestSplit> = None;
        let mut best_gain = 0.0;

        for &feature_idx in &feature_indices {
            let mut values: Vec<f64> = indices
                .iter()
                .map(|&i| data.rows[i][feature_idx])
                .collect();
            values.sort_by(|a, b| a.total_cmp(b));
            values.dedup();

            for window in values.windows(2) {
                let threshold = (window[0] + window[1]) / 2.0;

                let (left, right): (Vec<usize>, Vec<usize>) = indices
                    .iter()
                    .partition(|&&i| data.rows[i][feature_idx] <= threshold);

                if left.is_empty() || right.is_empty() {
                    continue;
                }

                let left_labels: Vec<i64> = left.iter().map(|&i| data.labels[i]).collect();
                let right_labels: Vec<i64> = right.iter().map(|&i| data.labels[i]).collect();

                let n_left = left.len() as f64;
                let n_right = right.len() as f64;
                let weighted = (n_left * gini(&left_labels) + n_right * gini(&right_labels))
                    / (n_left + n_right);
                let gain = parent_impurity - weighted;

                if gain > best_gain {
                    best_gain = gain;
                    best = Some(BestSplit {
                        feature_idx,
                        threshold,
                        gain,
                        left,
                        right,
                    });
                }
            }
        }

        best
    }

    /// Predicted label for one feature row.
    pub fn predict_one(&self, row: &[f64]) -> i64 {
        let mut node = match &self.root {
            Some(root) => root,
            None => return 0,
        };

        loop {
            if node.is_leaf() {
                return node.label;
            }

            let child = if row[node.feature_idx] <= node.threshold {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };

            match child {
                Some(next) => node = next,
                None => return node.label,
            }
        }
    }

    /// Probability of the positive class for one row.
    pub fn predict_proba_one(&self, row: &[f64]) -> f64 {
        let mut node = match &self.root {
            Some(root) => root,
            None => return 0.5,
        };

        loop {
            if node.is_leaf() {
                return node.positive_fraction;
            }

            let child = if row[node.feature_idx] <= node.threshold {
                node.left.as_deref()
            } else {
                node.right.as_deref()
            };

            match child {
                Some(next) => node = next,
                None => return node.positive_fraction,
            }
        }
    }

    /// Per-feature impurity-decrease shares, normalized within this tree.
    pub fn feature_importances(&self) -> &[f64] {
        &self.importances
    }
}

struct BestSplit {
    feature_idx: usize,
    threshold: f64,
    gain: f64,
    left: Vec<usize>,
    right: Vec<usize>,
}

/// Gini impurity for binary labels: `2p(1-p)`.
fn gini(labels: &[i64]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let p = positive_fraction(labels);
    2.0 * p * (1.0 - p)
}

fn positive_fraction(labels: &[i64]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    labels.iter().filter(|&&l| l > 0).count() as f64 / labels.len() as f64
}
