//! Model module - the random forest fraud classifier

pub mod dataset;
pub mod forest;
pub mod tree;

pub use dataset::FeatureMatrix;
pub use forest::{ForestParams, RandomForest};
pub use tree::{DecisionTree, TreeParams};
