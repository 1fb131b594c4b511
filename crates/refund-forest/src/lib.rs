//! Random forest classification for refund triage.
//!
//! A seeded ensemble of CART decision trees (Gini impurity, bootstrap
//! sampling, random feature subsets per split) combined by majority vote,
//! plus the seeded train/test split and the accuracy metrics used to score
//! held-out rows.
//!
//! Given the same data and the same [`ForestConfig::seed`], fitting produces
//! the same trees and therefore the same predictions.

mod config;
mod error;
mod forest;
mod metrics;
mod node;
mod sampling;
mod split;
mod tree;

pub use config::{DEFAULT_SEED, ForestConfig, MaxFeatures};
pub use error::{ForestError, Result};
pub use forest::RandomForest;
pub use metrics::{ConfusionMatrix, accuracy_score};
pub use node::{Node, NodeIndex};
pub use sampling::{DEFAULT_TEST_FRACTION, SplitIndices, train_test_split};
pub use tree::DecisionTree;
