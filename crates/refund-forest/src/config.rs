//! Forest hyperparameters.

use serde::{Deserialize, Serialize};

use crate::error::{ForestError, Result};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 42;

/// How many features to consider when searching for a split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxFeatures {
    /// `floor(sqrt(n_features))`, at least one.
    #[default]
    Sqrt,
    /// Every feature.
    All,
    /// A fixed count, capped at the number of features.
    Count(usize),
}

impl MaxFeatures {
    /// Resolves to a concrete count for `n_features` features.
    pub fn resolve(self, n_features: usize) -> usize {
        let count = match self {
            Self::Sqrt => (n_features as f64).sqrt().floor() as usize,
            Self::All => n_features,
            Self::Count(count) => count,
        };
        count.clamp(1, n_features.max(1))
    }
}

/// Configuration for fitting a [`RandomForest`](crate::RandomForest).
///
/// Defaults follow the common random forest defaults: 100 fully grown trees
/// on bootstrap samples, `sqrt` features per split, seed 42.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestConfig {
    /// Number of trees in the ensemble.
    pub n_trees: usize,
    /// Features examined per split.
    pub max_features: MaxFeatures,
    /// Depth cap; `None` grows until leaves are pure or too small.
    pub max_depth: Option<usize>,
    /// Minimum samples a node needs before it may split.
    pub min_samples_split: usize,
    /// Minimum samples each child of a split must keep.
    pub min_samples_leaf: usize,
    /// Train each tree on a bootstrap sample instead of every row.
    pub bootstrap: bool,
    /// Seed for bootstrap sampling and feature selection.
    pub seed: u64,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_features: MaxFeatures::Sqrt,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
            bootstrap: true,
            seed: DEFAULT_SEED,
        }
    }
}

impl ForestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_trees(mut self, n_trees: usize) -> Self {
        self.n_trees = n_trees;
        self
    }

    #[must_use]
    pub fn with_max_features(mut self, max_features: MaxFeatures) -> Self {
        self.max_features = max_features;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples_leaf: usize) -> Self {
        self.min_samples_leaf = min_samples_leaf;
        self
    }

    #[must_use]
    pub fn with_bootstrap(mut self, bootstrap: bool) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if self.n_trees == 0 {
            return Err(ForestError::InvalidConfig(
                "n_trees must be at least 1".to_string(),
            ));
        }
        if self.min_samples_split < 2 {
            return Err(ForestError::InvalidConfig(
                "min_samples_split must be at least 2".to_string(),
            ));
        }
        if self.min_samples_leaf == 0 {
            return Err(ForestError::InvalidConfig(
                "min_samples_leaf must be at least 1".to_string(),
            ));
        }
        if self.max_depth == Some(0) {
            return Err(ForestError::InvalidConfig(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_features == MaxFeatures::Count(0) {
            return Err(ForestError::InvalidConfig(
                "max_features must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
