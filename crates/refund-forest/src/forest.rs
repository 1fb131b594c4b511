//! Bagged ensemble of decision trees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use refund_model::{FeatureMatrix, Label, LabelCounts};

use crate::config::ForestConfig;
use crate::error::{ForestError, Result};
use crate::tree::DecisionTree;

/// A fitted random forest classifier.
///
/// Immutable once fitted. Predictions are a majority vote over the trees,
/// with exact ties going to [`Label::Flagged`].
#[derive(Debug, Clone, PartialEq)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
}

impl RandomForest {
    /// Fits a forest on `features` and the parallel `labels`.
    ///
    /// Each tree gets its own RNG, seeded from a master RNG seeded with
    /// `config.seed`, so the whole ensemble is a function of data and seed.
    pub fn fit(features: &FeatureMatrix, labels: &[Label], config: &ForestConfig) -> Result<Self> {
        config.validate()?;
        if features.len() != labels.len() {
            return Err(ForestError::LengthMismatch {
                features: features.len(),
                labels: labels.len(),
            });
        }
        if features.is_empty() {
            return Err(ForestError::EmptyTrainingSet);
        }
        if features.width() == 0 {
            return Err(ForestError::InvalidConfig(
                "feature matrix has no columns".to_string(),
            ));
        }
        check_finite(features)?;

        let n_rows = features.len();
        let mut master = StdRng::seed_from_u64(config.seed);
        let trees: Vec<DecisionTree> = (0..config.n_trees)
            .map(|_| {
                let mut rng = StdRng::seed_from_u64(master.random::<u64>());
                let samples: Vec<usize> = if config.bootstrap {
                    (0..n_rows).map(|_| rng.random_range(0..n_rows)).collect()
                } else {
                    (0..n_rows).collect()
                };
                DecisionTree::fit(features, labels, samples, config, &mut rng)
            })
            .collect();

        let total_depth: usize = trees.iter().map(DecisionTree::depth).sum();
        debug!(
            trees = trees.len(),
            rows = n_rows,
            features = features.width(),
            seed = config.seed,
            mean_depth = total_depth as f64 / trees.len() as f64,
            "fitted random forest"
        );

        Ok(Self {
            trees,
            n_features: features.width(),
        })
    }

    /// Tallies the votes of every tree for one row.
    pub fn votes(&self, row: &[f64]) -> LabelCounts {
        let mut votes = LabelCounts::default();
        for tree in &self.trees {
            votes.add(tree.predict_row(row), 1);
        }
        votes
    }

    /// Majority-vote label for one row.
    pub fn predict_row(&self, row: &[f64]) -> Label {
        self.votes(row).majority()
    }

    /// Fraction of trees voting [`Label::Approved`] for one row.
    pub fn approval_votes(&self, row: &[f64]) -> f64 {
        self.votes(row).approved as f64 / self.trees.len() as f64
    }

    /// Predicts every row of `features`, in order.
    pub fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        if !features.is_empty() && features.width() != self.n_features {
            return Err(ForestError::FeatureCountMismatch {
                expected: self.n_features,
                found: features.width(),
            });
        }
        check_finite(features)?;
        Ok(features.rows().map(|row| self.predict_row(row)).collect())
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Number of features the forest was fitted on.
    pub fn n_features(&self) -> usize {
        self.n_features
    }
}

fn check_finite(features: &FeatureMatrix) -> Result<()> {
    for (row, values) in features.rows().enumerate() {
        if let Some((feature, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ForestError::NonFiniteFeature {
                row,
                feature,
                value,
            });
        }
    }
    Ok(())
}
