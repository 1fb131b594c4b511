//! CART decision tree.

use rand::Rng;
use rand::seq::SliceRandom;

use refund_model::{FeatureMatrix, Label, LabelCounts};

use crate::config::ForestConfig;
use crate::node::{Node, NodeIndex};
use crate::split::{Split, best_split_on_feature};

/// A binary classification tree grown on one (bootstrap) sample.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionTree {
    nodes: Vec<Node>,
}

struct Pending {
    slot: NodeIndex,
    samples: Vec<usize>,
    depth: usize,
}

impl DecisionTree {
    /// Grows a tree on the rows listed in `samples` (repeats allowed).
    ///
    /// Inputs are assumed validated by the caller: `labels` parallel to
    /// `features`, every sample index in range, at least one sample.
    pub(crate) fn fit<R: Rng + ?Sized>(
        features: &FeatureMatrix,
        labels: &[Label],
        samples: Vec<usize>,
        config: &ForestConfig,
        rng: &mut R,
    ) -> Self {
        let n_features = features.width();
        let max_features = config.max_features.resolve(n_features);
        let mut feature_order: Vec<usize> = (0..n_features).collect();

        let mut nodes = vec![Node::Leaf {
            counts: LabelCounts::default(),
        }];
        let mut pending = vec![Pending {
            slot: NodeIndex::ROOT,
            samples,
            depth: 0,
        }];

        while let Some(Pending {
            slot,
            samples,
            depth,
        }) = pending.pop()
        {
            let counts = LabelCounts::from_labels(samples.iter().map(|&idx| &labels[idx]));
            let at_depth_cap = config.max_depth.is_some_and(|max| depth >= max);
            if counts.is_pure() || samples.len() < config.min_samples_split || at_depth_cap {
                nodes[slot.0] = Node::Leaf { counts };
                continue;
            }

            feature_order.shuffle(rng);
            let Some(split) = search_split(
                features,
                labels,
                &samples,
                &feature_order,
                max_features,
                config.min_samples_leaf,
            ) else {
                nodes[slot.0] = Node::Leaf { counts };
                continue;
            };

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
                .into_iter()
                .partition(|&idx| features.get(idx, split.feature) <= split.threshold);

            let left = NodeIndex(nodes.len());
            let right = NodeIndex(nodes.len() + 1);
            nodes.push(Node::Leaf {
                counts: LabelCounts::default(),
            });
            nodes.push(Node::Leaf {
                counts: LabelCounts::default(),
            });
            nodes[slot.0] = Node::Split {
                feature: split.feature,
                threshold: split.threshold,
                left,
                right,
            };
            pending.push(Pending {
                slot: right,
                samples: right_samples,
                depth: depth + 1,
            });
            pending.push(Pending {
                slot: left,
                samples: left_samples,
                depth: depth + 1,
            });
        }

        Self { nodes }
    }

    /// Predicts the label of one feature row.
    pub fn predict_row(&self, row: &[f64]) -> Label {
        let mut index = NodeIndex::ROOT;
        loop {
            match &self.nodes[index.0] {
                Node::Leaf { counts } => return counts.majority(),
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    index = if row[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(NodeIndex::ROOT, 0usize)];
        while let Some((index, depth)) = stack.pop() {
            match &self.nodes[index.0] {
                Node::Leaf { .. } => deepest = deepest.max(depth),
                Node::Split { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
            }
        }
        deepest
    }
}

/// Visits features in `order`, stopping after `max_features` of them once a
/// valid split has been found. Keeps looking past `max_features` while every
/// feature tried so far was constant on this node.
fn search_split(
    features: &FeatureMatrix,
    labels: &[Label],
    samples: &[usize],
    order: &[usize],
    max_features: usize,
    min_samples_leaf: usize,
) -> Option<Split> {
    let mut best: Option<Split> = None;
    for (visited, &feature) in order.iter().enumerate() {
        if visited >= max_features && best.is_some() {
            break;
        }
        let Some(candidate) =
            best_split_on_feature(features, labels, samples, feature, min_samples_leaf)
        else {
            continue;
        };
        if best.is_none_or(|b| candidate.impurity < b.impurity) {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn xor_like() -> (FeatureMatrix, Vec<Label>) {
        let features = FeatureMatrix::from_rows(
            2,
            &[[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]],
        )
        .unwrap();
        let labels = vec![
            Label::Flagged,
            Label::Approved,
            Label::Approved,
            Label::Flagged,
        ];
        (features, labels)
    }

    #[test]
    fn fully_grown_tree_fits_training_rows() {
        let (features, labels) = xor_like();
        let config = ForestConfig::default().with_max_features(crate::MaxFeatures::All);
        let mut rng = StdRng::seed_from_u64(7);
        let tree = DecisionTree::fit(&features, &labels, vec![0, 1, 2, 3], &config, &mut rng);

        for (idx, label) in labels.iter().enumerate() {
            assert_eq!(tree.predict_row(features.row(idx)), *label);
        }
        assert_eq!(tree.leaf_count(), 4);
        assert_eq!(tree.depth(), 2);
    }

    #[test]
    fn pure_sample_is_a_single_leaf() {
        let features = FeatureMatrix::from_rows(1, &[[1.0], [2.0], [3.0]]).unwrap();
        let labels = vec![Label::Approved; 3];
        let mut rng = StdRng::seed_from_u64(1);
        let tree = DecisionTree::fit(
            &features,
            &labels,
            vec![0, 1, 2],
            &ForestConfig::default(),
            &mut rng,
        );

        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.predict_row(&[100.0]), Label::Approved);
    }

    #[test]
    fn depth_cap_stops_growth() {
        let (features, labels) = xor_like();
        let config = ForestConfig::default()
            .with_max_features(crate::MaxFeatures::All)
            .with_max_depth(Some(1));
        let mut rng = StdRng::seed_from_u64(7);
        let tree = DecisionTree::fit(&features, &labels, vec![0, 1, 2, 3], &config, &mut rng);

        assert!(tree.depth() <= 1);
    }

    #[test]
    fn constant_features_leave_a_mixed_leaf() {
        let features = FeatureMatrix::from_rows(1, &[[4.0], [4.0], [4.0]]).unwrap();
        let labels = vec![Label::Approved, Label::Approved, Label::Flagged];
        let mut rng = StdRng::seed_from_u64(3);
        let tree = DecisionTree::fit(
            &features,
            &labels,
            vec![0, 1, 2],
            &ForestConfig::default(),
            &mut rng,
        );

        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(tree.nodes()[0].leaf_label(), Some(Label::Approved));
    }
}
