//! Best-split search using Gini impurity.

use refund_model::{FeatureMatrix, Label, LabelCounts};

/// A candidate split of a node's samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub feature: usize,
    pub threshold: f64,
    /// Weighted Gini impurity of the two children.
    pub impurity: f64,
}

/// Finds the best threshold on `feature` for `samples`.
///
/// Thresholds sit halfway between consecutive distinct values. Both children
/// must keep at least `min_samples_leaf` samples. Returns `None` when the
/// feature is constant over `samples` or no threshold satisfies the leaf size.
pub(crate) fn best_split_on_feature(
    features: &FeatureMatrix,
    labels: &[Label],
    samples: &[usize],
    feature: usize,
    min_samples_leaf: usize,
) -> Option<Split> {
    let n = samples.len();
    if n < 2 * min_samples_leaf {
        return None;
    }

    let mut sorted: Vec<(f64, Label)> = samples
        .iter()
        .map(|&idx| (features.get(idx, feature), labels[idx]))
        .collect();
    sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

    let total = LabelCounts::from_labels(sorted.iter().map(|(_, label)| label));
    let mut left = LabelCounts::default();
    let mut best: Option<Split> = None;

    for pos in 0..n - 1 {
        let (value, label) = sorted[pos];
        left.add(label, 1);
        let next = sorted[pos + 1].0;
        if next <= value {
            continue;
        }
        let n_left = pos + 1;
        let n_right = n - n_left;
        if n_left < min_samples_leaf || n_right < min_samples_leaf {
            continue;
        }
        let right = LabelCounts {
            flagged: total.flagged - left.flagged,
            approved: total.approved - left.approved,
        };
        let impurity = (n_left as f64 * left.gini() + n_right as f64 * right.gini()) / n as f64;
        if best.is_none_or(|b| impurity < b.impurity) {
            best = Some(Split {
                feature,
                threshold: midpoint(value, next),
                impurity,
            });
        }
    }
    best
}

/// Midpoint of `lo < hi` that stays strictly below `hi`.
fn midpoint(lo: f64, hi: f64) -> f64 {
    let mid = lo + (hi - lo) / 2.0;
    if mid >= hi || !mid.is_finite() { lo } else { mid }
}
