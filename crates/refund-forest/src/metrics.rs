//! Held-out scoring.

use serde::{Deserialize, Serialize};

use refund_model::Label;

use crate::error::{ForestError, Result};

fn check_lengths(truth: &[Label], predicted: &[Label]) -> Result<()> {
    if truth.len() != predicted.len() {
        return Err(ForestError::LengthMismatch {
            features: predicted.len(),
            labels: truth.len(),
        });
    }
    if truth.is_empty() {
        return Err(ForestError::EmptyEvaluation);
    }
    Ok(())
}

/// Fraction of positions where `predicted` equals `truth`.
pub fn accuracy_score(truth: &[Label], predicted: &[Label]) -> Result<f64> {
    check_lengths(truth, predicted)?;
    let correct = truth
        .iter()
        .zip(predicted)
        .filter(|(expected, actual)| expected == actual)
        .count();
    Ok(correct as f64 / truth.len() as f64)
}

/// Counts of predicted vs. actual labels, with `Approved` as the positive class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub true_approved: usize,
    pub false_approved: usize,
    pub true_flagged: usize,
    pub false_flagged: usize,
}

impl ConfusionMatrix {
    pub fn from_predictions(truth: &[Label], predicted: &[Label]) -> Result<Self> {
        check_lengths(truth, predicted)?;
        let mut matrix = Self::default();
        for (expected, actual) in truth.iter().zip(predicted) {
            match (expected, actual) {
                (Label::Approved, Label::Approved) => matrix.true_approved += 1,
                (Label::Flagged, Label::Approved) => matrix.false_approved += 1,
                (Label::Flagged, Label::Flagged) => matrix.true_flagged += 1,
                (Label::Approved, Label::Flagged) => matrix.false_flagged += 1,
            }
        }
        Ok(matrix)
    }

    pub fn total(&self) -> usize {
        self.true_approved + self.false_approved + self.true_flagged + self.false_flagged
    }

    pub fn correct(&self) -> usize {
        self.true_approved + self.true_flagged
    }

    pub fn accuracy(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct() as f64 / self.total() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use refund_model::Label::{Approved, Flagged};

    #[test]
    fn accuracy_counts_matches() {
        let truth = [Approved, Flagged, Approved, Flagged];
        let predicted = [Approved, Approved, Approved, Flagged];
        assert!((accuracy_score(&truth, &predicted).unwrap() - 0.75).abs() < 1e-12);
    }

    #[test]
    fn accuracy_rejects_bad_input() {
        assert_eq!(
            accuracy_score(&[], &[]).unwrap_err(),
            ForestError::EmptyEvaluation
        );
        assert!(matches!(
            accuracy_score(&[Approved], &[Approved, Flagged]),
            Err(ForestError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn confusion_matrix_agrees_with_accuracy() {
        let truth = [Approved, Flagged, Approved, Flagged, Flagged];
        let predicted = [Approved, Approved, Flagged, Flagged, Flagged];
        let matrix = ConfusionMatrix::from_predictions(&truth, &predicted).unwrap();

        assert_eq!(
            matrix,
            ConfusionMatrix {
                true_approved: 1,
                false_approved: 1,
                true_flagged: 2,
                false_flagged: 1,
            }
        );
        assert_eq!(
            matrix.accuracy(),
            accuracy_score(&truth, &predicted).unwrap()
        );
    }
}
