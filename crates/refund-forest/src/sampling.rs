//! Seeded train/test split.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{ForestError, Result};

/// Fraction of rows held out when none is configured.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Row indices of the training and held-out partitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

/// Shuffles `0..n_rows` with `seed` and holds out `ceil(test_fraction * n_rows)` rows.
///
/// The held-out rows are the first ones of the shuffled order, the training
/// rows the remainder. Fails when `test_fraction` is outside `(0, 1)` or when
/// either partition would be empty.
pub fn train_test_split(n_rows: usize, test_fraction: f64, seed: u64) -> Result<SplitIndices> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(ForestError::InvalidSplit(format!(
            "test fraction must be between 0 and 1, got {test_fraction}"
        )));
    }
    let n_test = (test_fraction * n_rows as f64).ceil() as usize;
    let n_train = n_rows.saturating_sub(n_test);
    if n_test == 0 || n_train == 0 {
        return Err(ForestError::InvalidSplit(format!(
            "{n_rows} rows with test fraction {test_fraction} leaves {n_train} training and {n_test} held-out rows"
        )));
    }

    let mut order: Vec<usize> = (0..n_rows).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    let train = order.split_off(n_test);
    Ok(SplitIndices { train, test: order })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hundred_rows_split_eighty_twenty() {
        let split = train_test_split(100, 0.2, 42).unwrap();
        assert_eq!(split.train.len(), 80);
        assert_eq!(split.test.len(), 20);
    }

    #[test]
    fn held_out_count_rounds_up() {
        let split = train_test_split(11, 0.2, 42).unwrap();
        assert_eq!(split.test.len(), 3);
        assert_eq!(split.train.len(), 8);
    }

    #[test]
    fn same_seed_same_split() {
        assert_eq!(
            train_test_split(50, 0.2, 7).unwrap(),
            train_test_split(50, 0.2, 7).unwrap()
        );
    }

    #[test]
    fn rejects_degenerate_splits() {
        assert!(train_test_split(1, 0.2, 42).is_err());
        assert!(train_test_split(0, 0.2, 42).is_err());
        assert!(train_test_split(10, 0.0, 42).is_err());
        assert!(train_test_split(10, 1.0, 42).is_err());
        assert!(train_test_split(10, f64::NAN, 42).is_err());
    }
}
