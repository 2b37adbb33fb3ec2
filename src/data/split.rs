use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::Dataset;
use crate::error::{Error, Result};

/// Owned train/test partition produced by `train_test_split`.
#[derive(Debug, Clone, Default)]
pub struct Split {
    pub train_inputs: Vec<Vec<f64>>,
    pub train_targets: Vec<Vec<f64>>,
    pub test_inputs: Vec<Vec<f64>>,
    pub test_targets: Vec<Vec<f64>>,
}

impl Split {
    pub fn train(&self) -> Dataset<'_> {
        Dataset::aligned(&self.train_inputs, &self.train_targets)
    }

    pub fn test(&self) -> Dataset<'_> {
        Dataset::aligned(&self.test_inputs, &self.test_targets)
    }
}

/// Shuffles the samples and moves `test_fraction` of them into the test set.
///
/// The test set gets `round(n * test_fraction)` samples, clamped so that both
/// sides keep at least one.
///
/// # Errors
/// - `DimensionMismatch` if the lengths differ or there are fewer than 2 samples
/// - `InvalidHyperparameter` if `test_fraction` is not strictly inside (0, 1)
pub fn train_test_split<R: Rng + ?Sized>(
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    test_fraction: f64,
    rng: &mut R,
) -> Result<Split> {
    let data = Dataset::new(inputs, targets)?;
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(Error::InvalidHyperparameter(format!(
            "test fraction must lie in (0, 1), got {test_fraction}"
        )));
    }
    let n = data.len();
    if n < 2 {
        return Err(Error::mismatch("samples to split", 2, n));
    }

    let n_test = ((n as f64 * test_fraction).round() as usize).clamp(1, n - 1);

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    let (test_idx, train_idx) = indices.split_at(n_test);

    let take = |idx: &[usize], rows: &[Vec<f64>]| -> Vec<Vec<f64>> {
        idx.iter().map(|&i| rows[i].clone()).collect()
    };

    Ok(Split {
        train_inputs: take(train_idx, inputs),
        train_targets: take(train_idx, targets),
        test_inputs: take(test_idx, inputs),
        test_targets: take(test_idx, targets),
    })
}
