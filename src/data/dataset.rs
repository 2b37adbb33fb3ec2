use crate::error::{Error, Result};

/// Borrowed view over aligned input and target rows.
///
/// The network never owns training data; it borrows a `Dataset` per call.
#[derive(Debug, Clone, Copy)]
pub struct Dataset<'a> {
    inputs: &'a [Vec<f64>],
    targets: &'a [Vec<f64>],
}

impl<'a> Dataset<'a> {
    /// Fails with `DimensionMismatch` if the two sequences differ in length.
    pub fn new(inputs: &'a [Vec<f64>], targets: &'a [Vec<f64>]) -> Result<Dataset<'a>> {
        if inputs.len() != targets.len() {
            return Err(Error::mismatch("targets per input", inputs.len(), targets.len()));
        }
        Ok(Dataset { inputs, targets })
    }

    /// For callers that build both sides together.
    pub(crate) fn aligned(inputs: &'a [Vec<f64>], targets: &'a [Vec<f64>]) -> Dataset<'a> {
        debug_assert_eq!(inputs.len(), targets.len());
        Dataset { inputs, targets }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn inputs(&self) -> &'a [Vec<f64>] {
        self.inputs
    }

    pub fn targets(&self) -> &'a [Vec<f64>] {
        self.targets
    }

    pub fn input(&self, idx: usize) -> &'a [f64] {
        &self.inputs[idx]
    }

    pub fn target(&self, idx: usize) -> &'a [f64] {
        &self.targets[idx]
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a [f64], &'a [f64])> + 'a {
        self.inputs
            .iter()
            .zip(self.targets.iter())
            .map(|(x, y)| (x.as_slice(), y.as_slice()))
    }
}
