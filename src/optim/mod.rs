pub mod sgd;
pub mod momentum;

pub use sgd::Sgd;
pub use momentum::Momentum;

use crate::{layers::Layer, math::Matrix};

/// A parameter-update rule applied once per layer per batch.
///
/// `index` identifies the layer so stateful rules can keep per-layer buffers.
pub trait Optimizer {
    fn step(&mut self, index: usize, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix);
}
