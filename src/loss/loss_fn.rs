/// A differentiable loss over one sample.
///
/// `gradient` returns `dL/dpred` with the same length as `pred`; the network
/// composes it with each layer's activation backward step.
pub trait LossFunction: Send + Sync {
    fn value(&self, pred: &[f64], target: &[f64]) -> f64;
    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64>;
}
