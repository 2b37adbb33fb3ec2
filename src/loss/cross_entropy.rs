use super::LossFunction;

/// Categorical cross-entropy, meant for a Softmax output layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CrossEntropyLoss;

/// Keeps log() and the division away from zero.
const EPS: f64 = 1e-12;

impl LossFunction for CrossEntropyLoss {
    /// -Σ t_i · log(p_i + ε)
    fn value(&self, pred: &[f64], target: &[f64]) -> f64 {
        pred.iter().zip(target.iter())
            .map(|(p, t)| -t * (p + EPS).ln())
            .sum()
    }

    /// Gradient w.r.t. the probabilities: -t_i / (p_i + ε).
    ///
    /// The softmax layer's Jacobian turns this into `p - t` w.r.t. the logits
    /// for one-hot targets.
    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64> {
        pred.iter().zip(target.iter())
            .map(|(p, t)| -t / (p + EPS))
            .collect()
    }
}
