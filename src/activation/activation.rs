use serde::{Serialize, Deserialize};
use std::f64::consts::E;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActivationFunction {
    Identity,
    ReLU,
    LeakyReLU { alpha: f64 },
    Sigmoid,
    Tanh,
    /// Vector-valued: normalises the whole pre-activation row into a
    /// probability distribution.
    Softmax,
}

impl ActivationFunction {
    /// Applies the activation to a full pre-activation vector `z`.
    pub fn apply(&self, z: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => softmax(z),
            _ => z.iter().map(|&x| self.function(x)).collect(),
        }
    }

    /// Maps `dL/da` back to `dL/dz` given the forward values `z` and `a`.
    ///
    /// Element-wise activations multiply by their derivative. Softmax uses the
    /// Jacobian-vector product `a ⊙ (g − g·a)`, so any loss gradient can sit
    /// on top of it.
    pub fn backward(&self, z: &[f64], a: &[f64], upstream: &[f64]) -> Vec<f64> {
        match self {
            ActivationFunction::Softmax => {
                let dot: f64 = upstream.iter().zip(a.iter()).map(|(g, s)| g * s).sum();
                a.iter().zip(upstream.iter()).map(|(s, g)| s * (g - dot)).collect()
            }
            _ => z
                .iter()
                .zip(upstream.iter())
                .map(|(&x, g)| g * self.derivative(x))
                .collect(),
        }
    }

    /// Element-wise activation. Softmax has no scalar form; it falls back to
    /// identity here and is handled by `apply`.
    fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity | ActivationFunction::Softmax => x,
            ActivationFunction::ReLU => if x > 0.0 { x } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { x } else { alpha * x },
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity | ActivationFunction::Softmax => 1.0,
            ActivationFunction::ReLU => if x > 0.0 { 1.0 } else { 0.0 },
            ActivationFunction::LeakyReLU { alpha } => if x > 0.0 { 1.0 } else { *alpha },
            ActivationFunction::Sigmoid => {
                let fx = self.function(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }

    /// Whether He initialization suits this activation better than Xavier.
    pub fn prefers_he_init(&self) -> bool {
        matches!(self, ActivationFunction::ReLU | ActivationFunction::LeakyReLU { .. })
    }
}

/// Numerically stable softmax (max-shifted).
fn softmax(z: &[f64]) -> Vec<f64> {
    let max = z.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let exps: Vec<f64> = z.iter().map(|x| (x - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
