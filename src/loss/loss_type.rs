use serde::{Serialize, Deserialize};

use super::{BceLoss, CrossEntropyLoss, HuberLoss, LossFunction, MaeLoss, MseLoss};

/// Serializable selector for the built-in losses.
///
/// - `Mse`                — pair with Identity or Sigmoid output.
/// - `CrossEntropy`       — pair with Softmax output.
/// - `BinaryCrossEntropy` — pair with Sigmoid output.
/// - `Mae`, `Huber`       — pair with Identity output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    #[default]
    Mse,
    CrossEntropy,
    BinaryCrossEntropy,
    Mae,
    Huber,
}

impl LossFunction for LossType {
    fn value(&self, pred: &[f64], target: &[f64]) -> f64 {
        match self {
            LossType::Mse                => MseLoss.value(pred, target),
            LossType::CrossEntropy       => CrossEntropyLoss.value(pred, target),
            LossType::BinaryCrossEntropy => BceLoss.value(pred, target),
            LossType::Mae                => MaeLoss.value(pred, target),
            LossType::Huber              => HuberLoss.value(pred, target),
        }
    }

    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64> {
        match self {
            LossType::Mse                => MseLoss.gradient(pred, target),
            LossType::CrossEntropy       => CrossEntropyLoss.gradient(pred, target),
            LossType::BinaryCrossEntropy => BceLoss.gradient(pred, target),
            LossType::Mae                => MaeLoss.gradient(pred, target),
            LossType::Huber              => HuberLoss.gradient(pred, target),
        }
    }
}
