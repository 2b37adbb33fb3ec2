use super::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct MseLoss;

impl LossFunction for MseLoss {
    /// mean((pred - target)²)
    fn value(&self, pred: &[f64], target: &[f64]) -> f64 {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| (p - t).powi(2))
            .sum::<f64>() / n
    }

    /// 2·(pred - target) / n
    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64> {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| 2.0 * (p - t) / n)
            .collect()
    }
}
