use super::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct MaeLoss;

impl LossFunction for MaeLoss {
    /// mean(|pred - target|)
    fn value(&self, pred: &[f64], target: &[f64]) -> f64 {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| (p - t).abs())
            .sum::<f64>() / n
    }

    /// Subgradient sign(pred - target) / n, 0 when equal.
    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64> {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| {
                let diff = p - t;
                if diff > 0.0 { 1.0 / n } else if diff < 0.0 { -1.0 / n } else { 0.0 }
            })
            .collect()
    }
}
