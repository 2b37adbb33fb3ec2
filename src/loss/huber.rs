use super::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct HuberLoss;

// Fixed δ keeps `LossType::Huber` a unit variant.
const DELTA: f64 = 1.0;

impl LossFunction for HuberLoss {
    /// mean(h(pred − target)) where
    /// h(x) = 0.5·x²  if |x| ≤ δ,  δ·(|x| − 0.5·δ)  otherwise
    fn value(&self, pred: &[f64], target: &[f64]) -> f64 {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| {
                let x = p - t;
                if x.abs() <= DELTA {
                    0.5 * x * x
                } else {
                    DELTA * (x.abs() - 0.5 * DELTA)
                }
            })
            .sum::<f64>() / n
    }

    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64> {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| {
                let x = p - t;
                let g = if x.abs() <= DELTA { x } else { DELTA * x.signum() };
                g / n
            })
            .collect()
    }
}
