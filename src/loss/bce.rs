use super::LossFunction;

#[derive(Debug, Clone, Copy, Default)]
pub struct BceLoss;

const EPS: f64 = 1e-12;

impl LossFunction for BceLoss {
    /// -mean(t·log(p+ε) + (1-t)·log(1-p+ε))
    fn value(&self, pred: &[f64], target: &[f64]) -> f64 {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| -(t * (p + EPS).ln() + (1.0 - t) * (1.0 - p + EPS).ln()))
            .sum::<f64>() / n
    }

    fn gradient(&self, pred: &[f64], target: &[f64]) -> Vec<f64> {
        let n = pred.len() as f64;
        pred.iter().zip(target.iter())
            .map(|(p, t)| (-t / (p + EPS) + (1.0 - t) / (1.0 - p + EPS)) / n)
            .collect()
    }
}
