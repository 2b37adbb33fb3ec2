use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::data::Dataset;
use crate::error::Result;
use crate::network::{Network, NetworkSpec};
use crate::train::TrainConfig;

/// A trained model that can be scored on labelled data.
pub trait FittedModel {
    /// Fraction of correctly classified samples, in [0, 1].
    fn score(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64>;
}

/// Something that turns a labelled table into a `FittedModel`.
pub trait ClassifierTrainer {
    type Model: FittedModel;

    fn fit(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Self::Model>;
}

/// Multi-layer perceptron classifier: builds a fresh network from `spec`
/// on every `fit` and trains it with `config`.
#[derive(Debug, Clone)]
pub struct MlpClassifier {
    pub spec: NetworkSpec,
    pub config: TrainConfig,
}

impl MlpClassifier {
    pub fn new(spec: NetworkSpec, config: TrainConfig) -> MlpClassifier {
        MlpClassifier { spec, config }
    }
}

impl ClassifierTrainer for MlpClassifier {
    type Model = Network;

    fn fit(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<Network> {
        let data = Dataset::new(inputs, targets)?;
        let mut network = match self.config.seed {
            Some(seed) => self.spec.build_with_rng(&mut StdRng::seed_from_u64(seed))?,
            None => self.spec.build()?,
        };
        let history = network.train_with(data, None, &self.config)?;
        info!(
            "fitted '{}' on {} samples, final loss = {:?}",
            self.spec.name,
            data.len(),
            history.last_loss()
        );
        Ok(network)
    }
}

impl FittedModel for Network {
    fn score(&self, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
        accuracy(self, &Dataset::new(inputs, targets)?)
    }
}

/// Fraction of samples whose predicted class matches the target class.
///
/// With several outputs the class is the argmax; a single output is read as
/// a binary probability and thresholded at 0.5. An empty dataset scores 0.
pub fn accuracy(network: &Network, data: &Dataset<'_>) -> Result<f64> {
    network.check_dataset(data)?;
    if data.is_empty() {
        return Ok(0.0);
    }
    let mut correct = 0usize;
    for (x, y) in data.iter() {
        let output = network.forward(x)?;
        if predicted_class(&output) == predicted_class(y) {
            correct += 1;
        }
    }
    Ok(correct as f64 / data.len() as f64)
}

fn predicted_class(v: &[f64]) -> usize {
    if v.len() == 1 {
        return usize::from(v[0] >= 0.5);
    }
    argmax(v)
}

/// Index of the maximum element in a slice.
fn argmax(v: &[f64]) -> usize {
    v.iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0)
}
