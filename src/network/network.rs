use rand::Rng;

use crate::activation::ActivationFunction;
use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::layers::dense::{Layer, LayerTrace};
use crate::loss::{LossFunction, MseLoss};
use crate::network::spec::LayerSpec;
use crate::train::{train_loop, TrainConfig, TrainingHistory};

/// An ordered stack of dense layers plus the loss used to train them.
///
/// `layers[i].size == layers[i + 1].input_size` holds for every adjacent
/// pair; it is checked on construction.
pub struct Network {
    pub layers: Vec<Layer>,
    loss: Box<dyn LossFunction>,
}

impl Network {
    /// Builds a network from layer widths, input width first.
    ///
    /// Hidden layers use ReLU and the output layer uses Identity. Needs at
    /// least two widths, all positive.
    pub fn new(widths: &[usize]) -> Result<Network> {
        Network::with_rng(widths, &mut rand::thread_rng())
    }

    /// Same as `new`, drawing initial weights from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(widths: &[usize], rng: &mut R) -> Result<Network> {
        Network::with_activations(
            widths,
            ActivationFunction::ReLU,
            ActivationFunction::Identity,
            rng,
        )
    }

    /// Builds a network from widths with one activation for hidden layers
    /// and another for the output layer.
    pub fn with_activations<R: Rng + ?Sized>(
        widths: &[usize],
        hidden: ActivationFunction,
        output: ActivationFunction,
        rng: &mut R,
    ) -> Result<Network> {
        if widths.len() < 2 {
            return Err(Error::InvalidTopology(format!(
                "need at least 2 layer widths, got {}",
                widths.len()
            )));
        }
        let last = widths.len() - 2;
        let specs = widths
            .windows(2)
            .enumerate()
            .map(|(i, pair)| LayerSpec {
                size: pair[1],
                input_size: pair[0],
                activation: if i == last { output } else { hidden },
                dropout: 0.0,
            })
            .collect();
        Network::from_specs(specs, rng)
    }

    /// Builds a network from explicit layer descriptions.
    pub fn from_specs<R: Rng + ?Sized>(specs: Vec<LayerSpec>, rng: &mut R) -> Result<Network> {
        validate_specs(&specs)?;
        let layers = specs
            .into_iter()
            .map(|spec| {
                let mut layer = Layer::new(spec.size, spec.input_size, spec.activation, rng);
                layer.dropout = spec.dropout;
                layer
            })
            .collect();
        Ok(Network { layers, loss: Box::new(MseLoss) })
    }

    pub fn input_size(&self) -> usize {
        self.layers[0].input_size
    }

    pub fn output_size(&self) -> usize {
        self.layers[self.layers.len() - 1].size
    }

    /// Layer widths, input width first.
    pub fn widths(&self) -> Vec<usize> {
        std::iter::once(self.input_size())
            .chain(self.layers.iter().map(|l| l.size))
            .collect()
    }

    pub fn loss(&self) -> &dyn LossFunction {
        self.loss.as_ref()
    }

    /// Replaces the loss used by `train` and `compute_loss`.
    pub fn set_loss<L: LossFunction + 'static>(&mut self, loss: L) {
        self.loss = Box::new(loss);
    }

    pub fn with_loss<L: LossFunction + 'static>(mut self, loss: L) -> Network {
        self.set_loss(loss);
        self
    }

    /// Inference pass. Dropout is never applied here.
    pub fn forward(&self, input: &[f64]) -> Result<Vec<f64>> {
        if input.len() != self.input_size() {
            return Err(Error::mismatch("input width", self.input_size(), input.len()));
        }
        let mut current = input.to_vec();
        for layer in &self.layers {
            current = layer.feed_from(&current);
        }
        Ok(current)
    }

    /// Runs `forward` over every row.
    pub fn predict(&self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        inputs.iter().map(|x| self.forward(x)).collect()
    }

    /// Mean per-sample loss of `predictions` against `targets` under the
    /// configured loss. An empty batch has loss 0.
    pub fn compute_loss(&self, predictions: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
        if predictions.len() != targets.len() {
            return Err(Error::mismatch("targets per prediction", predictions.len(), targets.len()));
        }
        if predictions.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (p, t) in predictions.iter().zip(targets.iter()) {
            if p.len() != t.len() {
                return Err(Error::mismatch("target width", p.len(), t.len()));
            }
            total += self.loss.value(p, t);
        }
        Ok(total / predictions.len() as f64)
    }

    /// Mean loss of the network's predictions over `data`.
    pub fn mean_loss(&self, data: &Dataset<'_>) -> Result<f64> {
        self.check_dataset(data)?;
        let predictions = self.predict(data.inputs())?;
        self.compute_loss(&predictions, data.targets())
    }

    /// Full-batch gradient descent for `epochs` epochs.
    ///
    /// Resumes from the current parameters; `epochs == 0` is a no-op.
    pub fn train(
        &mut self,
        inputs: &[Vec<f64>],
        targets: &[Vec<f64>],
        epochs: usize,
        learning_rate: f64,
    ) -> Result<TrainingHistory> {
        let data = Dataset::new(inputs, targets)?;
        train_loop(self, data, None, &TrainConfig::new(epochs, learning_rate))
    }

    /// Trains with an explicit configuration and optional validation set.
    pub fn train_with(
        &mut self,
        data: Dataset<'_>,
        validation: Option<Dataset<'_>>,
        config: &TrainConfig,
    ) -> Result<TrainingHistory> {
        train_loop(self, data, validation, config)
    }

    /// Checks every row of `data` against the input and output widths.
    pub fn check_dataset(&self, data: &Dataset<'_>) -> Result<()> {
        let (n_in, n_out) = (self.input_size(), self.output_size());
        for (x, y) in data.iter() {
            if x.len() != n_in {
                return Err(Error::mismatch("input width", n_in, x.len()));
            }
            if y.len() != n_out {
                return Err(Error::mismatch("target width", n_out, y.len()));
            }
        }
        Ok(())
    }

    /// Training-mode forward pass keeping per-layer values for backprop.
    pub(crate) fn forward_traced<R: Rng + ?Sized>(&self, input: &[f64], rng: &mut R) -> Vec<LayerTrace> {
        let mut traces: Vec<LayerTrace> = Vec::with_capacity(self.layers.len());
        for layer in &self.layers {
            let trace = match traces.last() {
                Some(prev) => layer.feed_traced(&prev.output, rng),
                None => layer.feed_traced(input, rng),
            };
            traces.push(trace);
        }
        traces
    }
}

fn validate_specs(specs: &[LayerSpec]) -> Result<()> {
    if specs.is_empty() {
        return Err(Error::InvalidTopology("network needs at least one layer".into()));
    }
    for (i, spec) in specs.iter().enumerate() {
        if spec.size == 0 || spec.input_size == 0 {
            return Err(Error::InvalidTopology(format!(
                "layer {i} has a zero width ({} -> {})",
                spec.input_size, spec.size
            )));
        }
        if !(0.0..1.0).contains(&spec.dropout) {
            return Err(Error::InvalidTopology(format!(
                "layer {i} dropout must lie in [0, 1), got {}",
                spec.dropout
            )));
        }
    }
    for (i, pair) in specs.windows(2).enumerate() {
        if pair[0].size != pair[1].input_size {
            return Err(Error::InvalidTopology(format!(
                "layer {} outputs {} values but layer {} expects {}",
                i,
                pair[0].size,
                i + 1,
                pair[1].input_size
            )));
        }
    }
    if specs[specs.len() - 1].dropout > 0.0 {
        return Err(Error::InvalidTopology("dropout is not allowed on the output layer".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Matrix;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn rejects_short_or_zero_width_topologies() {
        for widths in [&[][..], &[3][..], &[2, 0, 1][..], &[0, 1][..]] {
            assert!(
                matches!(Network::new(widths), Err(Error::InvalidTopology(_))),
                "{widths:?}"
            );
        }
    }

    #[test]
    fn rejects_layers_that_do_not_chain() {
        let specs = vec![
            LayerSpec { size: 3, input_size: 2, activation: ActivationFunction::ReLU, dropout: 0.0 },
            LayerSpec { size: 1, input_size: 4, activation: ActivationFunction::Identity, dropout: 0.0 },
        ];
        assert!(matches!(
            Network::from_specs(specs, &mut StdRng::seed_from_u64(0)),
            Err(Error::InvalidTopology(_))
        ));
    }

    #[test]
    fn default_activations_are_relu_then_identity() {
        let net = Network::new(&[2, 4, 4, 1]).unwrap();
        assert_eq!(net.widths(), vec![2, 4, 4, 1]);
        assert_eq!(net.layers[0].activator, ActivationFunction::ReLU);
        assert_eq!(net.layers[1].activator, ActivationFunction::ReLU);
        assert_eq!(net.layers[2].activator, ActivationFunction::Identity);
        assert!(net.layers.iter().all(|l| l.biases.data[0].iter().all(|&b| b == 0.0)));
    }

    #[test]
    fn two_by_three_forward_matches_hand_computation() {
        let mut net = Network::with_activations(
            &[2, 3],
            ActivationFunction::ReLU,
            ActivationFunction::ReLU,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        net.layers[0].weights = Matrix {
            rows: 2,
            cols: 3,
            data: vec![vec![1.0, -2.0, 0.5], vec![3.0, 1.0, -1.0]],
        };
        net.layers[0].biases = Matrix::row(vec![0.5, 1.0, -0.25]);

        // z = [1·1 + 2·3 + 0.5, 1·-2 + 2·1 + 1, 1·0.5 + 2·-1 - 0.25] = [7.5, 1, -1.75]
        assert_eq!(net.forward(&[1.0, 2.0]).unwrap(), vec![7.5, 1.0, 0.0]);
    }

    #[test]
    fn forward_rejects_wrong_input_width() {
        let net = Network::new(&[3, 2]).unwrap();
        assert!(matches!(
            net.forward(&[1.0, 2.0]),
            Err(Error::DimensionMismatch { ref expected, ref got, .. }) if expected == "3" && got == "2"
        ));
    }

    #[test]
    fn compute_loss_uses_configured_loss() {
        let net = Network::new(&[1, 1]).unwrap();
        let preds = vec![vec![1.0], vec![3.0]];
        let targets = vec![vec![0.0], vec![1.0]];
        assert_eq!(net.compute_loss(&preds, &targets).unwrap(), 2.5);

        let net = net.with_loss(crate::loss::MaeLoss);
        assert_eq!(net.compute_loss(&preds, &targets).unwrap(), 1.5);
        assert!(net.compute_loss(&preds, &targets[..1]).is_err());
    }
}
