use rand::Rng;

use crate::activation::ActivationFunction;
use crate::error::{Error, Result};
use crate::loss::LossType;
use crate::network::network::Network;
use crate::network::spec::{LayerSpec, NetworkSpec};

/// Declarative layer-stack builder.
///
/// ```
/// use ferrite_ffn::{ActivationFunction, NetworkBuilder};
///
/// let net = NetworkBuilder::new(784)
///     .dense(128, ActivationFunction::ReLU)
///     .dropout(0.2)
///     .dense(64, ActivationFunction::ReLU)
///     .dense(10, ActivationFunction::Softmax)
///     .build()
///     .unwrap();
/// assert_eq!(net.widths(), vec![784, 128, 64, 10]);
/// ```
///
/// `dropout` applies to the most recently added dense layer. Errors are
/// deferred until `build`/`into_spec`.
#[derive(Debug, Clone)]
pub struct NetworkBuilder {
    input_dim: usize,
    layers: Vec<LayerSpec>,
    loss: LossType,
    error: Option<String>,
}

impl NetworkBuilder {
    pub fn new(input_dim: usize) -> NetworkBuilder {
        NetworkBuilder { input_dim, layers: Vec::new(), loss: LossType::Mse, error: None }
    }

    pub fn dense(mut self, width: usize, activation: ActivationFunction) -> NetworkBuilder {
        let input_size = self.layers.last().map(|l| l.size).unwrap_or(self.input_dim);
        self.layers.push(LayerSpec { size: width, input_size, activation, dropout: 0.0 });
        self
    }

    pub fn dropout(mut self, rate: f64) -> NetworkBuilder {
        match self.layers.last_mut() {
            Some(layer) => layer.dropout = rate,
            None => self.fail("dropout must follow a dense layer".into()),
        }
        self
    }

    pub fn loss(mut self, loss: LossType) -> NetworkBuilder {
        self.loss = loss;
        self
    }

    fn fail(&mut self, msg: String) {
        self.error.get_or_insert(msg);
    }

    pub fn into_spec(self, name: &str) -> Result<NetworkSpec> {
        if let Some(msg) = self.error {
            return Err(Error::InvalidTopology(msg));
        }
        Ok(NetworkSpec { name: name.to_string(), layers: self.layers, loss: self.loss })
    }

    pub fn build(self) -> Result<Network> {
        self.build_with_rng(&mut rand::thread_rng())
    }

    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Network> {
        self.into_spec("network")?.build_with_rng(rng)
    }
}
