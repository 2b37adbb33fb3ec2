use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::optim::{Momentum, Optimizer, Sgd};
use crate::train::epoch_stats::EpochStats;

/// Which parameter-update rule the training loop builds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OptimizerKind {
    #[default]
    Sgd,
    Momentum { momentum: f64 },
}

impl OptimizerKind {
    /// Builds a fresh optimizer; stateful rules start from zero velocity.
    pub fn build(&self, learning_rate: f64) -> Box<dyn Optimizer> {
        match *self {
            OptimizerKind::Sgd => Box::new(Sgd::new(learning_rate)),
            OptimizerKind::Momentum { momentum } => Box::new(Momentum::new(learning_rate, momentum)),
        }
    }
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`        — full passes over the training data; `0` is a no-op
/// - `learning_rate` — step size, finite and `> 0`
/// - `batch_size`    — samples per mini-batch; `None` trains full-batch
/// - `optimizer`     — update rule
/// - `seed`          — seeds shuffling and dropout masks for reproducible runs
/// - `progress_tx`   — optional channel; one `EpochStats` is sent per
///                     completed epoch. If the receiver is dropped the loop
///                     stops after the current epoch.
/// - `stop_flag`     — optional atomic flag checked at each epoch boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    #[serde(default)]
    pub batch_size: Option<usize>,
    #[serde(default)]
    pub optimizer: OptimizerKind,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    #[serde(skip)]
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Full-batch SGD with no progress channel and no stop flag.
    pub fn new(epochs: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            learning_rate,
            batch_size: None,
            optimizer: OptimizerKind::Sgd,
            seed: None,
            progress_tx: None,
            stop_flag: None,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_optimizer(mut self, optimizer: OptimizerKind) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(Error::mismatch("learning rate", "a finite value > 0", self.learning_rate));
        }
        if self.batch_size == Some(0) {
            return Err(Error::InvalidHyperparameter("batch size must be at least 1".into()));
        }
        if let OptimizerKind::Momentum { momentum } = self.optimizer {
            if !(0.0..1.0).contains(&momentum) {
                return Err(Error::InvalidHyperparameter(format!(
                    "momentum must lie in [0, 1), got {momentum}"
                )));
            }
        }
        Ok(())
    }
}
