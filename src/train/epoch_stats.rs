use serde::{Serialize, Deserialize};

/// Per-epoch statistics recorded by the training loop.
///
/// When a `progress_tx` channel is configured in `TrainConfig` one
/// `EpochStats` is also sent at the end of every completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean training loss over all samples, measured before each batch's update.
    pub loss: f64,
    /// Mean validation loss after the epoch, if a validation set was provided.
    pub val_loss: Option<f64>,
    /// Wall-clock duration of this epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Ordered record of one `train` call. Not kept on the network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingHistory {
    pub epochs: Vec<EpochStats>,
    /// Set when a stop flag or a dropped progress receiver ended training
    /// before all requested epochs ran.
    pub stopped_early: bool,
}

impl TrainingHistory {
    pub fn len(&self) -> usize {
        self.epochs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.epochs.is_empty()
    }

    pub fn losses(&self) -> Vec<f64> {
        self.epochs.iter().map(|s| s.loss).collect()
    }

    pub fn first_loss(&self) -> Option<f64> {
        self.epochs.first().map(|s| s.loss)
    }

    pub fn last_loss(&self) -> Option<f64> {
        self.epochs.last().map(|s| s.loss)
    }
}
