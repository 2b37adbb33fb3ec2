use std::fmt::Display;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Bad construction arguments: too few layers, a zero width, or layers
    /// that do not chain.
    #[error("invalid topology: {0}")]
    InvalidTopology(String),

    /// A vector or dataset does not have the shape the network expects, or
    /// a training argument (such as the learning rate) is out of range.
    #[error("dimension mismatch in {context}: expected {expected}, got {got}")]
    DimensionMismatch {
        context: &'static str,
        expected: String,
        got: String,
    },

    /// The training loss or a parameter became NaN or infinite.
    #[error("numeric instability at epoch {epoch}: loss = {loss}")]
    NumericInstability { epoch: usize, loss: f64 },

    #[error("invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),

    #[error("csv: {0}")]
    Csv(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn mismatch(context: &'static str, expected: impl Display, got: impl Display) -> Error {
        Error::DimensionMismatch {
            context,
            expected: expected.to_string(),
            got: got.to_string(),
        }
    }
}
