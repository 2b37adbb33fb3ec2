pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;
pub mod data;
pub mod classifier;
pub mod config;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::Matrix;
pub use activation::ActivationFunction;
pub use layers::Layer;
pub use network::{LayerSpec, Network, NetworkBuilder, NetworkSpec};
pub use loss::{LossFunction, LossType, MseLoss, CrossEntropyLoss};
pub use optim::{Momentum, Optimizer, Sgd};
pub use train::{EpochStats, OptimizerKind, TrainConfig, TrainingHistory};
pub use data::{train_test_split, Dataset, LabelMode};
pub use classifier::{ClassifierTrainer, FittedModel, MlpClassifier};
pub use config::RunConfig;
