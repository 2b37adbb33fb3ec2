pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use epoch_stats::{EpochStats, TrainingHistory};
pub use train_config::{OptimizerKind, TrainConfig};
pub use loop_fn::train_loop;
