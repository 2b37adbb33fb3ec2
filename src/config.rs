use std::path::PathBuf;

use serde::{Serialize, Deserialize};

use crate::data::LabelMode;
use crate::error::Result;
use crate::network::NetworkSpec;
use crate::train::TrainConfig;

/// Where the binary reads its samples from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub path: PathBuf,
    pub label_mode: LabelMode,
}

/// Everything one `ferrite-ffn` run needs, loaded from a single JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub network: NetworkSpec,
    pub training: TrainConfig,
    pub data: DataConfig,
    /// Share of samples held out for scoring.
    #[serde(default = "default_test_fraction")]
    pub test_fraction: f64,
    /// Seeds the train/test split; falls back to `training.seed` when unset.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_test_fraction() -> f64 {
    0.2
}

impl RunConfig {
    pub fn split_seed(&self) -> Option<u64> {
        self.seed.or(self.training.seed)
    }

    pub fn load_json(path: &str) -> Result<RunConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_run_config() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{
                "network": {
                    "name": "blobs",
                    "layers": [
                        { "size": 4, "input_size": 2, "activation": "Tanh" },
                        { "size": 2, "input_size": 4, "activation": "Softmax" }
                    ],
                    "loss": "cross_entropy"
                },
                "training": { "epochs": 100, "learning_rate": 0.1, "batch_size": 8, "seed": 3 },
                "data": { "path": "blobs.csv", "label_mode": { "type": "class_index", "n_classes": 2 } }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.test_fraction, 0.2);
        assert_eq!(cfg.training.batch_size, Some(8));
        assert_eq!(cfg.data.label_mode, LabelMode::ClassIndex { n_classes: 2 });
        assert_eq!(cfg.seed, None);
        assert_eq!(cfg.split_seed(), Some(3));
    }

    #[test]
    fn top_level_seed_overrides_training_seed_for_the_split() {
        let cfg: RunConfig = serde_json::from_str(
            r#"{
                "network": {
                    "name": "line",
                    "layers": [ { "size": 1, "input_size": 1, "activation": "Identity" } ]
                },
                "training": { "epochs": 10, "learning_rate": 0.01, "seed": 3 },
                "data": { "path": "line.csv", "label_mode": { "type": "columns", "n_label_cols": 1 } },
                "test_fraction": 0.5,
                "seed": 42
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.split_seed(), Some(42));
        assert_eq!(cfg.training.seed, Some(3));
    }
}
