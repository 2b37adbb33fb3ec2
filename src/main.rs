use anyhow::{Context, Result};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use ferrite_ffn::data::load_csv;
use ferrite_ffn::{train_test_split, ClassifierTrainer, FittedModel, MlpClassifier, RunConfig};

// Loads a run config, holds out a test split, fits and reports accuracy.
//   RUST_LOG=debug ferrite-ffn run.json
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .context("usage: ferrite-ffn <run-config.json>")?;
    let run = RunConfig::load_json(&path).with_context(|| format!("loading run config {path}"))?;

    let (inputs, targets) = load_csv(&run.data.path, run.data.label_mode)
        .with_context(|| format!("reading {}", run.data.path.display()))?;
    info!("loaded {} samples from {}", inputs.len(), run.data.path.display());

    let mut rng = match run.split_seed() {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let split = train_test_split(&inputs, &targets, run.test_fraction, &mut rng)?;

    let trainer = MlpClassifier::new(run.network, run.training);
    let model = trainer
        .fit(&split.train_inputs, &split.train_targets)
        .context("training failed")?;
    let accuracy = model.score(&split.test_inputs, &split.test_targets)?;

    info!("model accuracy: {accuracy:.4}");
    Ok(())
}
