// Three-class softmax classifier assembled with the layer builder, trained
// with mini-batch momentum SGD on synthetic blobs and scored on a held-out
// split. Run with RUST_LOG=info to see training progress.
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use ferrite_ffn::{
    train_test_split, ActivationFunction, ClassifierTrainer, FittedModel, LossType,
    MlpClassifier, NetworkBuilder, OptimizerKind, Result, TrainConfig,
};

fn blobs(n: usize, rng: &mut StdRng) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let centers = [(0.0, 0.0), (3.0, 0.0), (0.0, 3.0)];
    let mut inputs = Vec::with_capacity(n);
    let mut targets = Vec::with_capacity(n);
    for i in 0..n {
        let class = i % centers.len();
        let (cx, cy) = centers[class];
        inputs.push(vec![cx + rng.gen_range(-0.8..0.8), cy + rng.gen_range(-0.8..0.8)]);
        let mut one_hot = vec![0.0; centers.len()];
        one_hot[class] = 1.0;
        targets.push(one_hot);
    }
    (inputs, targets)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(42);
    let (inputs, targets) = blobs(300, &mut rng);
    let split = train_test_split(&inputs, &targets, 0.2, &mut rng)?;

    let spec = NetworkBuilder::new(2)
        .dense(32, ActivationFunction::ReLU)
        .dropout(0.2)
        .dense(16, ActivationFunction::ReLU)
        .dense(3, ActivationFunction::Softmax)
        .loss(LossType::CrossEntropy)
        .into_spec("blobs")?;

    let config = TrainConfig::new(200, 0.05)
        .with_batch_size(16)
        .with_optimizer(OptimizerKind::Momentum { momentum: 0.9 })
        .with_seed(7);

    let model = MlpClassifier::new(spec, config).fit(&split.train_inputs, &split.train_targets)?;
    let accuracy = model.score(&split.test_inputs, &split.test_targets)?;
    println!("Model accuracy: {accuracy:.4}");
    Ok(())
}
