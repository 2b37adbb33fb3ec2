use std::sync::atomic::AtomicBool;
use std::sync::{mpsc, Arc};

use ferrite_ffn::{
    ActivationFunction, CrossEntropyLoss, Dataset, Error, LossType, Matrix, Network,
    NetworkBuilder, OptimizerKind, TrainConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn doubling_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![vec![1.0], vec![2.0], vec![3.0]];
    let targets = vec![vec![2.0], vec![4.0], vec![6.0]];
    (inputs, targets)
}

fn linear_net(seed: u64) -> Network {
    Network::with_rng(&[1, 1], &mut StdRng::seed_from_u64(seed)).unwrap()
}

#[test]
fn single_linear_layer_learns_doubling() {
    let (x, y) = doubling_data();
    let mut net = linear_net(0);
    net.layers[0].weights = Matrix::zeros(1, 1);

    let history = net.train(&x, &y, 1000, 0.01).unwrap();
    assert_eq!(history.len(), 1000);

    let w = net.layers[0].weights.data[0][0];
    let b = net.layers[0].biases.data[0][0];
    assert!((w - 2.0).abs() < 0.05, "weight {w}");
    assert!(b.abs() < 0.1, "bias {b}");

    let final_loss = net.compute_loss(&net.predict(&x).unwrap(), &y).unwrap();
    assert!(final_loss < 0.01, "final loss {final_loss}");
}

#[test]
fn doubling_is_learned_from_random_initialization() {
    let (x, y) = doubling_data();
    let mut nets: Vec<Network> = (100..105).map(linear_net).collect();
    nets.push(Network::new(&[1, 1]).unwrap());

    for mut net in nets {
        let w0 = net.layers[0].weights.data[0][0];
        net.train(&x, &y, 1000, 0.01).unwrap();

        let w = net.layers[0].weights.data[0][0];
        let b = net.layers[0].biases.data[0][0];
        assert!((w - 2.0).abs() < 0.15, "start {w0}: weight {w}");
        assert!(b.abs() < 0.35, "start {w0}: bias {b}");
        let loss = net.compute_loss(&net.predict(&x).unwrap(), &y).unwrap();
        assert!(loss < 0.01, "start {w0}: loss {loss}");
    }
}

#[test]
fn loss_drops_below_one_percent_of_initial() {
    let (x, y) = doubling_data();
    let mut net = linear_net(21);

    let history = net.train(&x, &y, 500, 0.01).unwrap();
    let first = history.first_loss().unwrap();
    let last = history.last_loss().unwrap();
    assert!(last < 0.01 * first, "first {first}, last {last}");

    let losses = history.losses();
    let head: f64 = losses[..10].iter().sum();
    let tail: f64 = losses[losses.len() - 10..].iter().sum();
    assert!(tail < head);
}

#[test]
fn zero_epoch_training_is_a_no_op() {
    let (x, y) = doubling_data();
    let mut net = linear_net(3);
    net.train(&x, &y, 25, 0.01).unwrap();

    let before: Vec<(Matrix, Matrix)> =
        net.layers.iter().map(|l| (l.weights.clone(), l.biases.clone())).collect();
    let history = net.train(&x, &y, 0, 0.01).unwrap();
    let after: Vec<(Matrix, Matrix)> =
        net.layers.iter().map(|l| (l.weights.clone(), l.biases.clone())).collect();

    assert!(history.is_empty());
    assert_eq!(before, after);
}

#[test]
fn repeated_calls_resume_from_current_parameters() {
    let (x, y) = doubling_data();
    let mut net = linear_net(4);
    let first = net.train(&x, &y, 50, 0.01).unwrap();
    let second = net.train(&x, &y, 50, 0.01).unwrap();
    assert!(second.first_loss().unwrap() < first.first_loss().unwrap());
    assert!(second.last_loss().unwrap() <= first.last_loss().unwrap());
}

#[test]
fn shape_and_learning_rate_errors() {
    let (x, y) = doubling_data();
    let mut net = linear_net(5);

    assert!(matches!(
        net.train(&x, &y[..2], 10, 0.01),
        Err(Error::DimensionMismatch { .. })
    ));
    let wide_targets = vec![vec![1.0, 2.0]; 3];
    assert!(matches!(
        net.train(&x, &wide_targets, 10, 0.01),
        Err(Error::DimensionMismatch { .. })
    ));
    assert!(matches!(net.train(&[], &[], 10, 0.01), Err(Error::DimensionMismatch { .. })));
    let before = net.layers[0].weights.clone();
    for lr in [0.0, -1.0, f64::NAN] {
        assert!(matches!(
            net.train(&x, &y, 10, lr),
            Err(Error::DimensionMismatch { context: "learning rate", .. })
        ));
    }
    assert_eq!(net.layers[0].weights, before);
}

#[test]
fn divergence_is_reported() {
    let x = vec![vec![100.0], vec![-50.0]];
    let y = vec![vec![1.0], vec![2.0]];
    let mut net = linear_net(6);
    let result = net.train(&x, &y, 1000, 10.0);
    assert!(matches!(result, Err(Error::NumericInstability { .. })));
}

#[test]
fn divergence_on_the_last_update_is_reported() {
    // Recorded losses stay finite for 30 epochs but the 30th update overflows.
    let x = vec![vec![100.0], vec![-50.0]];
    let y = vec![vec![1.0], vec![2.0]];
    let mut net = linear_net(6);
    let result = net.train(&x, &y, 30, 10.0);
    assert!(matches!(result, Err(Error::NumericInstability { epoch: 30, .. })), "{result:?}");
}

#[test]
fn successful_training_leaves_a_finite_loss() {
    let x = vec![vec![100.0], vec![-50.0]];
    let y = vec![vec![1.0], vec![2.0]];
    for epochs in 1..=40 {
        let mut net = linear_net(6);
        match net.train(&x, &y, epochs, 10.0) {
            Ok(_) => {
                let loss = net.compute_loss(&net.predict(&x).unwrap(), &y).unwrap();
                assert!(loss.is_finite(), "epochs {epochs}: loss {loss}");
                assert!(net.layers.iter().all(|l| l.weights.is_finite() && l.biases.is_finite()));
            }
            Err(e) => assert!(matches!(e, Error::NumericInstability { .. }), "epochs {epochs}: {e}"),
        }
    }
}

#[test]
fn preset_stop_flag_halts_before_first_epoch() {
    let (x, y) = doubling_data();
    let mut net = linear_net(7);
    let before = net.layers[0].weights.clone();

    let mut config = TrainConfig::new(100, 0.01);
    config.stop_flag = Some(Arc::new(AtomicBool::new(true)));
    let history = net.train_with(Dataset::new(&x, &y).unwrap(), None, &config).unwrap();

    assert!(history.is_empty());
    assert!(history.stopped_early);
    assert_eq!(net.layers[0].weights, before);
}

#[test]
fn progress_channel_receives_every_epoch() {
    let (x, y) = doubling_data();
    let mut net = linear_net(8);
    let (tx, rx) = mpsc::channel();

    let mut config = TrainConfig::new(12, 0.01);
    config.progress_tx = Some(tx);
    let history = net
        .train_with(Dataset::new(&x, &y).unwrap(), Some(Dataset::new(&x, &y).unwrap()), &config)
        .unwrap();
    drop(config);

    let received: Vec<_> = rx.iter().collect();
    assert_eq!(received.len(), 12);
    assert_eq!(received, history.epochs);
    assert_eq!(received[11].epoch, 12);
    assert!(received.iter().all(|s| s.val_loss.is_some()));
}

#[test]
fn dropped_receiver_stops_training() {
    let (x, y) = doubling_data();
    let mut net = linear_net(9);
    let (tx, rx) = mpsc::channel();
    drop(rx);

    let mut config = TrainConfig::new(50, 0.01);
    config.progress_tx = Some(tx);
    let history = net.train_with(Dataset::new(&x, &y).unwrap(), None, &config).unwrap();
    assert_eq!(history.len(), 1);
    assert!(history.stopped_early);
}

#[test]
fn swapped_loss_trains_softmax_classifier() {
    let x = vec![vec![-1.0, -1.0], vec![1.0, 1.0], vec![-0.5, -1.0], vec![1.0, 0.5]];
    let y = vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0], vec![0.0, 1.0]];
    let mut net = Network::with_activations(
        &[2, 2],
        ActivationFunction::Identity,
        ActivationFunction::Softmax,
        &mut StdRng::seed_from_u64(10),
    )
    .unwrap()
    .with_loss(CrossEntropyLoss);

    let history = net.train(&x, &y, 200, 0.5).unwrap();
    assert!(history.last_loss().unwrap() < 0.5 * history.first_loss().unwrap());

    for (input, target) in x.iter().zip(y.iter()) {
        let out = net.forward(input).unwrap();
        assert_eq!(out[1] > out[0], target[1] > target[0], "{input:?}");
    }
}

#[test]
fn seeded_mini_batch_runs_are_reproducible() {
    let (x, y) = doubling_data();
    let build = || {
        NetworkBuilder::new(1)
            .dense(8, ActivationFunction::Tanh)
            .dropout(0.1)
            .dense(1, ActivationFunction::Identity)
            .loss(LossType::Huber)
            .build_with_rng(&mut StdRng::seed_from_u64(12))
            .unwrap()
    };
    let config = TrainConfig::new(40, 0.01)
        .with_batch_size(2)
        .with_optimizer(OptimizerKind::Momentum { momentum: 0.5 })
        .with_seed(99);

    let data = Dataset::new(&x, &y).unwrap();
    let a = build().train_with(data, None, &config).unwrap();
    let b = build().train_with(data, None, &config).unwrap();
    assert_eq!(a.losses(), b.losses());
    assert!(a.losses().iter().all(|l| l.is_finite()));
}
