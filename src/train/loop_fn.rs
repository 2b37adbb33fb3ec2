use std::sync::atomic::Ordering;
use std::time::Instant;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::data::Dataset;
use crate::error::{Error, Result};
use crate::math::Matrix;
use crate::network::Network;
use crate::optim::Optimizer;
use crate::train::epoch_stats::{EpochStats, TrainingHistory};
use crate::train::train_config::TrainConfig;

// ---------------------------------------------------------------------------
// Public entry point
// ---------------------------------------------------------------------------

/// Trains `network` in place for up to `config.epochs` epochs.
///
/// Each call resumes from the network's current parameters. `epochs == 0`
/// validates the inputs and returns an empty history without touching the
/// parameters.
///
/// # Early termination
/// The loop stops at an epoch boundary if `config.stop_flag` is set or the
/// `progress_tx` receiver has been dropped; `stopped_early` is then set on
/// the returned history.
///
/// # Errors
/// - `InvalidHyperparameter` for a zero batch size or momentum outside `[0, 1)`
/// - `DimensionMismatch` for a learning rate that is not finite and positive,
///   an input/target row of the wrong width, or an empty training set when
///   `epochs > 0`
/// - `NumericInstability` when a batch loss is NaN or infinite (that batch's
///   update is not applied), when an update leaves a parameter non-finite,
///   or when the loss after the final update is non-finite
pub fn train_loop(
    network: &mut Network,
    train: Dataset<'_>,
    validation: Option<Dataset<'_>>,
    config: &TrainConfig,
) -> Result<TrainingHistory> {
    config.validate()?;
    network.check_dataset(&train)?;
    if let Some(ref val) = validation {
        network.check_dataset(val)?;
    }

    let mut history = TrainingHistory::default();
    if config.epochs == 0 {
        return Ok(history);
    }
    if train.is_empty() {
        return Err(Error::mismatch("training set size", 1, 0));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut optimizer = config.optimizer.build(config.learning_rate);

    info!(
        "training {:?} for {} epochs on {} samples (lr = {}, batch = {:?})",
        network.widths(),
        config.epochs,
        train.len(),
        config.learning_rate,
        config.batch_size,
    );

    for epoch in 1..=config.epochs {
        if stop_requested(config) {
            warn!("stop flag set, ending training before epoch {epoch}");
            history.stopped_early = true;
            break;
        }

        let t_start = Instant::now();

        let loss = run_one_epoch(
            network,
            &train,
            optimizer.as_mut(),
            config.batch_size,
            &mut rng,
            epoch,
        )?;

        let val_loss = match validation {
            Some(ref val) if !val.is_empty() => Some(network.mean_loss(val)?),
            _ => None,
        };

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            loss,
            val_loss,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        debug!("epoch {epoch}/{}: loss = {loss:.6}, val_loss = {val_loss:?}", config.epochs);
        history.epochs.push(stats.clone());

        if let Some(ref tx) = config.progress_tx {
            if tx.send(stats).is_err() {
                warn!("progress receiver dropped, ending training after epoch {epoch}");
                history.stopped_early = epoch < config.epochs;
                break;
            }
        }
    }

    // Recorded losses precede each update, so the last update is checked here.
    if let Some(last) = history.epochs.last() {
        let final_loss = network.mean_loss(&train)?;
        if !final_loss.is_finite() {
            warn!("loss diverged after the final update of epoch {}: {final_loss}", last.epoch);
            return Err(Error::NumericInstability { epoch: last.epoch, loss: final_loss });
        }
        info!(
            "training finished after {} epochs, final loss = {final_loss:.6}",
            history.len()
        );
    }
    Ok(history)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn stop_requested(config: &TrainConfig) -> bool {
    config
        .stop_flag
        .as_ref()
        .map(|flag| flag.load(Ordering::Relaxed))
        .unwrap_or(false)
}

/// Runs one pass over the training data, full-batch unless `batch_size` is
/// set, in which case sample order is shuffled first. Returns the mean
/// per-sample loss measured before each batch's update.
fn run_one_epoch(
    network: &mut Network,
    data: &Dataset<'_>,
    optimizer: &mut dyn Optimizer,
    batch_size: Option<usize>,
    rng: &mut StdRng,
    epoch: usize,
) -> Result<f64> {
    let n = data.len();
    let batch_size = batch_size.unwrap_or(n).min(n);

    let mut indices: Vec<usize> = (0..n).collect();
    if batch_size < n {
        indices.shuffle(rng);
    }

    let mut total_loss = 0.0;

    for batch in indices.chunks(batch_size) {
        let mut acc_grads: Vec<(Matrix, Matrix)> = network.layers.iter()
            .map(|layer| (
                Matrix::zeros(layer.weights.rows, layer.weights.cols),
                Matrix::zeros(layer.biases.rows, layer.biases.cols),
            ))
            .collect();
        let mut batch_loss = 0.0;

        for &idx in batch {
            let input = data.input(idx);
            let target = data.target(idx);

            let traces = network.forward_traced(input, rng);
            let output = &traces[traces.len() - 1].output;

            batch_loss += network.loss().value(output, target);
            let mut delta = network.loss().gradient(output, target);

            // Backward pass, output layer first.
            for i in (0..network.layers.len()).rev() {
                let layer_input = if i == 0 { input } else { traces[i - 1].output.as_slice() };
                let (w_grad, b_grad, input_delta) =
                    network.layers[i].compute_gradients(&traces[i], &delta, layer_input);

                acc_grads[i].0 += &w_grad;
                acc_grads[i].1 += &b_grad;
                delta = input_delta;
            }
        }

        if !batch_loss.is_finite() {
            let loss = batch_loss / batch.len() as f64;
            warn!("loss diverged at epoch {epoch}: {loss}");
            return Err(Error::NumericInstability { epoch, loss });
        }
        total_loss += batch_loss;

        // Average and apply.
        let inv_batch = 1.0 / batch.len() as f64;
        for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
            let w_avg = w_acc.map(|x| x * inv_batch);
            let b_avg = b_acc.map(|x| x * inv_batch);
            optimizer.step(i, &mut network.layers[i], &w_avg, &b_avg);
        }

        let blown = network.layers.iter()
            .position(|l| !(l.weights.is_finite() && l.biases.is_finite()));
        if let Some(i) = blown {
            let loss = batch_loss / batch.len() as f64;
            warn!("layer {i} parameters became non-finite at epoch {epoch}");
            return Err(Error::NumericInstability { epoch, loss });
        }
    }

    Ok(total_loss / n as f64)
}
