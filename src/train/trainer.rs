use std::time::Instant;

use rand::seq::SliceRandom;

use crate::loss::bce::BceLoss;
use crate::loss::loss_type::LossType;
use crate::loss::mse::MseLoss;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::sgd::Sgd;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

/// Probability above which a prediction counts as signal.
const DECISION_THRESHOLD: f64 = 0.5;

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` for `config.epochs` epochs of shuffled mini-batch SGD and
/// returns the stats of every completed epoch.
///
/// Labels are scalar (0.0 = background, 1.0 = signal), matching the
/// single-sigmoid output of both HIGGS classifiers.
///
/// # Panics
/// Panics if `train_features` is empty, lengths mismatch, or `batch_size == 0`.
pub fn train_loop(
    network: &mut Network,
    train_features: &[Vec<f64>],
    train_labels: &[f64],
    val_features: Option<&[Vec<f64>]>,
    val_labels: Option<&[f64]>,
    optimizer: &Sgd,
    config: &TrainConfig,
) -> Vec<EpochStats> {
    assert!(!train_features.is_empty(), "train_features must not be empty");
    assert_eq!(
        train_features.len(),
        train_labels.len(),
        "train_features and train_labels must have equal length"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();

        let train_loss = run_one_epoch(
            network,
            train_features,
            train_labels,
            optimizer,
            config.batch_size,
            config.loss_type,
        );

        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        let (val_loss, val_accuracy) = match (val_features, val_labels) {
            (Some(vf), Some(vl)) if !vf.is_empty() => {
                let (loss, acc) = evaluate(network, vf, vl, config.loss_type);
                (Some(loss), Some(acc))
            }
            _ => (None, None),
        };

        tracing::info!(
            epoch,
            total = config.epochs,
            train_loss,
            val_loss,
            val_accuracy,
            elapsed_ms,
            "epoch complete"
        );

        history.push(EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss,
            val_loss,
            val_accuracy,
            elapsed_ms,
        });
    }

    history
}

/// Mean loss and binary accuracy over a dataset without weight updates.
pub fn evaluate(
    network: &mut Network,
    features: &[Vec<f64>],
    labels: &[f64],
    loss_type: LossType,
) -> (f64, f64) {
    let n = features.len();
    if n == 0 {
        return (0.0, 0.0);
    }
    let mut total_loss = 0.0;
    let mut correct = 0usize;
    for (row, &label) in features.iter().zip(labels.iter()) {
        let p = network.forward(row)[0];
        total_loss += compute_loss(&[p], &[label], loss_type);
        let predicted = if p > DECISION_THRESHOLD { 1.0 } else { 0.0 };
        if predicted == label {
            correct += 1;
        }
    }
    (total_loss / n as f64, correct as f64 / n as f64)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Runs one full epoch of mini-batch SGD over the training data.
/// Returns the mean loss over all samples.
fn run_one_epoch(
    network: &mut Network,
    features: &[Vec<f64>],
    labels: &[f64],
    optimizer: &Sgd,
    batch_size: usize,
    loss_type: LossType,
) -> f64 {
    let n = features.len();
    let mut total_loss = 0.0;

    // Shuffle sample order each epoch.
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut rand::thread_rng());

    for batch_start in (0..n).step_by(batch_size) {
        let batch_end = (batch_start + batch_size).min(n);
        let actual_batch_size = (batch_end - batch_start) as f64;

        // Zero-initialize accumulated gradient storage.
        let mut acc_grads: Vec<(Matrix, Matrix)> = network
            .layers
            .iter()
            .map(|layer| {
                (
                    Matrix::zeros(layer.weights.rows, layer.weights.cols),
                    Matrix::zeros(layer.biases.rows, layer.biases.cols),
                )
            })
            .collect();

        // Accumulate gradients over the mini-batch.
        for &idx in &indices[batch_start..batch_end] {
            let input = &features[idx];
            let expected = [labels[idx]];

            let output = network.forward(input);

            total_loss += compute_loss(&output, &expected, loss_type);

            let error = compute_loss_derivative(&output, &expected, loss_type);
            let mut delta = Matrix::row(error);

            // Backward pass.
            for i in (0..network.layers.len()).rev() {
                let input_for_layer = if i == 0 {
                    Matrix::row(input.clone())
                } else {
                    network.layers[i - 1].outputs.clone()
                };

                let (w_grad, b_grad) =
                    network.layers[i].gradients(&delta, &input_for_layer);

                if i > 0 {
                    // Propagate δ_i through weights to get ∂L/∂a_{i-1}.
                    delta = &b_grad * &network.layers[i].weights.transpose();
                }

                acc_grads[i].0 = &acc_grads[i].0 + &w_grad;
                acc_grads[i].1 = &acc_grads[i].1 + &b_grad;
            }
        }

        // Average and apply.
        let inv_batch = 1.0 / actual_batch_size;
        for (i, (w_acc, b_acc)) in acc_grads.into_iter().enumerate() {
            let w_avg = w_acc.map(|x| x * inv_batch);
            let b_avg = b_acc.map(|x| x * inv_batch);
            optimizer.step(&mut network.layers[i], &w_avg, &b_avg);
        }
    }

    total_loss / n as f64
}

/// Scalar loss for one sample — dispatches on `LossType`.
fn compute_loss(predicted: &[f64], expected: &[f64], loss_type: LossType) -> f64 {
    match loss_type {
        LossType::BinaryCrossEntropy => BceLoss::loss(predicted, expected),
        LossType::Mse => MseLoss::loss(predicted, expected),
    }
}

/// Per-output gradient for one sample — dispatches on `LossType`.
fn compute_loss_derivative(predicted: &[f64], expected: &[f64], loss_type: LossType) -> Vec<f64> {
    match loss_type {
        LossType::BinaryCrossEntropy => BceLoss::derivative(predicted, expected),
        LossType::Mse => MseLoss::derivative(predicted, expected),
    }
}
