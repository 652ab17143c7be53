use crate::loss::LossType;

/// Hyperparameters for a `train_loop` run.
///
/// # Fields
/// - `epochs`     — total number of full passes over the training data
/// - `batch_size` — samples per mini-batch; use `1` for online SGD
/// - `loss_type`  — which loss function to optimize
#[derive(Debug, Clone, Copy)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub loss_type: LossType,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, loss_type: LossType) -> Self {
        TrainConfig { epochs, batch_size, loss_type }
    }
}
