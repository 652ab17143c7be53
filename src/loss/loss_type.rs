use serde::{Deserialize, Serialize};

/// Selects which loss function the training loop uses.
///
/// - `BinaryCrossEntropy` — pair with a single Sigmoid output unit. This is
///   the loss both HIGGS classifiers train with.
/// - `Mse`                — mean-squared error; pair with Identity or Sigmoid
///   output. Kept for regression-style smoke tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossType {
    BinaryCrossEntropy,
    Mse,
}
