pub mod activation;
pub mod data;
pub mod error;
pub mod layers;
pub mod logging;
pub mod loss;
pub mod math;
pub mod network;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use activation::Activation;
pub use data::scaler::StandardScaler;
pub use error::{HiggsError, Result};
pub use layers::dense::Dense;
pub use loss::bce::BceLoss;
pub use math::matrix::Matrix;
pub use network::Network;
pub use optim::sgd::Sgd;
pub use train::{evaluate, train_loop, EpochStats, TrainConfig};
