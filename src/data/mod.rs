pub mod fetch;
pub mod loader;
pub mod scaler;
pub mod split;

pub use fetch::ensure_dataset;
pub use loader::{load_csv, Dataset};
pub use scaler::StandardScaler;
pub use split::{carve_validation, train_test_split};
