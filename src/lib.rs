pub mod math;
pub mod activation;
pub mod loss;
pub mod train;
pub mod regression;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use math::rng::Mt19937;
pub use activation::sigmoid::{sigmoid, sigmoid_derivative};
pub use loss::mae::MaeLoss;
pub use train::trainer::Trainer;
pub use train::train_config::{TrainConfig, UpdateMode};
pub use train::error::TrainError;
pub use regression::linear::LinearRegression;
