pub mod activation;
pub mod error;
pub mod experiment;
pub mod layers;
pub mod loss;
pub mod math;
pub mod network;
pub mod train;

// Convenience re-exports
pub use activation::activation::ActivationFunction;
pub use error::{Error, Result};
pub use experiment::{ExperimentConfig, ExperimentReport};
pub use layers::dense::Layer;
pub use loss::mse::{rmse, MseLoss};
pub use math::matrix::Matrix;
pub use network::{Network, NetworkConfig, Parameters};
pub use train::{train_loop, EpochStats, TrainConfig};
