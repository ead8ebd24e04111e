pub mod error;
pub mod math;
pub mod activation;
pub mod network;
pub mod loss;
pub mod optim;
pub mod train;

// Convenience re-exports
pub use error::{Error, Result};
pub use math::matrix::Matrix;
pub use math::augmented::BiasAugmented;
pub use activation::activation::Sigmoid;
pub use network::topology::Topology;
pub use network::forward::forward;
pub use network::weights::MlpWeights;
pub use loss::mse::MseLoss;
pub use optim::momentum::Momentum;
pub use train::train_config::TrainConfig;
pub use train::loop_fn::{train_loop, train_mlp, StopReason, TrainOutcome};
