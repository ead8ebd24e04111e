pub mod momentum;

pub use momentum::{Momentum, MomentumState};
