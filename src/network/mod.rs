pub mod topology;
pub mod forward;
pub mod weights;

pub use topology::Topology;
pub use forward::{forward, forward_trace, ForwardTrace};
pub use weights::MlpWeights;
