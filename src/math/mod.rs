pub mod matrix;
pub mod augmented;
pub mod text_io;

pub use matrix::Matrix;
pub use augmented::{BiasAugmented, BIAS};
