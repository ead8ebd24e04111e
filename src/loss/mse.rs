use crate::math::matrix::Matrix;

pub struct MseLoss;

impl MseLoss {
    /// Error matrix `E = D - Y`.
    pub fn error(desired: &Matrix, predicted: &Matrix) -> Matrix {
        desired.clone() - predicted.clone()
    }

    /// Scalar MSE over every entry of `E`. Equal to the mean over outputs of
    /// the per-output mean over samples, since `E` is rectangular.
    pub fn loss(error: &Matrix) -> f64 {
        error.map(|e| e * e).mean()
    }
}
