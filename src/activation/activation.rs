use crate::math::matrix::Matrix;

/// Logistic sigmoid, σ(v) = 1 / (1 + e^(-v)).
pub struct Sigmoid;

impl Sigmoid {
    /// Branches on the sign of `x` so `exp` is only ever called on a
    /// non-positive argument.
    pub fn function(x: f64) -> f64 {
        if x >= 0.0 {
            1.0 / (1.0 + (-x).exp())
        } else {
            let e = x.exp();
            e / (1.0 + e)
        }
    }

    /// Derivative written in terms of the sigmoid's own output: y(1 - y).
    pub fn derivative_from_output(y: f64) -> f64 {
        y * (1.0 - y)
    }

    pub fn apply(m: &Matrix) -> Matrix {
        m.map(Sigmoid::function)
    }

    pub fn derivative_matrix(outputs: &Matrix) -> Matrix {
        outputs.map(Sigmoid::derivative_from_output)
    }
}
