use crate::math::matrix::Matrix;

/// Gradient step with a momentum term.
#[derive(Debug, Clone, Copy)]
pub struct Momentum {
    pub learning_rate: f64,
    pub alpha: f64,
}

/// Per-matrix memory of the weights in effect before the last step.
#[derive(Debug, Clone)]
pub struct MomentumState {
    pub previous: Matrix,
}

impl MomentumState {
    pub fn zeros(rows: usize, cols: usize) -> MomentumState {
        MomentumState { previous: Matrix::zeros(rows, cols) }
    }
}

impl Momentum {
    pub fn new(learning_rate: f64, alpha: f64) -> Momentum {
        Momentum { learning_rate, alpha }
    }

    /// Returns `W + (mu / N) * gradient + alpha * previous` and records the
    /// pre-update `W` as the next step's `previous`.
    ///
    /// `gradient` is the un-normalized `delta * input^T` product summed over
    /// the `samples` columns.
    pub fn step(&self, weights: &Matrix, gradient: &Matrix, samples: usize, state: &mut MomentumState) -> Matrix {
        let delta = gradient.scale(self.learning_rate / samples as f64);
        let updated = weights.clone() + delta + state.previous.scale(self.alpha);
        state.previous = weights.clone();
        updated
    }
}
