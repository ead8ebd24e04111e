use crate::activation::activation::Sigmoid;
use crate::error::{Error, Result};
use crate::math::augmented::{BiasAugmented, BIAS};
use crate::math::matrix::Matrix;

/// Every intermediate of one forward pass, kept for backpropagation.
///
/// - `v` — hidden pre-activation, `H x K`
/// - `z` — hidden activation, `H x K`
/// - `s` — `z` with the bias row prepended, `(H + 1) x K`
/// - `g` — output pre-activation, `m x K`
/// - `y` — network output, `m x K`
#[derive(Debug, Clone)]
pub struct ForwardTrace {
    pub v: Matrix,
    pub z: Matrix,
    pub s: Matrix,
    pub g: Matrix,
    pub y: Matrix,
}

/// Runs `K` samples (the columns of `x`, `p x K`) through the network and
/// returns the `m x K` output. Pure; nothing is cached.
pub fn forward(x: &Matrix, wx: &Matrix, wy: &Matrix) -> Result<Matrix> {
    check_shapes(x.rows, x.cols, wx, wy)?;
    let augmented = BiasAugmented::with_bias(x);
    Ok(propagate(&augmented, wx, wy).y)
}

/// Same computation as `forward` on an input that already carries its bias
/// row, keeping every activation.
pub fn forward_trace(x: &BiasAugmented, wx: &Matrix, wy: &Matrix) -> Result<ForwardTrace> {
    check_shapes(x.features(), x.samples(), wx, wy)?;
    Ok(propagate(x, wx, wy))
}

fn propagate(x: &BiasAugmented, wx: &Matrix, wy: &Matrix) -> ForwardTrace {
    let v = wx * x.matrix();
    let z = Sigmoid::apply(&v);
    let s = z.prepend_row(vec![BIAS; z.cols]);
    let g = wy * &s;
    let y = Sigmoid::apply(&g);
    ForwardTrace { v, z, s, g, y }
}

fn check_shapes(features: usize, samples: usize, wx: &Matrix, wy: &Matrix) -> Result<()> {
    if samples == 0 {
        return Err(Error::DimensionMismatch("input has no sample columns".into()));
    }
    if wx.cols != features + 1 {
        return Err(Error::DimensionMismatch(format!(
            "hidden weights are {}x{} but input has {features} rows (expected {} columns)",
            wx.rows, wx.cols, features + 1
        )));
    }
    if wy.cols != wx.rows + 1 {
        return Err(Error::DimensionMismatch(format!(
            "output weights are {}x{} but hidden layer has {} neurons (expected {} columns)",
            wy.rows, wy.cols, wx.rows, wx.rows + 1
        )));
    }
    Ok(())
}
