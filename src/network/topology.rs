use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};

/// Layer sizes of the two-layer network.
///
/// Fields:
/// - `inputs`  — `p`, features per sample
/// - `hidden`  — `H`, hidden neurons
/// - `outputs` — `m`, output neurons
///
/// Every weight matrix carries one extra column for the bias input, so the
/// hidden matrix is `H x (p + 1)` and the output matrix is `m x (H + 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    pub inputs: usize,
    pub hidden: usize,
    pub outputs: usize,
}

impl Topology {
    pub fn new(inputs: usize, hidden: usize, outputs: usize) -> Topology {
        Topology { inputs, hidden, outputs }
    }

    pub fn validate(&self) -> Result<()> {
        if self.inputs == 0 || self.hidden == 0 || self.outputs == 0 {
            return Err(Error::InvalidConfig(format!(
                "layer sizes must be positive, got p={} H={} m={}",
                self.inputs, self.hidden, self.outputs
            )));
        }
        Ok(())
    }

    pub fn hidden_shape(&self) -> (usize, usize) {
        (self.hidden, self.inputs + 1)
    }

    pub fn output_shape(&self) -> (usize, usize) {
        (self.outputs, self.hidden + 1)
    }
}
