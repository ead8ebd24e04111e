use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::math::matrix::Matrix;
use crate::network::forward::forward;
use crate::network::topology::Topology;

/// Decimal places used by the plain-text weight dumps.
pub const TEXT_DECIMALS: usize = 2;

/// The two weight matrices of a trained (or freshly drawn) network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MlpWeights {
    /// Input-to-hidden weights, `H x (p + 1)`.
    pub hidden: Matrix,
    /// Hidden-to-output weights, `m x (H + 1)`.
    pub output: Matrix,
}

impl MlpWeights {
    /// Pairs two matrices after checking that their bias columns line up.
    pub fn new(hidden: Matrix, output: Matrix) -> Result<MlpWeights> {
        let weights = MlpWeights { hidden, output };
        weights.topology()?;
        Ok(weights)
    }

    /// Recovers `(p, H, m)` from the matrix shapes.
    pub fn topology(&self) -> Result<Topology> {
        if self.hidden.cols < 2 || self.hidden.rows == 0 || self.output.rows == 0 {
            return Err(Error::DimensionMismatch(format!(
                "degenerate weight shapes {}x{} and {}x{}",
                self.hidden.rows, self.hidden.cols, self.output.rows, self.output.cols
            )));
        }
        if self.output.cols != self.hidden.rows + 1 {
            return Err(Error::DimensionMismatch(format!(
                "output weights have {} columns, expected {}",
                self.output.cols,
                self.hidden.rows + 1
            )));
        }
        Ok(Topology::new(self.hidden.cols - 1, self.hidden.rows, self.output.rows))
    }

    /// Inference on a `p x K` input.
    pub fn predict(&self, x: &Matrix) -> Result<Matrix> {
        forward(x, &self.hidden, &self.output)
    }

    /// Serializes both matrices to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes weights written by `save_json`, re-checking their shapes.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<MlpWeights> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let weights: MlpWeights = serde_json::from_reader(reader)?;
        weights.topology()?;
        Ok(weights)
    }

    /// Writes one plain-text file per matrix with `TEXT_DECIMALS` places.
    pub fn save_txt<P: AsRef<Path>, Q: AsRef<Path>>(&self, hidden_path: P, output_path: Q) -> Result<()> {
        self.hidden.save_txt(hidden_path, TEXT_DECIMALS)?;
        self.output.save_txt(output_path, TEXT_DECIMALS)
    }

    pub fn load_txt<P: AsRef<Path>, Q: AsRef<Path>>(hidden_path: P, output_path: Q) -> Result<MlpWeights> {
        MlpWeights::new(Matrix::load_txt(hidden_path)?, Matrix::load_txt(output_path)?)
    }
}
