use std::path::Path;
use std::sync::mpsc;

use serde::{Serialize, Deserialize};

use crate::error::{Error, Result};
use crate::train::epoch_stats::EpochStats;

/// Decimal digits kept after every weight update unless configured otherwise.
pub const DEFAULT_ROUNDING_PRECISION: u32 = 2;

fn default_rounding_precision() -> u32 {
    DEFAULT_ROUNDING_PRECISION
}

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `learning_rate`      — `mu`, scales the averaged gradient
/// - `momentum`           — `alpha`, weight of the previous weights in each update
/// - `max_epochs`         — epoch budget
/// - `mse_target`         — training stops as soon as an epoch's MSE drops below this
///
/// `learning_rate`, `momentum` and `mse_target` are not range-checked.
/// - `rounding_precision` — decimal digits the weights are quantized to after
///                          every update
/// - `seed`               — fixes weight initialization and shuffling; `None`
///                          draws from OS entropy
/// - `progress_tx`        — optional channel sender; one `EpochStats` is sent per
///                          completed epoch. Not serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub learning_rate: f64,
    pub momentum: f64,
    pub max_epochs: usize,
    pub mse_target: f64,
    #[serde(default = "default_rounding_precision")]
    pub rounding_precision: u32,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(skip)]
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
}

impl TrainConfig {
    /// Creates a config with two-digit rounding, no seed and no progress channel.
    pub fn new(learning_rate: f64, momentum: f64, max_epochs: usize, mse_target: f64) -> Self {
        TrainConfig {
            learning_rate,
            momentum,
            max_epochs,
            mse_target,
            rounding_precision: DEFAULT_ROUNDING_PRECISION,
            seed: None,
            progress_tx: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rounding_precision(mut self, digits: u32) -> Self {
        self.rounding_precision = digits;
        self
    }

    pub fn with_progress(mut self, tx: mpsc::Sender<EpochStats>) -> Self {
        self.progress_tx = Some(tx);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_epochs == 0 {
            return Err(Error::InvalidConfig("max_epochs must be at least 1".into()));
        }
        // 10^rounding_precision must stay finite.
        if self.rounding_precision > 300 {
            return Err(Error::InvalidConfig(format!(
                "rounding_precision {} is out of range",
                self.rounding_precision
            )));
        }
        Ok(())
    }

    /// Serializes the hyperparameters to a pretty-printed JSON file.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<TrainConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        let config: TrainConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }
}
