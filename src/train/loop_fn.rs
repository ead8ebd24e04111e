use std::time::Instant;

use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use serde::{Serialize, Deserialize};

use crate::error::Result;
use crate::math::matrix::Matrix;
use crate::network::topology::Topology;
use crate::network::weights::MlpWeights;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;
use crate::train::trainer::Trainer;

/// Why a training run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// An epoch's MSE fell below `mse_target`.
    TargetReached,
    /// All `max_epochs` epochs ran.
    EpochLimit,
}

/// Result of a full training run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainOutcome {
    pub weights: MlpWeights,
    /// One MSE per executed epoch, in order.
    pub mse_history: Vec<f64>,
    pub stop_reason: StopReason,
}

impl TrainOutcome {
    pub fn epochs(&self) -> usize {
        self.mse_history.len()
    }

    pub fn final_mse(&self) -> Option<f64> {
        self.mse_history.last().copied()
    }
}

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains a fresh `topology` network on `inputs` (`p x N`, one sample per
/// column) against `desired` (`m x N`).
///
/// Runs until an epoch's MSE is below `config.mse_target` or
/// `config.max_epochs` epochs have run. On an early stop the returned
/// weights are the ones that produced the qualifying MSE; that epoch's
/// update is skipped.
///
/// Weights are quantized only as part of an update. A stop in the very
/// first epoch therefore returns the initial uniform draw unrounded; every
/// other return carries weights rounded to `config.rounding_precision`.
///
/// # Errors
/// `DimensionMismatch` if the shapes disagree with each other or with
/// `topology`, or if there are zero samples; `InvalidConfig` for a bad
/// config. All are raised before the first epoch.
pub fn train_loop<R: Rng + ?Sized>(
    topology: Topology,
    inputs: &Matrix,
    desired: &Matrix,
    config: &TrainConfig,
    rng: &mut R,
) -> Result<TrainOutcome> {
    let mut trainer = Trainer::new(topology, inputs, desired, config, rng)?;
    let mut mse_history = Vec::with_capacity(config.max_epochs);
    let mut stop_reason = StopReason::EpochLimit;

    tracing::info!(
        inputs = topology.inputs,
        hidden = topology.hidden,
        outputs = topology.outputs,
        samples = inputs.cols,
        max_epochs = config.max_epochs,
        "training started"
    );

    for epoch in 1..=config.max_epochs {
        let t_start = Instant::now();
        let result = trainer.run_epoch(rng)?;
        let elapsed_ms = t_start.elapsed().as_millis() as u64;

        mse_history.push(result.mse);
        tracing::debug!(epoch, mse = result.mse, "epoch complete");

        if let Some(ref tx) = config.progress_tx {
            // A dropped receiver only stops the reporting.
            let _ = tx.send(EpochStats {
                epoch,
                total_epochs: config.max_epochs,
                mse: result.mse,
                elapsed_ms,
            });
        }

        if result.target_reached {
            stop_reason = StopReason::TargetReached;
            break;
        }
    }

    tracing::info!(
        epochs = mse_history.len(),
        final_mse = mse_history.last().copied().unwrap_or(f64::NAN),
        reason = ?stop_reason,
        "training finished"
    );

    Ok(TrainOutcome {
        weights: trainer.into_weights(),
        mse_history,
        stop_reason,
    })
}

/// `train_loop` with a generator seeded from `config.seed`, or from OS
/// entropy when no seed is set.
pub fn train_mlp(
    topology: Topology,
    inputs: &Matrix,
    desired: &Matrix,
    config: &TrainConfig,
) -> Result<TrainOutcome> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    train_loop(topology, inputs, desired, config, &mut rng)
}
