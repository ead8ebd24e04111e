use rand::Rng;
use rand::seq::SliceRandom;

use crate::{
    activation::activation::Sigmoid,
    error::{Error, Result},
    loss::mse::MseLoss,
    math::{augmented::BiasAugmented, matrix::Matrix},
    network::{forward::forward_trace, topology::Topology, weights::MlpWeights},
    optim::momentum::{Momentum, MomentumState},
    train::train_config::TrainConfig,
};

/// What one call to `Trainer::run_epoch` observed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochResult {
    pub mse: f64,
    /// `mse` fell below the target; the weights were left untouched.
    pub target_reached: bool,
}

/// Owns everything a training run mutates: the weights, the momentum memory
/// and the training set, whose sample order drifts as it is reshuffled.
#[derive(Debug, Clone)]
pub struct Trainer {
    weights: MlpWeights,
    hidden_state: MomentumState,
    output_state: MomentumState,
    inputs: BiasAugmented,
    desired: Matrix,
    optimizer: Momentum,
    mse_target: f64,
    rounding_precision: u32,
}

impl Trainer {
    /// Validates the data against `topology` and draws the initial weights,
    /// uniform in [0, 1), hidden matrix first.
    pub fn new<R: Rng + ?Sized>(
        topology: Topology,
        inputs: &Matrix,
        desired: &Matrix,
        config: &TrainConfig,
        rng: &mut R,
    ) -> Result<Trainer> {
        topology.validate()?;
        config.validate()?;
        check_training_set(topology, inputs, desired)?;

        let (h_rows, h_cols) = topology.hidden_shape();
        let (o_rows, o_cols) = topology.output_shape();
        let weights = MlpWeights {
            hidden: Matrix::random_uniform(h_rows, h_cols, rng),
            output: Matrix::random_uniform(o_rows, o_cols, rng),
        };

        Ok(Trainer {
            weights,
            hidden_state: MomentumState::zeros(h_rows, h_cols),
            output_state: MomentumState::zeros(o_rows, o_cols),
            inputs: BiasAugmented::with_bias(inputs),
            desired: desired.clone(),
            optimizer: Momentum::new(config.learning_rate, config.momentum),
            mse_target: config.mse_target,
            rounding_precision: config.rounding_precision,
        })
    }

    pub fn weights(&self) -> &MlpWeights {
        &self.weights
    }

    pub fn into_weights(self) -> MlpWeights {
        self.weights
    }

    /// Current training inputs (bias row excluded) in their shuffled order.
    pub fn inputs(&self) -> Matrix {
        self.inputs.data_rows()
    }

    /// Current desired outputs, column-aligned with `inputs()`.
    pub fn desired(&self) -> &Matrix {
        &self.desired
    }

    /// One epoch: shuffle the samples, measure the MSE, and unless it is
    /// already below target, apply one momentum step to both layers and
    /// quantize the result.
    pub fn run_epoch<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<EpochResult> {
        let n = self.inputs.samples();

        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        self.inputs.permute_samples(&order);
        self.desired = self.desired.select_columns(&order);

        let trace = forward_trace(&self.inputs, &self.weights.hidden, &self.weights.output)?;
        let error = MseLoss::error(&self.desired, &trace.y);
        let mse = MseLoss::loss(&error);

        if mse < self.mse_target {
            return Ok(EpochResult { mse, target_reached: true });
        }

        // Output layer: δy = Y(1 - Y) ⊙ E
        let delta_y = Sigmoid::derivative_matrix(&trace.y).hadamard(&error);
        let grad_y = &delta_y * &trace.s.transpose();
        let output = self.optimizer.step(&self.weights.output, &grad_y, n, &mut self.output_state);

        // Hidden layer, back through the freshly updated output weights.
        // Row 0 of S is the constant bias input and carries no gradient.
        let back = &output.transpose() * &delta_y;
        let delta_x = Sigmoid::derivative_matrix(&trace.s).hadamard(&back).skip_rows(1);
        let grad_x = &delta_x * &self.inputs.matrix().transpose();
        let hidden = self.optimizer.step(&self.weights.hidden, &grad_x, n, &mut self.hidden_state);

        self.weights = MlpWeights {
            hidden: hidden.round_to(self.rounding_precision),
            output: output.round_to(self.rounding_precision),
        };

        Ok(EpochResult { mse, target_reached: false })
    }
}

fn check_training_set(topology: Topology, inputs: &Matrix, desired: &Matrix) -> Result<()> {
    if inputs.cols != desired.cols {
        return Err(Error::DimensionMismatch(format!(
            "inputs have {} samples but desired outputs have {}",
            inputs.cols, desired.cols
        )));
    }
    if inputs.rows != topology.inputs {
        return Err(Error::DimensionMismatch(format!(
            "inputs have {} rows, topology expects {}",
            inputs.rows, topology.inputs
        )));
    }
    if desired.rows != topology.outputs {
        return Err(Error::DimensionMismatch(format!(
            "desired outputs have {} rows, topology expects {}",
            desired.rows, topology.outputs
        )));
    }
    if inputs.cols == 0 {
        return Err(Error::DimensionMismatch("training set has no samples".into()));
    }
    Ok(())
}
