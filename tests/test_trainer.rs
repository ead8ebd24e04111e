// Training loop: termination, early stop, quantization and the update rule.

use std::sync::mpsc;

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sigmoid_mlp::train::Trainer;
use sigmoid_mlp::{train_loop, train_mlp, Error, Matrix, MlpWeights, StopReason, Topology, TrainConfig};

fn xor() -> (Matrix, Matrix) {
    let x = Matrix::from_data(vec![vec![0.0, 0.0, 1.0, 1.0], vec![0.0, 1.0, 0.0, 1.0]]).unwrap();
    let d = Matrix::from_data(vec![vec![0.0, 1.0, 1.0, 0.0]]).unwrap();
    (x, d)
}

#[test]
fn test_zero_target_runs_every_epoch() {
    let (x, d) = xor();
    let config = TrainConfig::new(10.0, 0.001, 37, 0.0).with_seed(1);
    let outcome = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap();
    assert_eq!(outcome.mse_history.len(), 37);
    assert_eq!(outcome.stop_reason, StopReason::EpochLimit);
}

#[test]
fn test_large_target_stops_after_first_epoch_with_initial_weights() {
    let (x, d) = xor();
    let topology = Topology::new(2, 4, 1);
    let config = TrainConfig::new(10.0, 0.001, 400, 1.0);

    let mut rng = StdRng::seed_from_u64(42);
    let outcome = train_loop(topology, &x, &d, &config, &mut rng).unwrap();

    // Replay the initial draw: hidden matrix first, then output.
    let mut replay = StdRng::seed_from_u64(42);
    let hidden = Matrix::random_uniform(4, 3, &mut replay);
    let output = Matrix::random_uniform(1, 5, &mut replay);

    assert_eq!(outcome.mse_history.len(), 1);
    assert_eq!(outcome.stop_reason, StopReason::TargetReached);
    assert_eq!(outcome.weights, MlpWeights { hidden, output });
}

#[test]
fn test_column_count_mismatch_fails_before_training() {
    let (x, _) = xor();
    let d = Matrix::from_data(vec![vec![0.0, 1.0, 1.0]]).unwrap();
    let (tx, rx) = mpsc::channel();
    let config = TrainConfig::new(1.0, 0.0, 10, 0.0).with_progress(tx);
    let err = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch(_)));
    drop(config);
    assert_eq!(rx.iter().count(), 0);
}

#[test]
fn test_weights_are_quantized_after_every_epoch() {
    let (x, d) = xor();
    for &digits in &[0u32, 2, 3] {
        let config = TrainConfig::new(10.0, 0.001, 50, 0.0).with_rounding_precision(digits);
        let mut rng = StdRng::seed_from_u64(7 + digits as u64);
        let mut trainer = Trainer::new(Topology::new(2, 4, 1), &x, &d, &config, &mut rng).unwrap();
        for _ in 0..20 {
            trainer.run_epoch(&mut rng).unwrap();
            assert!(trainer.weights().hidden.is_quantized(digits, 1e-6));
            assert!(trainer.weights().output.is_quantized(digits, 1e-6));
        }
    }
}

#[test]
fn test_single_sample_update_matches_hand_derivation() {
    let x = Matrix::from_data(vec![vec![0.5]]).unwrap();
    let d = Matrix::from_data(vec![vec![1.0]]).unwrap();
    let mu = 3.0;
    let config = TrainConfig::new(mu, 0.0, 1, 0.0).with_rounding_precision(12);
    let mut rng = StdRng::seed_from_u64(99);
    let mut trainer = Trainer::new(Topology::new(1, 1, 1), &x, &d, &config, &mut rng).unwrap();

    let w = trainer.weights().clone();
    let (a0, a1) = (w.hidden.data[0][0], w.hidden.data[0][1]);
    let (b0, b1) = (w.output.data[0][0], w.output.data[0][1]);

    let sigmoid = |v: f64| 1.0 / (1.0 + (-v).exp());
    let z = sigmoid(-a0 + 0.5 * a1);
    let y = sigmoid(-b0 + b1 * z);
    let e = 1.0 - y;
    let dy = y * (1.0 - y) * e;
    let nb0 = b0 + mu * dy * -1.0;
    let nb1 = b1 + mu * dy * z;
    // Hidden gradient flows back through the updated output weight.
    let dx = z * (1.0 - z) * nb1 * dy;
    let na0 = a0 + mu * dx * -1.0;
    let na1 = a1 + mu * dx * 0.5;

    let result = trainer.run_epoch(&mut rng).unwrap();
    assert!(!result.target_reached);
    assert_relative_eq!(result.mse, e * e, epsilon = 1e-12);

    let after = trainer.weights();
    assert_relative_eq!(after.output.data[0][0], nb0, epsilon = 1e-9);
    assert_relative_eq!(after.output.data[0][1], nb1, epsilon = 1e-9);
    assert_relative_eq!(after.hidden.data[0][0], na0, epsilon = 1e-9);
    assert_relative_eq!(after.hidden.data[0][1], na1, epsilon = 1e-9);
}

#[test]
fn test_same_seed_reproduces_run() {
    let (x, d) = xor();
    let config = TrainConfig::new(10.0, 0.001, 60, 0.0).with_seed(2024);
    let a = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap();
    let b = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap();
    assert_eq!(a.weights, b.weights);
    assert_eq!(a.mse_history, b.mse_history);
}

#[test]
fn test_progress_channel_reports_each_epoch() {
    let (x, d) = xor();
    let (tx, rx) = mpsc::channel();
    let config = TrainConfig::new(10.0, 0.001, 12, 0.0).with_seed(5).with_progress(tx);
    let outcome = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap();
    drop(config);
    let stats: Vec<_> = rx.iter().collect();
    assert_eq!(stats.len(), 12);
    assert_eq!(stats[0].epoch, 1);
    assert_eq!(stats[11].total_epochs, 12);
    for (s, mse) in stats.iter().zip(outcome.mse_history.iter()) {
        assert_eq!(s.mse, *mse);
    }
}

#[test]
fn test_xor_training_fits_targets_in_most_runs() {
    let (x, d) = xor();
    let mut improved = 0;
    let mut within_tolerance = 0;
    for seed in 0..10 {
        let config = TrainConfig::new(10.0, 0.001, 400, 1e-20).with_seed(seed);
        let outcome = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap();
        assert_eq!(outcome.mse_history.len(), 400);
        assert!(outcome.weights.hidden.is_quantized(2, 1e-6));
        let first = outcome.mse_history[0];
        let last = *outcome.mse_history.last().unwrap();
        if last < first {
            improved += 1;
        }

        let y = outcome.weights.predict(&x).unwrap().round_to(2);
        let close = y.data[0].iter().zip(d.data[0].iter()).all(|(y, d)| (y - d).abs() <= 0.2);
        if close {
            within_tolerance += 1;
        }
    }
    assert!(improved >= 6, "only {improved} of 10 runs reduced the MSE");
    assert!(within_tolerance >= 6, "only {within_tolerance} of 10 runs fit XOR within 0.2");
}

#[test]
fn test_empty_training_set_is_dimension_mismatch() {
    let config = TrainConfig::new(10.0, 0.001, 10, 0.0).with_seed(0);
    let err = train_mlp(Topology::new(2, 4, 1), &Matrix::zeros(2, 0), &Matrix::zeros(1, 0), &config).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch(_)));
}

#[test]
fn test_negative_target_runs_full_budget() {
    let (x, d) = xor();
    let config = TrainConfig::new(10.0, 0.001, 15, -1.0).with_seed(3);
    let outcome = train_mlp(Topology::new(2, 4, 1), &x, &d, &config).unwrap();
    assert_eq!(outcome.epochs(), 15);
    assert_eq!(outcome.stop_reason, StopReason::EpochLimit);
}
