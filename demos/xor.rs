use anyhow::{Context, Result};
use sigmoid_mlp::{train_mlp, Matrix, Topology, TrainConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sigmoid_mlp=info")),
        )
        .init();

    // One sample per column.
    let inputs = Matrix::from_data(vec![
        vec![0.0, 0.0, 1.0, 1.0],
        vec![0.0, 1.0, 0.0, 1.0],
    ])?;
    let desired = Matrix::from_data(vec![vec![0.0, 1.0, 1.0, 0.0]])?;

    let topology = Topology::new(2, 4, 1);
    let mut config = TrainConfig::new(10.0, 0.001, 400, 1e-20);
    if let Some(seed) = std::env::var("XOR_SEED").ok().and_then(|s| s.parse().ok()) {
        config = config.with_seed(seed);
    }

    let outcome = train_mlp(topology, &inputs, &desired, &config)?;

    for (epoch, mse) in outcome.mse_history.iter().enumerate() {
        if epoch % 50 == 0 {
            println!("Epoch {}: mse = {mse:.6}", epoch + 1);
        }
    }
    println!("Stopped after {} epochs ({:?})", outcome.epochs(), outcome.stop_reason);

    let output = outcome.weights.predict(&inputs)?;
    println!("D =\n{}", desired.to_text(0));
    println!("Y =\n{}", output.to_text(2));

    outcome
        .weights
        .save_txt("input_hidden_weights.txt", "hidden_output_weights.txt")
        .context("writing weight dumps")?;

    Ok(())
}
