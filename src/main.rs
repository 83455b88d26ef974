// Runs the reference regression experiment and prints the test RMSE.
//
//   cargo run --release                 # built-in defaults
//   cargo run --release -- config.json  # ExperimentConfig as JSON
//
// Log verbosity follows RUST_LOG (default: info).
use backprop_net::{experiment, ExperimentConfig};
use tracing_subscriber::EnvFilter;

fn main() -> backprop_net::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ExperimentConfig::load_json(path)?,
        None => ExperimentConfig::default(),
    };

    let report = experiment::run(&config)?;
    println!(
        "{}-{}-{} network, {} steps at lr {}: test RMSE = {:.5}",
        config.network.input_size,
        config.network.hidden_size,
        config.network.output_size,
        report.steps,
        config.learning_rate,
        report.rmse
    );
    Ok(())
}
