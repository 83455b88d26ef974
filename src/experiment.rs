//! The reference regression task used to check that training converges.
//!
//! Inputs are drawn from `U(0, 1)³`; the two targets are the mean of the
//! inputs and `in[0] * in[1] - in[2]`.

use std::path::Path;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::{check_learning_rate, Error, Result},
    loss::mse::rmse,
    network::{config::NetworkConfig, network::Network},
};

pub const INPUT_SIZE: usize = 3;
pub const OUTPUT_SIZE: usize = 2;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub network: NetworkConfig,
    /// Number of online `refine` calls, one fresh sample each.
    pub steps: usize,
    pub learning_rate: f64,
    /// Fresh samples used for the final RMSE.
    pub test_samples: usize,
    /// Seed for the sample stream. Network initialization uses `network.seed`.
    pub seed: u64,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            network: NetworkConfig::new(INPUT_SIZE, 16, OUTPUT_SIZE).with_seed(0),
            steps: 100_000,
            learning_rate: 0.02,
            test_samples: 100,
            seed: 0,
        }
    }
}

impl ExperimentConfig {
    pub fn load_json(path: impl AsRef<Path>) -> Result<ExperimentConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub steps: usize,
    pub rmse: f64,
}

/// Draws one `(input, target)` pair of the reference task.
pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    let input: Vec<f64> = (0..INPUT_SIZE).map(|_| rng.gen::<f64>()).collect();
    let target = vec![
        (input[0] + input[1] + input[2]) / 3.0,
        input[0] * input[1] - input[2],
    ];
    (input, target)
}

/// Builds the network, trains it and reports test RMSE.
pub fn run(config: &ExperimentConfig) -> Result<ExperimentReport> {
    let mut network = config.network.build()?;
    run_with(&mut network, config)
}

/// Trains an existing network on the reference task and reports test RMSE.
pub fn run_with(network: &mut Network, config: &ExperimentConfig) -> Result<ExperimentReport> {
    Error::check_len("network input", INPUT_SIZE, network.input_size())?;
    Error::check_len("network output", OUTPUT_SIZE, network.output_size())?;
    check_learning_rate(config.learning_rate)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    for _ in 0..config.steps {
        let (input, target) = sample(&mut rng);
        network.refine(&input, &target, config.learning_rate)?;
    }

    let mut predictions = Vec::with_capacity(config.test_samples);
    let mut targets = Vec::with_capacity(config.test_samples);
    for _ in 0..config.test_samples {
        let (input, target) = sample(&mut rng);
        predictions.push(network.predict(&input)?);
        targets.push(target);
    }

    let report = ExperimentReport {
        steps: config.steps,
        rmse: rmse(&predictions, &targets)?,
    };
    info!(steps = report.steps, rmse = report.rmse, "experiment finished");
    Ok(report)
}
