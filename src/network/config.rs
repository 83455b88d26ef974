use std::path::Path;

use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{activation::activation::ActivationFunction, error::Result, network::network::Network};

/// Serializable description of a network's architecture.
///
/// This is not a model file: it carries the shape, the nonlinearities and an
/// optional seed, never trained weights. Building it twice with the same
/// `seed` yields identical networks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub input_size: usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub hidden_activation: ActivationFunction,
    pub output_activation: ActivationFunction,
    /// Seed for weight initialization; `None` draws one from OS entropy.
    pub seed: Option<u64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        NetworkConfig {
            input_size: 3,
            hidden_size: 16,
            output_size: 2,
            hidden_activation: ActivationFunction::Tanh,
            output_activation: ActivationFunction::Tanh,
            seed: None,
        }
    }
}

impl NetworkConfig {
    pub fn new(input_size: usize, hidden_size: usize, output_size: usize) -> Self {
        NetworkConfig {
            input_size,
            hidden_size,
            output_size,
            ..NetworkConfig::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Initializes a network from this description.
    pub fn build(&self) -> Result<Network> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Network::with_activations(
            self.input_size,
            self.hidden_size,
            self.output_size,
            self.hidden_activation,
            self.output_activation,
            &mut rng,
        )
    }

    /// Serializes the config to a pretty-printed JSON file.
    pub fn save_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Deserializes a config previously written by `save_json`.
    pub fn load_json(path: impl AsRef<Path>) -> Result<NetworkConfig> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
