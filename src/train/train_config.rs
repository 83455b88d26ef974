use serde::{Deserialize, Serialize};

use crate::error::{check_learning_rate, Error, Result};

/// Hyperparameters for `train_loop`.
///
/// # Fields
/// - `epochs`:        full passes over the training data
/// - `learning_rate`: step size for the first epoch
/// - `decay`:         factor applied to the learning rate after every epoch,
///                     in (0, 1]; `1.0` keeps it constant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    pub epochs: usize,
    pub learning_rate: f64,
    pub decay: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        TrainConfig { epochs: 500, learning_rate: 0.1, decay: 0.997 }
    }
}

impl TrainConfig {
    pub fn new(epochs: usize, learning_rate: f64, decay: f64) -> Self {
        TrainConfig { epochs, learning_rate, decay }
    }

    pub fn validate(&self) -> Result<()> {
        check_learning_rate(self.learning_rate)?;
        if !(self.decay > 0.0 && self.decay <= 1.0) {
            return Err(Error::InvalidDecay(self.decay));
        }
        Ok(())
    }
}
