use serde::{Deserialize, Serialize};

/// Per-epoch training statistics returned by `train_loop`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Learning rate used for every step of this epoch.
    pub learning_rate: f64,
    /// Mean per-sample MSE over the training set, measured after the epoch.
    pub train_loss: f64,
}
