use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::loss::mse::MseLoss;
use crate::network::network::Network;
use crate::train::epoch_stats::EpochStats;
use crate::train::train_config::TrainConfig;

const LOG_EVERY: usize = 50;

/// Trains `network` online for `config.epochs` epochs over a fixed dataset.
///
/// Each epoch visits every sample exactly once in a freshly shuffled order,
/// calling `Network::refine` per sample, then decays the learning rate by
/// `config.decay`. The rate stops decaying once another step would take it
/// below the smallest normal `f64`. Returns one `EpochStats` per epoch.
///
/// The whole dataset is validated up front, so an error means the network has
/// not been touched.
pub fn train_loop<R: Rng + ?Sized>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[Vec<f64>],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>> {
    config.validate()?;
    if inputs.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Error::check_len("labels", inputs.len(), labels.len())?;
    for (input, label) in inputs.iter().zip(labels) {
        network.check_sample(input, label)?;
    }

    let mut indices: Vec<usize> = (0..inputs.len()).collect();
    let mut learning_rate = config.learning_rate;
    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        indices.shuffle(rng);
        for &idx in &indices {
            network.refine(&inputs[idx], &labels[idx], learning_rate)?;
        }

        let train_loss = eval_loss(network, inputs, labels)?;
        if epoch % LOG_EVERY == 0 {
            debug!(epoch, learning_rate, train_loss, "epoch finished");
        }
        history.push(EpochStats { epoch, learning_rate, train_loss });

        let decayed = learning_rate * config.decay;
        if decayed.is_normal() {
            learning_rate = decayed;
        }
    }

    if let Some(last) = history.last() {
        info!(epochs = last.epoch, train_loss = last.train_loss, "training finished");
    }
    Ok(history)
}

/// Mean per-sample MSE over a dataset without updating anything.
pub fn eval_loss(network: &Network, inputs: &[Vec<f64>], labels: &[Vec<f64>]) -> Result<f64> {
    Error::check_len("labels", inputs.len(), labels.len())?;
    if inputs.is_empty() {
        return Ok(0.0);
    }
    let mut total = 0.0;
    for (input, label) in inputs.iter().zip(labels) {
        let output = network.predict(input)?;
        Error::check_len("target", output.len(), label.len())?;
        total += MseLoss::loss(&output, label);
    }
    Ok(total / inputs.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn xor() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
        let inputs = vec![
            vec![0.0, 0.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
            vec![1.0, 1.0],
        ];
        let labels = vec![vec![-0.8], vec![0.8], vec![0.8], vec![-0.8]];
        (inputs, labels)
    }

    /// Final training loss after fitting XOR from a network seeded with `seed`.
    fn xor_final_loss(seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut network = Network::new(2, 6, 1, &mut rng).unwrap();
        let (inputs, labels) = xor();
        let config = TrainConfig::new(2_000, 0.2, 1.0);

        let history = train_loop(&mut network, &inputs, &labels, &config, &mut rng).unwrap();
        history[history.len() - 1].train_loss
    }

    #[test]
    fn learns_xor_from_most_seeds() {
        // Some initializations saturate into a local minimum; most do not.
        let losses: Vec<f64> = (0..10).map(xor_final_loss).collect();
        let converged = losses.iter().filter(|&&l| l < 0.05).count();
        assert!(converged >= 6, "only {converged}/10 seeds converged: {losses:?}");
    }

    #[test]
    fn default_config_runs_every_epoch() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut network = Network::new(2, 4, 1, &mut rng).unwrap();
        let (inputs, labels) = xor();

        let history =
            train_loop(&mut network, &inputs, &labels, &TrainConfig::default(), &mut rng).unwrap();

        assert_eq!(history.len(), 500);
        assert!(history.iter().all(|s| s.train_loss.is_finite()));
    }

    #[test]
    fn learning_rate_decays_each_epoch() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut network = Network::new(2, 3, 1, &mut rng).unwrap();
        let (inputs, labels) = xor();
        let config = TrainConfig::new(3, 0.2, 0.5);

        let history = train_loop(&mut network, &inputs, &labels, &config, &mut rng).unwrap();

        let rates: Vec<f64> = history.iter().map(|s| s.learning_rate).collect();
        assert_eq!(rates, vec![0.2, 0.1, 0.05]);
        assert_eq!(history.iter().map(|s| s.epoch).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn learning_rate_stops_decaying_before_zero() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut network = Network::new(2, 3, 1, &mut rng).unwrap();
        let (inputs, labels) = xor();
        let config = TrainConfig::new(200, 0.1, 1e-3);

        let history =
            train_loop(&mut network, &inputs[..2], &labels[..2], &config, &mut rng).unwrap();

        assert_eq!(history.len(), 200);
        assert!(history.iter().all(|s| s.learning_rate.is_normal() && s.learning_rate > 0.0));
        let last = history[history.len() - 1].learning_rate;
        assert!(last * config.decay < f64::MIN_POSITIVE);
    }

    #[test]
    fn non_finite_sample_is_rejected_before_training() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut network = Network::new(2, 3, 1, &mut rng).unwrap();
        let before = network.parameters();
        let (inputs, mut labels) = xor();
        labels[2] = vec![f64::NAN];

        let result = train_loop(&mut network, &inputs, &labels, &TrainConfig::default(), &mut rng);

        assert!(matches!(result, Err(Error::NonFinite { what: "target", index: 0 })));
        assert_eq!(network.parameters(), before);
    }

    #[test]
    fn bad_dataset_leaves_network_untouched() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut network = Network::new(2, 3, 1, &mut rng).unwrap();
        let before = network.parameters();
        let (inputs, mut labels) = xor();

        labels[3] = vec![0.0, 0.0];
        let result = train_loop(&mut network, &inputs, &labels, &TrainConfig::default(), &mut rng);
        assert!(matches!(result, Err(Error::DimensionMismatch { what: "target", .. })));

        labels.pop();
        let result = train_loop(&mut network, &inputs, &labels, &TrainConfig::default(), &mut rng);
        assert!(matches!(result, Err(Error::DimensionMismatch { what: "labels", .. })));

        let result = train_loop(&mut network, &[], &[], &TrainConfig::default(), &mut rng);
        assert!(matches!(result, Err(Error::EmptyDataset)));

        assert_eq!(network.parameters(), before);
    }

    #[test]
    fn eval_loss_does_not_mutate() {
        let mut rng = StdRng::seed_from_u64(4);
        let network = Network::new(2, 3, 1, &mut rng).unwrap();
        let (inputs, labels) = xor();
        let a = eval_loss(&network, &inputs, &labels).unwrap();
        let b = eval_loss(&network, &inputs, &labels).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn eval_loss_rejects_mismatched_labels() {
        let mut rng = StdRng::seed_from_u64(7);
        let network = Network::new(2, 3, 1, &mut rng).unwrap();
        let (inputs, mut labels) = xor();

        let result = eval_loss(&network, &inputs, &labels[..3]);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch { what: "labels", expected: 4, actual: 3 })
        ));

        labels[1] = vec![0.8, 0.8];
        let result = eval_loss(&network, &inputs, &labels);
        assert!(matches!(
            result,
            Err(Error::DimensionMismatch { what: "target", expected: 1, actual: 2 })
        ));
    }
}
