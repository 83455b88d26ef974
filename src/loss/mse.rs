use crate::error::{Error, Result};

pub struct MseLoss;

impl MseLoss {
    /// Mean of `(predicted - expected)²` over the outputs of one sample.
    ///
    /// Callers pass slices of equal length; an empty sample has zero loss.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        if predicted.is_empty() {
            return 0.0;
        }
        Self::sum_squared(predicted, expected) / predicted.len() as f64
    }

    /// Summed squared error over all outputs of one sample.
    pub fn sum_squared(predicted: &[f64], expected: &[f64]) -> f64 {
        predicted.iter().zip(expected).map(|(a, b)| (a - b).powi(2)).sum()
    }
}

/// Root-mean-squared error over a set of samples.
///
/// Squared errors are summed across each sample's outputs and averaged over
/// the number of samples: `sqrt(Σ_s Σ_k (target - prediction)² / n_samples)`.
/// Returns 0 for an empty set. Sample counts and per-sample widths must match.
pub fn rmse(predictions: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<f64> {
    Error::check_len("targets", predictions.len(), targets.len())?;
    if predictions.is_empty() {
        return Ok(0.0);
    }
    let mut sse = 0.0;
    for (p, t) in predictions.iter().zip(targets) {
        Error::check_len("target", p.len(), t.len())?;
        sse += MseLoss::sum_squared(p, t);
    }
    Ok((sse / predictions.len() as f64).sqrt())
}
