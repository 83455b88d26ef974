use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong when building, querying or training a network.
///
/// None of these leave a `Network` in a half-updated state: every operation
/// validates its arguments before touching any parameter.
#[derive(Error, Debug)]
pub enum Error {
    /// A layer size given at construction was zero.
    #[error("invalid dimension: {name} must be at least 1, got {value}")]
    InvalidDimension { name: &'static str, value: usize },

    /// A vector passed at call time has the wrong length.
    #[error("dimension mismatch: {what} has length {actual}, expected {expected}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A value passed at call time is NaN or infinite.
    #[error("non-finite value in {what} at index {index}")]
    NonFinite { what: &'static str, index: usize },

    /// Learning rate was zero, negative or not finite.
    #[error("invalid learning rate {0}: must be a finite value greater than 0")]
    InvalidLearningRate(f64),

    /// Learning-rate decay factor outside (0, 1].
    #[error("invalid learning-rate decay {0}: must lie in (0, 1]")]
    InvalidDecay(f64),

    #[error("training set is empty")]
    EmptyDataset,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns `Ok(())` when `actual == expected`, otherwise a `DimensionMismatch`.
    pub(crate) fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(Error::DimensionMismatch { what, expected, actual })
        }
    }
}

/// Rejects vectors containing NaN or infinities.
pub(crate) fn check_finite(what: &'static str, values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(Error::NonFinite { what, index }),
        None => Ok(()),
    }
}

/// Learning rates must be strictly positive and finite; zero is rejected.
pub(crate) fn check_learning_rate(learning_rate: f64) -> Result<()> {
    if learning_rate.is_finite() && learning_rate > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidLearningRate(learning_rate))
    }
}
