use serde::{Deserialize, Serialize};

/// Saturating element-wise nonlinearities a layer can apply.
///
/// Both variants are bounded, so every network output lies strictly inside
/// [`ActivationFunction::range`] for finite pre-activations of moderate size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivationFunction {
    /// Hyperbolic tangent, range (-1, 1).
    #[default]
    Tanh,
    /// Logistic sigmoid `1 / (1 + e^-x)`, range (0, 1).
    Sigmoid,
}

impl ActivationFunction {
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Sigmoid => 1.0 / (1.0 + (-x).exp()),
        }
    }

    /// Derivative expressed in terms of the activation's own output `a = f(z)`.
    ///
    /// Backprop only keeps post-activation values, so `f'(z)` is rebuilt from
    /// `a`: `1 - a²` for tanh and `a(1 - a)` for sigmoid.
    pub fn derivative(&self, a: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => 1.0 - a * a,
            ActivationFunction::Sigmoid => a * (1.0 - a),
        }
    }

    /// Open interval `(low, high)` the activation maps into.
    pub fn range(&self) -> (f64, f64) {
        match self {
            ActivationFunction::Tanh => (-1.0, 1.0),
            ActivationFunction::Sigmoid => (0.0, 1.0),
        }
    }
}
