use rand::Rng;
use tracing::debug;

use crate::{
    activation::activation::ActivationFunction,
    error::{check_finite, check_learning_rate, Error, Result},
    layers::dense::Layer,
    math::matrix::Matrix,
};

/// Feed-forward network with a single hidden layer, trained one sample at a
/// time by backpropagation of squared error.
///
/// `predict` borrows the network immutably and `refine` mutably, so any number
/// of concurrent readers is fine but training needs exclusive access (wrap the
/// network in a `RwLock` or `Mutex` to share it across threads).
#[derive(Debug, Clone, PartialEq)]
pub struct Network {
    hidden: Layer,
    output: Layer,
}

/// Copy of all trainable parameters at one point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    /// `hidden_size × input_size`
    pub w1: Matrix,
    pub b1: Vec<f64>,
    /// `output_size × hidden_size`
    pub w2: Matrix,
    pub b2: Vec<f64>,
}

impl Network {
    /// Builds a network with tanh on both layers.
    pub fn new<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        rng: &mut R,
    ) -> Result<Network> {
        Network::with_activations(
            input_size,
            hidden_size,
            output_size,
            ActivationFunction::Tanh,
            ActivationFunction::Tanh,
            rng,
        )
    }

    pub fn with_activations<R: Rng + ?Sized>(
        input_size: usize,
        hidden_size: usize,
        output_size: usize,
        hidden_activation: ActivationFunction,
        output_activation: ActivationFunction,
        rng: &mut R,
    ) -> Result<Network> {
        for (name, value) in [
            ("input_size", input_size),
            ("hidden_size", hidden_size),
            ("output_size", output_size),
        ] {
            if value == 0 {
                return Err(Error::InvalidDimension { name, value });
            }
        }

        let hidden = Layer::new(hidden_size, input_size, hidden_activation, rng);
        let output = Layer::new(output_size, hidden_size, output_activation, rng);
        debug!(
            input_size,
            hidden_size,
            output_size,
            ?hidden_activation,
            ?output_activation,
            "initialized network"
        );
        Ok(Network { hidden, output })
    }

    pub fn input_size(&self) -> usize {
        self.hidden.input_size()
    }

    pub fn hidden_size(&self) -> usize {
        self.hidden.size()
    }

    pub fn output_size(&self) -> usize {
        self.output.size()
    }

    pub fn hidden_activation(&self) -> ActivationFunction {
        self.hidden.activator
    }

    pub fn output_activation(&self) -> ActivationFunction {
        self.output.activator
    }

    /// Forward pass. Does not touch any parameter.
    ///
    /// Inputs must have `input_size` finite values.
    pub fn predict(&self, input: &[f64]) -> Result<Vec<f64>> {
        self.check_input(input)?;
        let (_, output) = self.forward(input);
        Ok(output)
    }

    /// One step of online gradient descent on `½ Σ (target - output)²`.
    ///
    /// All arguments are validated before anything is written, so a rejected
    /// call leaves the network exactly as it was.
    pub fn refine(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<()> {
        self.check_sample(input, target)?;
        check_learning_rate(learning_rate)?;

        let (hidden_out, output) = self.forward(input);

        // Both sets of error terms come from the pre-update weights.
        let output_deltas = self.output.output_error_terms(&output, target);
        let hidden_deltas = self
            .hidden
            .hidden_error_terms(&hidden_out, &self.output, &output_deltas);

        self.output.apply_error_terms(&output_deltas, &hidden_out, learning_rate);
        self.hidden.apply_error_terms(&hidden_deltas, input, learning_rate);
        Ok(())
    }

    /// Re-draws every parameter with the same distribution used at construction.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.hidden.randomize(rng);
        self.output.randomize(rng);
    }

    pub fn parameters(&self) -> Parameters {
        Parameters {
            w1: self.hidden.weights.clone(),
            b1: self.hidden.biases.clone(),
            w2: self.output.weights.clone(),
            b2: self.output.biases.clone(),
        }
    }

    fn check_input(&self, input: &[f64]) -> Result<()> {
        Error::check_len("input", self.input_size(), input.len())?;
        check_finite("input", input)
    }

    /// Checks that `(input, target)` is a usable training sample for this network.
    pub(crate) fn check_sample(&self, input: &[f64], target: &[f64]) -> Result<()> {
        self.check_input(input)?;
        Error::check_len("target", self.output_size(), target.len())?;
        check_finite("target", target)
    }

    /// Returns the hidden activations and the network output.
    fn forward(&self, input: &[f64]) -> (Vec<f64>, Vec<f64>) {
        let hidden_out = self.hidden.feed_from(input);
        let output = self.output.feed_from(&hidden_out);
        (hidden_out, output)
    }
}
