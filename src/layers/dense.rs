use rand::Rng;
use rand_distr::StandardNormal;

use crate::{activation::activation::ActivationFunction, math::matrix::Matrix};

/// A fully connected layer: `a = f(W·x + b)`.
///
/// `weights` has one row per neuron and one column per input.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub weights: Matrix,
    pub biases: Vec<f64>,
    pub activator: ActivationFunction,
}

impl Layer {
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let mut layer = Layer {
            weights: Matrix::zeros(size, input_size),
            biases: vec![0.0; size],
            activator: activation,
        };
        layer.randomize(rng);
        layer
    }

    /// Number of neurons.
    pub fn size(&self) -> usize {
        self.weights.rows
    }

    pub fn input_size(&self) -> usize {
        self.weights.cols
    }

    /// Standard deviation used for initialization: `max(0.3, 1 / fan_in)`.
    pub fn init_dev(&self) -> f64 {
        (1.0 / self.input_size() as f64).max(0.3)
    }

    /// Re-draws every weight, then every bias, from N(0, init_dev²).
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let dev = self.init_dev();
        self.weights.fill_normal(dev, rng);
        for b in &mut self.biases {
            *b = dev * rng.sample::<f64, _>(StandardNormal);
        }
    }

    /// Forward pass for one sample. Returns the post-activation values.
    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .mul_vec(input)
            .into_iter()
            .zip(&self.biases)
            .map(|(z, b)| self.activator.function(z + b))
            .collect()
    }

    /// Error terms of an output layer under squared error:
    /// `δ[k] = (target[k] - a[k]) * f'(a[k])`.
    pub fn output_error_terms(&self, activations: &[f64], target: &[f64]) -> Vec<f64> {
        activations
            .iter()
            .zip(target)
            .map(|(&a, &t)| (t - a) * self.activator.derivative(a))
            .collect()
    }

    /// Error terms of this layer given the layer it feeds into:
    /// `δ[j] = f'(a[j]) * Σ_k next_deltas[k] * next.weights[k][j]`.
    ///
    /// Must run before `next` is updated.
    pub fn hidden_error_terms(
        &self,
        activations: &[f64],
        next: &Layer,
        next_deltas: &[f64],
    ) -> Vec<f64> {
        next.weights
            .transpose_mul_vec(next_deltas)
            .into_iter()
            .zip(activations)
            .map(|(e, &a)| e * self.activator.derivative(a))
            .collect()
    }

    /// Gradient step in the direction of the error terms:
    /// `W[j][i] += lr * δ[j] * input[i]`, `b[j] += lr * δ[j]`.
    pub fn apply_error_terms(&mut self, deltas: &[f64], input: &[f64], learning_rate: f64) {
        self.weights.add_outer(learning_rate, deltas, input);
        for (b, d) in self.biases.iter_mut().zip(deltas) {
            *b += learning_rate * d;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn fixed_layer(activation: ActivationFunction) -> Layer {
        Layer {
            weights: Matrix {
                rows: 2,
                cols: 2,
                data: vec![vec![0.5, -0.25], vec![1.0, 0.0]],
            },
            biases: vec![0.1, -0.2],
            activator: activation,
        }
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn new_has_requested_shape() {
        let layer = Layer::new(5, 3, ActivationFunction::Tanh, &mut StdRng::seed_from_u64(1));
        assert_eq!(layer.size(), 5);
        assert_eq!(layer.input_size(), 3);
        assert_eq!(layer.biases.len(), 5);
    }

    #[test]
    fn init_dev_has_floor() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Layer::new(1, 1, ActivationFunction::Tanh, &mut rng).init_dev(), 1.0);
        assert_eq!(Layer::new(1, 2, ActivationFunction::Tanh, &mut rng).init_dev(), 0.5);
        assert_eq!(Layer::new(1, 16, ActivationFunction::Tanh, &mut rng).init_dev(), 0.3);
    }

    #[test]
    fn feed_from_applies_bias_then_activation() {
        let layer = fixed_layer(ActivationFunction::Tanh);
        let out = layer.feed_from(&[2.0, 4.0]);
        assert_close(&out, &[(0.1f64).tanh(), (1.8f64).tanh()]);
    }

    #[test]
    fn output_error_terms_use_activation_derivative() {
        let layer = fixed_layer(ActivationFunction::Sigmoid);
        let deltas = layer.output_error_terms(&[0.5, 0.25], &[1.0, 0.25]);
        assert_eq!(deltas, vec![0.5 * 0.25, 0.0]);
    }

    #[test]
    fn hidden_error_terms_flow_through_next_weights() {
        let hidden = fixed_layer(ActivationFunction::Tanh);
        let next = fixed_layer(ActivationFunction::Tanh);
        // transpose(W)·δ = [0.5*1 + 1*2, -0.25*1 + 0*2] = [2.5, -0.25]
        let deltas = hidden.hidden_error_terms(&[0.0, 0.5], &next, &[1.0, 2.0]);
        assert_eq!(deltas, vec![2.5, -0.25 * 0.75]);
    }

    #[test]
    fn apply_error_terms_moves_weights_and_biases() {
        let mut layer = fixed_layer(ActivationFunction::Tanh);
        layer.apply_error_terms(&[1.0, -1.0], &[2.0, 0.5], 0.1);
        assert_close(&layer.weights.data[0], &[0.7, -0.2]);
        assert_close(&layer.weights.data[1], &[0.8, -0.05]);
        assert_close(&layer.biases, &[0.2, -0.3]);
    }
}
