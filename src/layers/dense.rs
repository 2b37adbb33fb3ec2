use rand::Rng;

use crate::{activation::ActivationFunction, math::Matrix};

#[derive(Debug, Clone)]
pub struct Layer {
    pub size: usize,
    pub input_size: usize,
    /// Shape `[input_size, size]`.
    pub weights: Matrix,
    /// Shape `[1, size]`.
    pub biases: Matrix,
    pub activator: ActivationFunction,
    /// Probability of zeroing each output during training. 0 disables dropout.
    pub dropout: f64,
}

/// Values cached by a training-mode forward pass through one layer.
#[derive(Debug, Clone)]
pub(crate) struct LayerTrace {
    /// Pre-activation `z = xW + b`.
    pub z: Vec<f64>,
    /// Activation before the dropout mask.
    pub a: Vec<f64>,
    /// Per-output dropout scale: 0 for dropped units, `1 / (1 - p)` for kept.
    /// Empty when dropout is off.
    pub mask: Vec<f64>,
    /// Output handed to the next layer (`a` scaled by `mask`).
    pub output: Vec<f64>,
}

impl Layer {
    /// Builds a layer with fan-in scaled random weights and zero biases.
    pub fn new<R: Rng + ?Sized>(
        size: usize,
        input_size: usize,
        activation: ActivationFunction,
        rng: &mut R,
    ) -> Layer {
        let weights = if activation.prefers_he_init() {
            Matrix::he(input_size, size, rng)
        } else {
            Matrix::xavier(input_size, size, rng)
        };

        Layer {
            size,
            input_size,
            weights,
            biases: Matrix::zeros(1, size),
            activator: activation,
            dropout: 0.0,
        }
    }

    /// Inference pass: `activation(xW + b)`. Caller guarantees
    /// `input.len() == self.input_size`.
    pub fn feed_from(&self, input: &[f64]) -> Vec<f64> {
        let z = self.pre_activation(input);
        self.activator.apply(&z)
    }

    fn pre_activation(&self, input: &[f64]) -> Vec<f64> {
        self.weights
            .left_mul(input)
            .into_iter()
            .zip(self.biases.data[0].iter())
            .map(|(x, b)| x + b)
            .collect()
    }

    /// Training pass; samples a fresh dropout mask when dropout is enabled.
    pub(crate) fn feed_traced<R: Rng + ?Sized>(&self, input: &[f64], rng: &mut R) -> LayerTrace {
        let z = self.pre_activation(input);
        let a = self.activator.apply(&z);

        if self.dropout <= 0.0 {
            return LayerTrace { output: a.clone(), z, a, mask: Vec::new() };
        }

        let keep = 1.0 - self.dropout;
        let mask: Vec<f64> = (0..self.size)
            .map(|_| if rng.gen::<f64>() < keep { 1.0 / keep } else { 0.0 })
            .collect();
        let output = a.iter().zip(mask.iter()).map(|(x, m)| x * m).collect();
        LayerTrace { z, a, mask, output }
    }

    /// Computes `(weights_grad, biases_grad, input_delta)` for one sample.
    ///
    /// `output_delta` is ∂L/∂output for this layer (after dropout) and
    /// `inputs` is what the layer was fed. `input_delta` is ∂L/∂input,
    /// the upstream gradient for the previous layer.
    pub(crate) fn compute_gradients(
        &self,
        trace: &LayerTrace,
        output_delta: &[f64],
        inputs: &[f64],
    ) -> (Matrix, Matrix, Vec<f64>) {
        let masked: Vec<f64>;
        let upstream = if trace.mask.is_empty() {
            output_delta
        } else {
            masked = output_delta.iter().zip(trace.mask.iter()).map(|(g, m)| g * m).collect();
            &masked
        };

        // δ = ∂L/∂z
        let layer_delta = self.activator.backward(&trace.z, &trace.a, upstream);

        let weights_grad = Matrix::outer(inputs, &layer_delta);
        // ∂L/∂x = δ · Wᵀ
        let input_delta = self.weights.transpose().left_mul(&layer_delta);
        let biases_grad = Matrix::row(layer_delta);

        (weights_grad, biases_grad, input_delta)
    }

    /// Applies pre-computed update steps scaled by `lr`.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights.sub_scaled(weights_grad, lr);
        self.biases.sub_scaled(biases_grad, lr);
    }
}
