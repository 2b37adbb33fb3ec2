use super::Optimizer;
use crate::{layers::Layer, math::Matrix};

/// Gradient descent with momentum:
///
/// ```text
/// v := μ·v + g
/// p := p − lr·v
/// ```
///
/// Velocities are kept per layer index and start at zero.
#[derive(Debug, Clone)]
pub struct Momentum {
    pub learning_rate: f64,
    pub momentum: f64,
    velocity: Vec<Option<(Matrix, Matrix)>>,
}

impl Momentum {
    pub fn new(learning_rate: f64, momentum: f64) -> Momentum {
        Momentum { learning_rate, momentum, velocity: Vec::new() }
    }
}

impl Optimizer for Momentum {
    fn step(&mut self, index: usize, layer: &mut Layer, weights_grad: &Matrix, biases_grad: &Matrix) {
        if self.velocity.len() <= index {
            self.velocity.resize(index + 1, None);
        }

        let mu = self.momentum;
        let (v_w, v_b) = self.velocity[index].get_or_insert_with(|| {
            (
                Matrix::zeros(weights_grad.rows, weights_grad.cols),
                Matrix::zeros(biases_grad.rows, biases_grad.cols),
            )
        });

        *v_w = v_w.map(|x| mu * x);
        *v_w += weights_grad;
        *v_b = v_b.map(|x| mu * x);
        *v_b += biases_grad;

        layer.apply_gradients(v_w, v_b, self.learning_rate);
    }
}
