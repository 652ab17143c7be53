use crate::{activation::Activation, math::matrix::Matrix};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Dense {
    pub size: usize,
    pub weights: Matrix,
    pub biases: Matrix,
    pub activation: Activation,
    /// Last activation output a = f(z); cached for backprop.
    #[serde(skip)]
    pub outputs: Matrix,
    // pre-activation values (z = Wx + b) needed for correct derivative
    #[serde(skip)]
    pre_outputs: Matrix,
}

impl Dense {
    /// New layer with `size` units fed by `fan_in` inputs. Weight init is
    /// keyed on the activation: He before ReLU, Xavier otherwise.
    pub fn new(size: usize, fan_in: usize, activation: Activation) -> Dense {
        let weights = match activation {
            Activation::ReLU => Matrix::he(fan_in, size, fan_in),
            _ => Matrix::xavier(fan_in, size, fan_in),
        };
        Dense {
            size,
            weights,
            biases: Matrix::zeros(1, size),
            activation,
            outputs: Matrix::zeros(1, size),
            pre_outputs: Matrix::zeros(1, size),
        }
    }

    pub fn feed_from(&mut self, input: &[f64]) -> Vec<f64> {
        let x = Matrix::row(input.to_vec());
        let z = &(&x * &self.weights) + &self.biases;
        let a = z.map(|v| self.activation.apply(v));
        self.pre_outputs = z;
        self.outputs = a.clone();
        a.data
    }

    /// Computes gradient adjustments. Returns (weights_grad, biases_grad).
    /// `delta` is ∂L/∂a for this layer (error in activation space).
    pub fn gradients(&self, delta: &Matrix, inputs: &Matrix) -> (Matrix, Matrix) {
        // Use pre-activation z so derivative(z) is evaluated at the right point.
        let act_derivative = self.pre_outputs.map(|x| self.activation.derivative(x));
        let layer_delta = delta.hadamard(&act_derivative);

        let weights_grad = &inputs.transpose() * &layer_delta;
        (weights_grad, layer_delta)
    }

    /// Applies pre-computed gradients scaled by lr.
    pub fn apply_gradients(&mut self, weights_grad: &Matrix, biases_grad: &Matrix, lr: f64) {
        self.weights = &self.weights - &weights_grad.map(|x| x * lr);
        self.biases = &self.biases - &biases_grad.map(|x| x * lr);
    }
}
