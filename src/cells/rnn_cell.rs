use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Elman RNN cell with tanh nonlinearity
///
/// Implements:
/// - h' = tanh(W_ih @ x + b_ih + W_hh @ h + b_hh)
#[derive(Module, Debug)]
pub struct RnnCell<B: Backend> {
    input_size: usize,
    hidden_size: usize,
    input_map: Linear<B>,     // W_ih, b_ih
    recurrent_map: Linear<B>, // W_hh, b_hh
}

impl<B: Backend> RnnCell<B> {
    /// Create a new RNN cell
    ///
    /// # Arguments
    /// * `input_size` - Size of the input features
    /// * `hidden_size` - Size of the hidden state
    /// * `device` - Device to create the module on
    pub fn new(input_size: usize, hidden_size: usize, device: &B::Device) -> Self {
        let input_map = LinearConfig::new(input_size, hidden_size)
            .with_bias(true)
            .init(device);

        let recurrent_map = LinearConfig::new(hidden_size, hidden_size)
            .with_bias(true)
            .init(device);

        Self {
            input_size,
            hidden_size,
            input_map,
            recurrent_map,
        }
    }

    /// Get the input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get the hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Advance the cell by one timestep
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch_size, input_size]`
    /// * `hidden_state` - Previous hidden state of shape `[batch_size, hidden_size]`
    ///
    /// # Returns
    /// New hidden state of shape `[batch_size, hidden_size]`, which is also the cell output
    pub fn forward(&self, input: Tensor<B, 2>, hidden_state: Tensor<B, 2>) -> Tensor<B, 2> {
        let input_contrib = self.input_map.forward(input);
        let recurrent_contrib = self.recurrent_map.forward(hidden_state);
        (input_contrib + recurrent_contrib).tanh()
    }
}
