//! Stacked Elman RNN Layer
//!
//! Runs a stack of [`RnnCell`]s over a batch-first sequence. Each layer feeds
//! its hidden state to the layer above; the top layer's state is the output
//! at every timestep.

use crate::cells::RnnCell;
use crate::error::{Error, Result};
use burn::module::Module;
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

/// Multi-layer tanh RNN
///
/// Hidden state shape is `[num_layers, batch, hidden_size]`.
#[derive(Module, Debug)]
pub struct StackedRnn<B: Backend> {
    /// One cell per layer, bottom first
    cells: Vec<RnnCell<B>>,
    input_size: usize,
    hidden_size: usize,
}

impl<B: Backend> StackedRnn<B> {
    /// Create a new stacked RNN layer
    ///
    /// # Arguments
    /// * `input_size` - Number of input features
    /// * `hidden_size` - Number of hidden units per layer
    /// * `num_layers` - Number of stacked layers
    /// * `device` - Device to create the module on
    pub fn new(
        input_size: usize,
        hidden_size: usize,
        num_layers: usize,
        device: &B::Device,
    ) -> Self {
        let cells = (0..num_layers)
            .map(|layer| {
                let layer_input = if layer == 0 { input_size } else { hidden_size };
                RnnCell::new(layer_input, hidden_size, device)
            })
            .collect();

        Self {
            cells,
            input_size,
            hidden_size,
        }
    }

    /// Get input size
    pub fn input_size(&self) -> usize {
        self.input_size
    }

    /// Get hidden size
    pub fn hidden_size(&self) -> usize {
        self.hidden_size
    }

    /// Get number of stacked layers
    pub fn num_layers(&self) -> usize {
        self.cells.len()
    }

    /// Zero hidden state of shape `[num_layers, batch_size, hidden_size]`
    pub fn init_hidden(&self, batch_size: usize, device: &B::Device) -> Tensor<B, 3> {
        Tensor::zeros([self.num_layers(), batch_size, self.hidden_size], device)
    }

    /// Forward pass through every layer and timestep
    ///
    /// # Arguments
    /// * `input` - Input tensor of shape `[batch, seq, input_size]`
    /// * `state` - Optional initial hidden state `[num_layers, batch, hidden_size]`;
    ///   zeros when `None`
    ///
    /// # Returns
    /// Tuple of (output, final_state) where:
    /// - output: `[batch, seq, hidden_size]`, top-layer state at each timestep
    /// - final_state: `[num_layers, batch, hidden_size]`
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<Tensor<B, 3>>,
    ) -> Result<(Tensor<B, 3>, Tensor<B, 3>)> {
        let device = input.device();
        let [batch_size, seq_len, features] = input.dims();

        if features != self.input_size || seq_len == 0 {
            return Err(Error::shape(
                format!("[batch, seq >= 1, {}]", self.input_size),
                format!("{:?}", input.dims()),
            ));
        }

        let state = match state {
            Some(state) => {
                let expected = [self.num_layers(), batch_size, self.hidden_size];
                if state.dims() != expected {
                    return Err(Error::shape(
                        format!("{:?}", expected),
                        format!("{:?}", state.dims()),
                    ));
                }
                state
            }
            None => self.init_hidden(batch_size, &device),
        };

        // Split [layers, batch, hidden] into per-layer [batch, hidden]
        let mut hidden: Vec<Tensor<B, 2>> = (0..self.num_layers())
            .map(|layer| {
                state
                    .clone()
                    .narrow(0, layer, 1)
                    .reshape([batch_size, self.hidden_size])
            })
            .collect();

        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq_len);

        for t in 0..seq_len {
            // input[batch, t, features] -> [batch, features]
            let mut x = input
                .clone()
                .narrow(1, t, 1)
                .reshape([batch_size, self.input_size]);

            for (cell, h) in self.cells.iter().zip(hidden.iter_mut()) {
                *h = cell.forward(x, h.clone());
                x = h.clone();
            }

            outputs.push(x);
        }

        let output = Tensor::stack(outputs, 1); // [batch, seq, hidden]
        let final_state = Tensor::stack(hidden, 0); // [layers, batch, hidden]
        Ok((output, final_state))
    }
}
