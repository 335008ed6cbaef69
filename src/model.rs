//! Recurrent direction classifier
//!
//! A [`StackedRnn`] followed by a linear head that maps every timestep's
//! hidden representation to one logit per direction class.

use burn::config::Config;
use burn::module::Module;
use burn::nn::{Linear, LinearConfig};
use burn::tensor::backend::Backend;
use burn::tensor::Tensor;

use crate::encoding::{INPUT_SIZE, NUM_CLASSES};
use crate::error::Error;
use crate::rnn::StackedRnn;

#[derive(Config, Debug)]
pub struct RelationalRnnConfig {
    #[config(default = 8)]
    pub input_size: usize,
    #[config(default = 64)]
    pub hidden_size: usize,
    #[config(default = 8)]
    pub output_size: usize,
    #[config(default = 2)]
    pub num_layers: usize,
}

impl RelationalRnnConfig {
    /// Build the network. The input and output widths are fixed by the
    /// direction encoding.
    pub fn init<B: Backend>(&self, device: &B::Device) -> crate::Result<RelationalRnn<B>> {
        if self.input_size != INPUT_SIZE {
            return Err(Error::shape(
                format!("input_size {INPUT_SIZE}"),
                format!("input_size {}", self.input_size),
            ));
        }
        if self.output_size != NUM_CLASSES {
            return Err(Error::shape(
                format!("output_size {NUM_CLASSES}"),
                format!("output_size {}", self.output_size),
            ));
        }

        let rnn = StackedRnn::new(self.input_size, self.hidden_size, self.num_layers, device);
        let fc = LinearConfig::new(self.hidden_size, self.output_size).init(device);

        Ok(RelationalRnn {
            rnn,
            fc,
            output_size: self.output_size,
        })
    }
}

#[derive(Module, Debug)]
pub struct RelationalRnn<B: Backend> {
    rnn: StackedRnn<B>,
    fc: Linear<B>,
    output_size: usize,
}

impl<B: Backend> RelationalRnn<B> {
    pub fn num_layers(&self) -> usize {
        self.rnn.num_layers()
    }

    pub fn hidden_size(&self) -> usize {
        self.rnn.hidden_size()
    }

    /// Zero hidden state `[num_layers, batch_size, hidden_size]`
    pub fn init_hidden(&self, batch_size: usize, device: &B::Device) -> Tensor<B, 3> {
        self.rnn.init_hidden(batch_size, device)
    }

    /// Run the network over `input` of shape `[batch, seq, 8]`.
    ///
    /// `state = None` starts from a zeroed hidden state. Logits come back
    /// flattened to `[batch * seq, 8]`, one row per timestep.
    pub fn forward(
        &self,
        input: Tensor<B, 3>,
        state: Option<Tensor<B, 3>>,
    ) -> crate::Result<(Tensor<B, 2>, Tensor<B, 3>)> {
        let (out, hidden) = self.rnn.forward(input, state)?;
        let [batch_size, seq_len, hidden_size] = out.dims();

        let out = out.reshape([batch_size * seq_len, hidden_size]);
        let logits = self.fc.forward(out);

        Ok((logits, hidden))
    }

    /// Classify a single input vector, continuing from `state`.
    ///
    /// Returns the 8 logits and the advanced hidden state.
    pub fn step(
        &self,
        input: [f32; INPUT_SIZE],
        state: Option<Tensor<B, 3>>,
        device: &B::Device,
    ) -> crate::Result<(Vec<f32>, Tensor<B, 3>)> {
        let x = Tensor::<B, 1>::from_floats(input.as_slice(), device).reshape([1, 1, INPUT_SIZE]);
        let (logits, hidden) = self.forward(x, state)?;

        let logits: Vec<f32> = logits.into_data().iter::<f32>().collect();
        if logits.len() != self.output_size {
            return Err(Error::shape(
                format!("[{}]", self.output_size),
                format!("[{}]", logits.len()),
            ));
        }
        Ok((logits, hidden))
    }
}
