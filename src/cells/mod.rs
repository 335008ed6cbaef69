//! # Recurrent Cells
//!
//! Single-timestep cells. The stacked layer in [`crate::rnn`] drives them
//! over whole sequences; use a cell directly only when you need to manage
//! state yourself.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape | Description |
//! |--------|-------|-------------|
//! | `input` | `[batch, input_size]` | Input features |
//! | `hidden_state` | `[batch, hidden_size]` | Previous hidden state |
//! | output | `[batch, hidden_size]` | New hidden state |
//!
//! ## Example
//!
//! ```ignore
//! use spatial_rnn::cells::RnnCell;
//! use burn::tensor::Tensor;
//!
//! let cell = RnnCell::<Backend>::new(8, 64, &device);
//! let h = Tensor::<Backend, 2>::zeros([1, 64], &device);
//! let h = cell.forward(input, h);
//! ```

pub mod rnn_cell;

pub use rnn_cell::RnnCell;
