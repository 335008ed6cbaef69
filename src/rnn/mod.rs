//! # Sequence Layers
//!
//! [`StackedRnn`] runs a stack of [`RnnCell`](crate::cells::RnnCell)s over a
//! batch-first sequence and manages the layered hidden state.
//!
//! ## Tensor Shapes
//!
//! | Tensor | Shape |
//! |--------|-------|
//! | input | `[batch, seq_len, input_size]` |
//! | output | `[batch, seq_len, hidden_size]` |
//! | hidden state | `[num_layers, batch, hidden_size]` |
//!
//! ## Stateful Processing
//!
//! ```ignore
//! let rnn = StackedRnn::<Backend>::new(8, 64, 2, &device);
//!
//! let (out1, state) = rnn.forward(trial1, None)?;        // zero state
//! let (out2, state) = rnn.forward(trial2, Some(state))?; // continues
//! ```

pub mod elman;

pub use elman::StackedRnn;
