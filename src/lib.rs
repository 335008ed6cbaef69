//! # spatial-rnn
//!
//! Recurrent-network predictor of spatial-relational reasoning responses,
//! built on the Burn framework.
//!
//! Each trial presents two compass-direction premises. Their 4-bit codes are
//! concatenated into an 8-element input, a two-layer tanh RNN carries context
//! across a subject's trials, and a linear head scores the eight possible
//! response directions.
//!
//! ## Modules
//!
//! - [`encoding`]: direction vocabulary and the shared input/output tables
//! - [`cells`] / [`rnn`]: the recurrent cell and the stacked sequence layer
//! - [`model`]: network with its linear output head
//! - [`training`]: per-subject sequence training with Adam
//! - [`harness`]: `pre_train` / `predict` adapter with explicit hidden-state reset
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_rnn::encoding::{argmax, decode_output, encode_input, Direction};
//!
//! let x = encode_input("north", "east").unwrap();
//! assert_eq!(x, [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
//!
//! let class = argmax(&[0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0]).unwrap();
//! assert_eq!(decode_output(class).unwrap(), Direction::East);
//! ```
//!
//! ## Training and Prediction
//!
//! ```ignore
//! use spatial_rnn::prelude::*;
//!
//! let mut model = SpatialRnnModel::<DefaultBackend>::new("RNN", 1, Default::default())?;
//! model.pre_train(&dataset)?;
//!
//! let prediction = model.predict(&item)?;   // advances hidden state
//! model.reset();                            // next subject
//! ```

pub mod cells;
pub mod encoding;
pub mod error;
pub mod harness;
pub mod model;
pub mod rnn;
pub mod task;
pub mod training;

pub use error::{Error, Result};

pub mod prelude {
    pub use crate::cells::RnnCell;
    pub use crate::encoding::{
        argmax, decode_output, encode_input, encode_output, index_of, Direction,
    };
    pub use crate::error::{Error, Result};
    pub use crate::harness::{CognitiveModel, DefaultBackend, Mode, SpatialRnnModel};
    pub use crate::model::{RelationalRnn, RelationalRnnConfig};
    pub use crate::rnn::StackedRnn;
    pub use crate::task::{Item, Prediction, SubjectSequence, Task, Trial};
    pub use crate::training::{EpochStats, Trainer, TrainingConfig};
}
