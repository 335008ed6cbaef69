//! Evaluation-harness adapter
//!
//! [`SpatialRnnModel`] owns the network, the optimizer, and the hidden state
//! carried between predictions. Calling [`CognitiveModel::predict`] advances
//! that state, so one instance should serve one subject or session at a time;
//! call [`SpatialRnnModel::reset`] before starting another.

use burn::backend::{Autodiff, NdArray};
use burn::module::AutodiffModule;
use burn::tensor::backend::AutodiffBackend;
use burn::tensor::Tensor;

use crate::encoding::{argmax, decode_output};
use crate::error::Result;
use crate::model::{RelationalRnn, RelationalRnnConfig};
use crate::task::{Item, Prediction, SubjectSequence};
use crate::training::{encode_dataset, EpochStats, Trainer, TrainingConfig};

/// Harness domain served by this model
pub const DOMAIN: &str = "spatial-relational";

/// Harness response type produced by this model
pub const RESPONSE_TYPE: &str = "single-choice";

/// Default CPU backend
pub type DefaultBackend = Autodiff<NdArray<f32>>;

/// Capability interface consumed by the evaluation harness
pub trait CognitiveModel {
    fn name(&self) -> &str;

    /// Train on a dataset of subject sequences.
    fn pre_train(&mut self, dataset: &[SubjectSequence]) -> Result<()>;

    /// Predict the response to one item.
    fn predict(&mut self, item: &Item) -> Result<Prediction>;
}

/// Network mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Training,
    Inference,
}

pub struct SpatialRnnModel<B: AutodiffBackend = DefaultBackend> {
    name: String,
    k: usize,
    mode: Mode,
    net: RelationalRnn<B>,
    /// Gradient-free copy used while in inference mode
    eval_net: Option<RelationalRnn<B::InnerBackend>>,
    hidden: Option<Tensor<B::InnerBackend, 3>>,
    trainer: Trainer<B>,
    history: Vec<EpochStats>,
    device: B::Device,
}

impl<B: AutodiffBackend> SpatialRnnModel<B> {
    /// Create a model with the default network and training configuration.
    ///
    /// `k` is accepted for harness compatibility and otherwise unused.
    pub fn new(name: impl Into<String>, k: usize, device: B::Device) -> Result<Self> {
        Self::with_config(
            name,
            k,
            RelationalRnnConfig::new(),
            TrainingConfig::new(),
            device,
        )
    }

    pub fn with_config(
        name: impl Into<String>,
        k: usize,
        net_config: RelationalRnnConfig,
        training_config: TrainingConfig,
        device: B::Device,
    ) -> Result<Self> {
        let net = net_config.init::<B>(&device)?;
        let trainer = Trainer::new(training_config, device.clone());
        Ok(Self {
            name: name.into(),
            k,
            mode: Mode::Training,
            net,
            eval_net: None,
            hidden: None,
            trainer,
            history: Vec::new(),
            device,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Diagnostics of every epoch trained so far
    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    pub fn network(&self) -> &RelationalRnn<B> {
        &self.net
    }

    /// Hidden state carried into the next prediction, if any
    pub fn hidden(&self) -> Option<&Tensor<B::InnerBackend, 3>> {
        self.hidden.as_ref()
    }

    /// Forget the hidden state carried between predictions.
    pub fn reset(&mut self) {
        self.hidden = None;
    }

    /// Switch to training mode. Drops the inference copy and the carried state.
    pub fn train_mode(&mut self) {
        self.mode = Mode::Training;
        self.eval_net = None;
        self.hidden = None;
    }

    /// Switch to inference mode, snapshotting the current weights.
    pub fn eval_mode(&mut self) {
        if self.mode == Mode::Inference && self.eval_net.is_some() {
            return;
        }
        self.eval_net = Some(self.net.valid());
        self.mode = Mode::Inference;
    }

    /// Train for `num_epochs` epochs, continuing from the current weights.
    pub fn train(&mut self, dataset: &[SubjectSequence], num_epochs: usize) -> Result<()> {
        let subjects = encode_dataset(dataset)?;
        self.train_mode();

        let (net, history) = self.trainer.fit(self.net.clone(), &subjects, num_epochs)?;
        self.net = net;
        self.history.extend(history);
        Ok(())
    }
}

impl Default for SpatialRnnModel<DefaultBackend> {
    fn default() -> Self {
        Self::new("RNN", 1, Default::default())
            .expect("default network widths match the direction encoding")
    }
}

impl<B: AutodiffBackend> CognitiveModel for SpatialRnnModel<B> {
    fn name(&self) -> &str {
        &self.name
    }

    fn pre_train(&mut self, dataset: &[SubjectSequence]) -> Result<()> {
        let num_epochs = self.trainer.config().num_epochs;
        self.train(dataset, num_epochs)?;
        self.eval_mode();
        Ok(())
    }

    fn predict(&mut self, item: &Item) -> Result<Prediction> {
        let input = item.task.encode()?;
        let trailing_field = item.task.trailing_field()?.to_string();
        let first_subfield = item.task.first_subfield()?.to_string();

        if self.mode == Mode::Training {
            tracing::debug!("Predicting from training mode; switching to inference");
            self.eval_mode();
        }
        let net = self.eval_net.get_or_insert_with(|| self.net.valid());

        let (logits, hidden) = net.step(input, self.hidden.clone(), &self.device)?;
        self.hidden = Some(hidden);

        let direction = decode_output(argmax(&logits)?)?;
        tracing::debug!("Predicted {} for {:?}", direction, item.task.premises());

        Ok(Prediction {
            direction,
            trailing_field,
            first_subfield,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::Direction;
    use crate::error::Error;
    use crate::task::Trial;

    fn quick_model() -> SpatialRnnModel<DefaultBackend> {
        SpatialRnnModel::with_config(
            "RNN",
            1,
            RelationalRnnConfig::new(),
            TrainingConfig::new().with_num_epochs(2).with_seed(Some(3)),
            Default::default(),
        )
        .unwrap()
    }

    fn item(first: &str, second: &str) -> Item {
        Item::new([[first, "A", "B"], [second, "B", "C"]])
    }

    #[test]
    fn test_default_model() {
        let model = SpatialRnnModel::<DefaultBackend>::default();
        assert_eq!(model.name(), "RNN");
        assert_eq!(model.k(), 1);
        assert_eq!(model.mode(), Mode::Training);
        assert!(model.hidden().is_none());
        assert!(model.history().is_empty());

        let config = RelationalRnnConfig::new();
        assert_eq!(model.network().num_layers(), config.num_layers);
        assert_eq!(model.network().hidden_size(), config.hidden_size);
    }

    #[test]
    fn test_pre_train_leaves_inference_mode() {
        let mut model = quick_model();
        let dataset = vec![vec![Trial::from_directions(
            Direction::North,
            Direction::East,
            Direction::South,
        )]];

        model.pre_train(&dataset).unwrap();
        assert_eq!(model.mode(), Mode::Inference);
        assert_eq!(model.history().len(), 2);
    }

    #[test]
    fn test_predict_carries_hidden_state() {
        let mut model = quick_model();
        assert!(model.hidden().is_none());

        model.predict(&item("north", "east")).unwrap();
        let hidden = model.hidden().expect("state after predict").clone();
        assert_eq!(hidden.dims(), [2, 1, 64]);

        model.predict(&item("north", "east")).unwrap();
        let advanced = model.hidden().unwrap().clone();
        let diff: f32 = (advanced - hidden).abs().sum().into_scalar();
        assert!(diff > 0.0, "second predict should advance the state");

        model.reset();
        assert!(model.hidden().is_none());
    }

    #[test]
    fn test_reset_reproduces_first_prediction() {
        let mut model = quick_model();
        let query = item("south-west", "north");

        let first = model.predict(&query).unwrap();
        model.predict(&item("east", "east")).unwrap();
        model.reset();
        let again = model.predict(&query).unwrap();

        assert_eq!(first, again);
    }

    #[test]
    fn test_predict_rejects_unknown_label() {
        let mut model = quick_model();
        let result = model.predict(&item("north", "sideways"));
        assert_eq!(result, Err(Error::UnknownLabel("sideways".to_string())));
        assert!(model.hidden().is_none(), "failed predict must not touch state");
    }

    #[test]
    fn test_train_mode_clears_state() {
        let mut model = quick_model();
        model.predict(&item("north", "east")).unwrap();
        assert_eq!(model.mode(), Mode::Inference);

        model.train_mode();
        assert_eq!(model.mode(), Mode::Training);
        assert!(model.hidden().is_none());
    }
}
