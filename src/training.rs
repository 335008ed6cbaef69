//! Per-subject sequence training
//!
//! Every epoch draws a fresh permutation of the subjects. Each subject's
//! trials are run as one sequence from a zeroed hidden state, the
//! cross-entropy over all of its timesteps is averaged into one scalar, and
//! Adam takes one step per subject.

use std::time::{Duration, Instant};

use burn::config::Config;
use burn::module::AutodiffModule;
use burn::nn::loss::CrossEntropyLossConfig;
use burn::optim::adaptor::OptimizerAdaptor;
use burn::optim::{Adam, AdamConfig, GradientsParams, Optimizer};
use burn::tensor::backend::{AutodiffBackend, Backend};
use burn::tensor::{ElementConversion, Int, Tensor};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::encoding::{argmax, INPUT_SIZE, NUM_CLASSES};
use crate::error::Error;
use crate::model::RelationalRnn;
use crate::task::Trial;

#[derive(Config, Debug)]
pub struct TrainingConfig {
    #[config(default = 100)]
    pub num_epochs: usize,
    #[config(default = 1e-3)]
    pub learning_rate: f64,
    /// Seed for subject shuffling; entropy-seeded when unset
    pub seed: Option<u64>,
}

/// Encoded inputs and target classes for one subject, in trial order
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedSubject {
    pub inputs: Vec<[f32; INPUT_SIZE]>,
    pub targets: Vec<usize>,
}

impl EncodedSubject {
    pub fn encode(trials: &[Trial]) -> crate::Result<Self> {
        let mut inputs = Vec::with_capacity(trials.len());
        let mut targets = Vec::with_capacity(trials.len());
        for trial in trials {
            inputs.push(trial.item.task.encode()?);
            targets.push(trial.response_direction()?.index());
        }
        Ok(Self { inputs, targets })
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// `[1, seq, 8]` input and `[seq]` class targets
    fn tensors<B: Backend>(&self, device: &B::Device) -> (Tensor<B, 3>, Tensor<B, 1, Int>) {
        let flat: Vec<f32> = self.inputs.iter().flatten().copied().collect();
        let input = Tensor::<B, 1>::from_floats(flat.as_slice(), device).reshape([
            1,
            self.len(),
            INPUT_SIZE,
        ]);
        let targets: Vec<i32> = self.targets.iter().map(|&t| t as i32).collect();
        let targets = Tensor::<B, 1, Int>::from_ints(targets.as_slice(), device);
        (input, targets)
    }
}

/// Encode a whole dataset up front so malformed records fail before any update.
///
/// Empty subject sequences are skipped.
pub fn encode_dataset(dataset: &[Vec<Trial>]) -> crate::Result<Vec<EncodedSubject>> {
    let mut subjects = Vec::with_capacity(dataset.len());
    for (idx, trials) in dataset.iter().enumerate() {
        if trials.is_empty() {
            tracing::warn!("Skipping empty subject sequence {}", idx);
            continue;
        }
        subjects.push(EncodedSubject::encode(trials)?);
    }
    if subjects.is_empty() {
        return Err(Error::EmptyDataset);
    }
    Ok(subjects)
}

/// Diagnostics for one epoch. They never feed back into training.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochStats {
    pub epoch: usize,
    /// Subject indices in the order they were trained this epoch
    pub order: Vec<usize>,
    pub loss_mean: f64,
    pub loss_std: f64,
    pub accuracy_mean: f64,
    pub accuracy_std: f64,
    pub elapsed: Duration,
}

pub struct Trainer<B: AutodiffBackend> {
    config: TrainingConfig,
    optim: OptimizerAdaptor<Adam, RelationalRnn<B>, B>,
    rng: StdRng,
    device: B::Device,
}

impl<B: AutodiffBackend> Trainer<B> {
    pub fn new(config: TrainingConfig, device: B::Device) -> Self {
        let optim = AdamConfig::new().with_epsilon(1e-8).init();
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            optim,
            rng,
            device,
        }
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Train `model` for `num_epochs` epochs over `subjects`.
    ///
    /// Optimizer moments persist across calls, so a second call resumes
    /// from the already-updated weights.
    pub fn fit(
        &mut self,
        mut model: RelationalRnn<B>,
        subjects: &[EncodedSubject],
        num_epochs: usize,
    ) -> crate::Result<(RelationalRnn<B>, Vec<EpochStats>)> {
        if subjects.is_empty() {
            return Err(Error::EmptyDataset);
        }
        tracing::info!(
            "Starting training: {} subjects, {} epochs",
            subjects.len(),
            num_epochs
        );

        let loss_fn = CrossEntropyLossConfig::new().init(&self.device);
        let mut history = Vec::with_capacity(num_epochs);

        for epoch in 1..=num_epochs {
            let start = Instant::now();

            let mut order: Vec<usize> = (0..subjects.len()).collect();
            order.shuffle(&mut self.rng);

            let mut losses = Vec::with_capacity(subjects.len());
            for &idx in &order {
                let (input, targets) = subjects[idx].tensors::<B>(&self.device);

                // Fresh zero state for every subject
                let (logits, _) = model.forward(input, None)?;
                let loss = loss_fn.forward(logits, targets);
                losses.push(loss.clone().into_scalar().elem::<f64>());

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = self.optim.step(self.config.learning_rate, model, grads);
            }

            let eval_model = model.valid();
            let accuracies = subjects
                .iter()
                .map(|subject| subject_accuracy(&eval_model, subject, &self.device))
                .collect::<crate::Result<Vec<f64>>>()?;

            let (loss_mean, loss_std) = mean_std(&losses);
            let (accuracy_mean, accuracy_std) = mean_std(&accuracies);
            let stats = EpochStats {
                epoch,
                order,
                loss_mean,
                loss_std,
                accuracy_mean,
                accuracy_std,
                elapsed: start.elapsed(),
            };

            tracing::info!(
                "Epoch {}/{} ({:.2}s): {:.4} ({:.4}) | acc mean: {:.2} | acc std: {:.2}",
                epoch,
                num_epochs,
                stats.elapsed.as_secs_f64(),
                stats.loss_mean,
                stats.loss_std,
                stats.accuracy_mean,
                stats.accuracy_std,
            );
            history.push(stats);
        }

        tracing::info!("Training complete");
        Ok((model, history))
    }
}

/// Fraction of a subject's trials whose argmax class matches the response.
pub fn subject_accuracy<B: Backend>(
    model: &RelationalRnn<B>,
    subject: &EncodedSubject,
    device: &B::Device,
) -> crate::Result<f64> {
    let (input, _) = subject.tensors::<B>(device);
    let (logits, _) = model.forward(input, None)?;
    let logits: Vec<f32> = logits.into_data().iter::<f32>().collect();

    let mut correct = 0usize;
    for (row, &target) in logits.chunks(NUM_CLASSES).zip(subject.targets.iter()) {
        if argmax(row)? == target {
            correct += 1;
        }
    }
    Ok(correct as f64 / subject.len() as f64)
}

/// Mean and population standard deviation
fn mean_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (f64::NAN, f64::NAN);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, var.sqrt())
}
