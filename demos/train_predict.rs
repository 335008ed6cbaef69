//! Train and Predict Demo
//!
//! Trains the recurrent predictor on a few synthetic subjects and replays one
//! subject's trials through `predict`, showing how the hidden state carries
//! context between calls.
//!
//! Run with `RUST_LOG=info` to see per-epoch diagnostics.

use spatial_rnn::prelude::*;
use tracing_subscriber::EnvFilter;

/// Responses that follow the "compose both premises" rule, e.g.
/// north + east -> north-east.
fn compose(a: Direction, b: Direction) -> Direction {
    let [n1, e1, s1, w1] = a.input_code();
    let [n2, e2, s2, w2] = b.input_code();
    let vertical = ((n1 + n2) - (s1 + s2)) as i32;
    let horizontal = ((e1 + e2) - (w1 + w2)) as i32;
    match (vertical.signum(), horizontal.signum()) {
        (1, 1) => Direction::NorthEast,
        (1, -1) => Direction::NorthWest,
        (1, _) => Direction::North,
        (-1, 1) => Direction::SouthEast,
        (-1, -1) => Direction::SouthWest,
        (-1, _) => Direction::South,
        (_, 1) => Direction::East,
        (_, -1) => Direction::West,
        // Opposite premises cancel out
        _ => a,
    }
}

fn synthetic_subject(offset: usize) -> SubjectSequence {
    (0..16)
        .map(|i| {
            let a = Direction::ALL[(i + offset) % 8];
            let b = Direction::ALL[(i * 3 + offset) % 8];
            Trial::from_directions(a, b, compose(a, b))
        })
        .collect()
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Spatial RNN Demo ===\n");

    let dataset: Vec<SubjectSequence> = (0..6).map(synthetic_subject).collect();
    println!(
        "Dataset: {} subjects x {} trials",
        dataset.len(),
        dataset[0].len()
    );

    let mut model = SpatialRnnModel::<DefaultBackend>::with_config(
        "RNN",
        1,
        RelationalRnnConfig::new(),
        TrainingConfig::new().with_num_epochs(30).with_seed(Some(42)),
        Default::default(),
    )?;

    model.pre_train(&dataset)?;
    if let Some(last) = model.history().last() {
        println!(
            "Final epoch: loss {:.4} ({:.4}), accuracy {:.2} ({:.2})",
            last.loss_mean, last.loss_std, last.accuracy_mean, last.accuracy_std
        );
    }
    println!();

    println!("Replaying subject 0:");
    let mut correct = 0;
    for trial in &dataset[0] {
        let truth = trial.response_direction()?;
        let prediction = model.predict(&trial.item)?;
        if prediction.direction == truth {
            correct += 1;
        }
        println!(
            "  {:?} -> {:?} (observed {})",
            trial.item.task.premises(),
            prediction.clone().into_list(),
            truth
        );
    }
    println!("  {}/{} correct", correct, dataset[0].len());

    // Start a fresh session before the next subject
    model.reset();

    println!("\n=== Demo completed! ===");
    Ok(())
}
