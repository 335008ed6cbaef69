//! End-to-end tests for the harness adapter

use burn::backend::NdArray;
use burn::module::AutodiffModule;
use burn::tensor::Tensor;
use spatial_rnn::prelude::*;

fn quick_model(epochs: usize) -> SpatialRnnModel<DefaultBackend> {
    SpatialRnnModel::with_config(
        "RNN",
        1,
        RelationalRnnConfig::new(),
        TrainingConfig::new()
            .with_num_epochs(epochs)
            .with_seed(Some(2020)),
        Default::default(),
    )
    .unwrap()
}

fn two_trial_dataset() -> Vec<SubjectSequence> {
    vec![vec![
        Trial::from_directions(Direction::North, Direction::East, Direction::South),
        Trial::from_directions(Direction::West, Direction::South, Direction::NorthEast),
    ]]
}

#[test]
fn test_two_trial_scenario() {
    let mut model = quick_model(10);
    model.pre_train(&two_trial_dataset()).unwrap();
    assert_eq!(model.mode(), Mode::Inference);

    let item = Item::new([["north", "A", "B"], ["east", "B", "C"]]);
    let list = model.predict(&item).unwrap().into_list();

    assert_eq!(list.len(), 3);
    assert!(list[0].parse::<Direction>().is_ok(), "{} is not a direction", list[0]);
    assert_eq!(list[1], "C");
    assert_eq!(list[2], "A");
}

#[test]
fn test_second_train_resumes() {
    let mut model = quick_model(2);
    let dataset = two_trial_dataset();
    let device = Default::default();
    let input = Tensor::<NdArray<f32>, 3>::ones([1, 1, 8], &device);
    let logits = |model: &SpatialRnnModel| -> Vec<f32> {
        let (out, _) = model.network().valid().forward(input.clone(), None).unwrap();
        out.into_data().iter::<f32>().collect()
    };

    model.train(&dataset, 2).unwrap();
    let trained = logits(&model);

    // A zero-epoch call must neither re-initialise nor touch the weights
    model.train(&dataset, 0).unwrap();
    assert_eq!(logits(&model), trained);
    assert_eq!(model.history().len(), 2);

    model.train(&dataset, 2).unwrap();
    assert_ne!(logits(&model), trained);

    assert_eq!(model.mode(), Mode::Training);
    let epochs: Vec<usize> = model.history().iter().map(|s| s.epoch).collect();
    assert_eq!(epochs, vec![1, 2, 1, 2]);
}

#[test]
fn test_malformed_records_fail_before_training() {
    let mut model = quick_model(1);
    let mut dataset = two_trial_dataset();
    dataset[0][1].response = vec![vec!["up".to_string()]];

    assert_eq!(
        model.pre_train(&dataset),
        Err(Error::UnknownLabel("up".to_string()))
    );
    assert!(model.history().is_empty());
}

#[test]
fn test_empty_dataset() {
    let mut model = quick_model(1);
    assert_eq!(model.pre_train(&[]), Err(Error::EmptyDataset));
}

#[test]
fn test_reset_starts_new_session() {
    let mut trained = quick_model(3);
    trained.pre_train(&two_trial_dataset()).unwrap();

    let item = Item::new([["north-west", "A", "B"], ["south", "B", "C"]]);

    let first = trained.predict(&item).unwrap();
    trained.reset();
    let second = trained.predict(&item).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_json_records() {
    let json = r#"[
        [
            {"item": {"task": [["north", "A", "B"], ["east", "B", "C"]]},
             "response": [["south", "A", "C"]]},
            {"item": {"task": [["west", "A", "B"], ["south", "B", "C"]]},
             "response": [["north-east", "A", "C"]]}
        ]
    ]"#;
    let dataset: Vec<SubjectSequence> = serde_json::from_str(json).unwrap();
    assert_eq!(dataset, two_trial_dataset());

    let mut model = quick_model(1);
    model.pre_train(&dataset).unwrap();

    let item: Item =
        serde_json::from_str(r#"{"task": [["west", "X", "Y"], ["south", "Y", "Z"]]}"#).unwrap();
    let prediction = model.predict(&item).unwrap();
    assert_eq!(prediction.trailing_field, "Z");
    assert_eq!(prediction.first_subfield, "X");
}
