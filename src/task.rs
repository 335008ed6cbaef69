//! Harness records
//!
//! A task is a list of premises such as
//! `[["north", "A", "B"], ["east", "B", "C"]]`: the first field of each
//! premise is a direction label, the rest are object names passed through
//! unchanged.

use serde::{Deserialize, Serialize};

use crate::encoding::{encode_pair, Direction, INPUT_SIZE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Task(pub Vec<Vec<String>>);

impl Task {
    pub fn premises(&self) -> &[Vec<String>] {
        &self.0
    }

    /// Direction labels of the first two premises
    pub fn cue_directions(&self) -> Result<(Direction, Direction)> {
        let first = self.field(0, 0)?.parse()?;
        let second = self.field(1, 0)?.parse()?;
        Ok((first, second))
    }

    /// Network input for this task
    pub fn encode(&self) -> Result<[f32; INPUT_SIZE]> {
        let (a, b) = self.cue_directions()?;
        Ok(encode_pair(a, b))
    }

    /// Last field of the last premise
    pub fn trailing_field(&self) -> Result<&str> {
        self.0
            .last()
            .and_then(|premise| premise.last())
            .map(String::as_str)
            .ok_or_else(|| Error::MalformedTask("task has no trailing field".to_string()))
    }

    /// Second field of the first premise
    pub fn first_subfield(&self) -> Result<&str> {
        self.field(0, 1)
    }

    fn field(&self, premise: usize, index: usize) -> Result<&str> {
        self.0
            .get(premise)
            .and_then(|p| p.get(index))
            .map(String::as_str)
            .ok_or_else(|| {
                Error::MalformedTask(format!(
                    "missing field {index} of premise {premise} in {:?}",
                    self.0
                ))
            })
    }
}

impl<S: Into<String>, const N: usize, const M: usize> From<[[S; N]; M]> for Task {
    fn from(premises: [[S; N]; M]) -> Self {
        Task(
            premises
                .into_iter()
                .map(|p| p.into_iter().map(Into::into).collect())
                .collect(),
        )
    }
}

/// One task instance presented to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub task: Task,
}

impl Item {
    pub fn new(task: impl Into<Task>) -> Self {
        Self { task: task.into() }
    }
}

/// A training record: an item and the subject's observed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    pub item: Item,
    pub response: Vec<Vec<String>>,
}

impl Trial {
    pub fn new(item: Item, response: Vec<Vec<String>>) -> Self {
        Self { item, response }
    }

    /// Build a trial from two cue directions and a response direction,
    /// using placeholder object names.
    pub fn from_directions(first: Direction, second: Direction, response: Direction) -> Self {
        let item = Item::new([
            [first.as_str(), "A", "B"],
            [second.as_str(), "B", "C"],
        ]);
        Self::new(
            item,
            vec![vec![response.as_str().to_string(), "A".into(), "C".into()]],
        )
    }

    /// Observed response direction, `response[0][0]`
    pub fn response_direction(&self) -> Result<Direction> {
        self.response
            .first()
            .and_then(|r| r.first())
            .ok_or_else(|| Error::MalformedTask("response has no direction".to_string()))?
            .parse()
    }
}

/// Ordered trials of one subject
pub type SubjectSequence = Vec<Trial>;

/// Result of a single prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub direction: Direction,
    pub trailing_field: String,
    pub first_subfield: String,
}

impl Prediction {
    /// Harness triple `[direction, trailing_field, first_subfield]`
    pub fn into_list(self) -> [String; 3] {
        [
            self.direction.to_string(),
            self.trailing_field,
            self.first_subfield,
        ]
    }
}
