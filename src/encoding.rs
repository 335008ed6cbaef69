//! Direction vocabulary and the fixed vector encodings used by the network
//!
//! Every conversion between a direction label and a numeric vector goes
//! through the static tables in this module, so training and inference
//! always agree on the mapping.
//!
//! | Direction | Input bits `[N, E, S, W]` | Class index |
//! |-----------|---------------------------|-------------|
//! | north-west | `[1, 0, 0, 1]` | 0 |
//! | north | `[1, 0, 0, 0]` | 1 |
//! | north-east | `[1, 1, 0, 0]` | 2 |
//! | west | `[0, 0, 0, 1]` | 3 |
//! | east | `[0, 1, 0, 0]` | 4 |
//! | south-west | `[0, 0, 1, 1]` | 5 |
//! | south | `[0, 0, 1, 0]` | 6 |
//! | south-east | `[0, 1, 1, 0]` | 7 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Width of a single-direction input code
pub const DIRECTION_BITS: usize = 4;

/// Width of a full input vector (two concatenated directions)
pub const INPUT_SIZE: usize = 2 * DIRECTION_BITS;

/// Number of output classes
pub const NUM_CLASSES: usize = 8;

/// One of the eight cardinal and intercardinal compass labels.
///
/// The discriminant is the class index used by the one-hot output encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    West = 3,
    East = 4,
    SouthWest = 5,
    South = 6,
    SouthEast = 7,
}

/// Input codes, indexed by class index.
const INPUT_CODES: [[f32; DIRECTION_BITS]; NUM_CLASSES] = [
    [1.0, 0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 0.0],
    [0.0, 0.0, 1.0, 1.0],
    [0.0, 0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0, 0.0],
];

impl Direction {
    /// All directions in class-index order
    pub const ALL: [Direction; NUM_CLASSES] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Class index of this direction in the one-hot output encoding
    pub fn index(self) -> usize {
        self as usize
    }

    /// Direction for a class index
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or(Error::IndexOutOfRange(index))
    }

    /// Harness label, e.g. `"north-east"`
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::NorthWest => "north-west",
            Direction::North => "north",
            Direction::NorthEast => "north-east",
            Direction::West => "west",
            Direction::East => "east",
            Direction::SouthWest => "south-west",
            Direction::South => "south",
            Direction::SouthEast => "south-east",
        }
    }

    /// 4-bit input code
    pub fn input_code(self) -> [f32; DIRECTION_BITS] {
        INPUT_CODES[self.index()]
    }

    /// One-hot output code
    pub fn one_hot(self) -> [f32; NUM_CLASSES] {
        let mut code = [0.0; NUM_CLASSES];
        code[self.index()] = 1.0;
        code
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(label: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|dir| dir.as_str() == label)
            .ok_or_else(|| Error::UnknownLabel(label.to_string()))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encodes a pair of direction labels into the 8-element network input.
///
/// The result is `dir_a`'s 4-bit code followed by `dir_b`'s.
///
/// # Example
///
/// ```rust
/// use spatial_rnn::encoding::encode_input;
///
/// let x = encode_input("north", "east").unwrap();
/// assert_eq!(x, [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
/// ```
pub fn encode_input(dir_a: &str, dir_b: &str) -> Result<[f32; INPUT_SIZE]> {
    let a: Direction = dir_a.parse()?;
    let b: Direction = dir_b.parse()?;
    Ok(encode_pair(a, b))
}

/// Typed counterpart of [`encode_input`]
pub fn encode_pair(a: Direction, b: Direction) -> [f32; INPUT_SIZE] {
    let mut code = [0.0; INPUT_SIZE];
    code[..DIRECTION_BITS].copy_from_slice(&a.input_code());
    code[DIRECTION_BITS..].copy_from_slice(&b.input_code());
    code
}

/// Encodes a direction label as its one-hot class vector.
pub fn encode_output(dir: &str) -> Result<[f32; NUM_CLASSES]> {
    Ok(dir.parse::<Direction>()?.one_hot())
}

/// Class index of a direction label.
pub fn index_of(dir: &str) -> Result<usize> {
    Ok(dir.parse::<Direction>()?.index())
}

/// Inverse of the class-index assignment of [`encode_output`].
pub fn decode_output(index: usize) -> Result<Direction> {
    Direction::from_index(index)
}

/// Index of the largest value. Ties resolve to the lowest index.
pub fn argmax(values: &[f32]) -> Result<usize> {
    if values.is_empty() {
        return Err(Error::shape("non-empty vector", "[0]"));
    }
    let mut best = 0;
    for (i, &v) in values.iter().enumerate().skip(1) {
        if v > values[best] {
            best = i;
        }
    }
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_all_directions() {
        for dir in Direction::ALL {
            let idx = index_of(dir.as_str()).unwrap();
            assert_eq!(decode_output(idx).unwrap(), dir);
        }
    }

    #[test]
    fn test_one_hot_is_stable() {
        for dir in Direction::ALL {
            let first = encode_output(dir.as_str()).unwrap();
            let second = encode_output(dir.as_str()).unwrap();
            assert_eq!(first, second);
            assert_eq!(first.iter().sum::<f32>(), 1.0);
            assert_eq!(first[dir.index()], 1.0);
        }
    }

    #[test]
    fn test_fixed_class_order() {
        let labels: Vec<&str> = Direction::ALL.iter().map(|d| d.as_str()).collect();
        assert_eq!(
            labels,
            [
                "north-west",
                "north",
                "north-east",
                "west",
                "east",
                "south-west",
                "south",
                "south-east"
            ]
        );
    }

    #[test]
    fn test_encode_input_concrete() {
        let x = encode_input("north", "east").unwrap();
        assert_eq!(x, [1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_unknown_label() {
        assert_eq!(
            encode_input("north", "up"),
            Err(Error::UnknownLabel("up".to_string()))
        );
        assert!(matches!(encode_output("North"), Err(Error::UnknownLabel(_))));
        assert!(matches!(index_of(""), Err(Error::UnknownLabel(_))));
    }

    #[test]
    fn test_decode_out_of_range() {
        assert_eq!(decode_output(8), Err(Error::IndexOutOfRange(8)));
    }

    #[test]
    fn test_argmax_ties_take_lowest_index() {
        assert_eq!(argmax(&[0.0, 2.0, 2.0, 1.0]).unwrap(), 1);
        assert_eq!(argmax(&[5.0; 8]).unwrap(), 0);
        assert!(argmax(&[]).is_err());
    }
}
