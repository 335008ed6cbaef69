use thiserror::Error;

/// Errors raised while encoding records, running the network, or training.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("unknown direction label: {0:?}")]
    UnknownLabel(String),

    #[error("class index {0} out of range (expected 0..=7)")]
    IndexOutOfRange(usize),

    #[error("shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },

    #[error("malformed task: {0}")]
    MalformedTask(String),

    #[error("dataset contains no usable subject sequences")]
    EmptyDataset,
}

impl Error {
    pub(crate) fn shape(expected: impl ToString, actual: impl ToString) -> Self {
        Error::ShapeMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownLabel("up".to_string());
        assert!(err.to_string().contains("unknown direction label"));
        assert!(err.to_string().contains("up"));

        let err = Error::IndexOutOfRange(9);
        assert!(err.to_string().contains("9"));

        let err = Error::shape("[batch, seq, 8]", "[1, 1, 7]");
        assert!(err.to_string().contains("expected [batch, seq, 8]"));
        assert!(err.to_string().contains("got [1, 1, 7]"));

        assert!(Error::EmptyDataset.to_string().contains("no usable"));
    }
}
