use thiserror::Error;

/// Failure modes of the training engine.
///
/// Anything else (divergence under a large learning rate, a validation error
/// that never improves) is a normal outcome recorded in the returned state,
/// not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Two operands that must combine have inconsistent dimensions.
    #[error("shape mismatch in {op}: expected {expected_rows}x{expected_cols}, got {found_rows}x{found_cols}")]
    ShapeMismatch {
        op: &'static str,
        expected_rows: usize,
        expected_cols: usize,
        found_rows: usize,
        found_cols: usize,
    },

    /// A weight update was requested before gradients were computed.
    #[error("no gradients available: call backward() before update()")]
    NotReady,

    /// A k-fold split was requested that the sample count cannot satisfy.
    #[error("cannot partition {samples} samples into {k} folds")]
    InvalidPartition { k: usize, samples: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Builds a `ShapeMismatch` from two matrix shapes.
    pub(crate) fn shape_mismatch(
        op: &'static str,
        expected: (usize, usize),
        found: (usize, usize),
    ) -> Error {
        Error::ShapeMismatch {
            op,
            expected_rows: expected.0,
            expected_cols: expected.1,
            found_rows: found.0,
            found_cols: found.1,
        }
    }
}
