//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug, PartialEq)]
pub enum CoreError {
    /// An observation of unexpected length was given to a model.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Length the model was built for.
        expected: usize,
        /// Length of the given observation.
        actual: usize,
    },

    /// An action index outside of the action set.
    #[error("Action index {index} is out of range (number of actions = {n_actions})")]
    ActionOutOfRange {
        /// The given index.
        index: usize,
        /// The number of actions.
        n_actions: usize,
    },

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
