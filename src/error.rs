//! Crate-level error type.
//!
//! Every fallible library operation returns [`IdentificationError`]. Its
//! [`kind`](IdentificationError::kind) gives a stable short name that callers
//! report together with the input that caused it.

use crate::output::OutputError;
use crate::table::TableError;

/// Errors that can occur while identifying target compounds
#[derive(Debug, thiserror::Error)]
pub enum IdentificationError {
    /// A required column is missing or holds a value of the wrong type
    #[error("Input schema error: {0}")]
    InputSchema(#[from] TableError),

    /// The inputs make intensity normalization undefined
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// Tolerance configuration is not strictly positive and finite
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A match edge does not index into the supplied tables
    #[error("Match edge (peak {peak_index}, target {target_index}) is out of bounds")]
    EdgeOutOfBounds {
        /// Row index of the peak
        peak_index: usize,
        /// Row index of the target
        target_index: usize,
    },

    /// Error from a result table writer
    #[error("Output error: {0}")]
    Output(#[from] OutputError),
}

impl IdentificationError {
    /// Stable short name of the error kind, suitable for user-facing reports
    pub fn kind(&self) -> &'static str {
        match self {
            IdentificationError::InputSchema(_) => "InputSchemaError",
            IdentificationError::DegenerateInput(_) => "DegenerateInputError",
            IdentificationError::InvalidConfig(_) => "InvalidConfigError",
            IdentificationError::EdgeOutOfBounds { .. } => "EdgeOutOfBoundsError",
            IdentificationError::Output(_) => "OutputError",
        }
    }
}
