//! Error types for the cleaning stages.
//!
//! Data-quality problems that can be repaired never surface here; they are
//! imputed and reported through the metrics sink. A `CleanError` aborts the
//! whole batch.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CleanError {
    /// The contract field was null when the guard ran
    #[error("Null value found in '{column}' feature")]
    NullContract {
        /// Name of the contract column
        column: String,
    },

    /// A non-empty value could not be read as a number.
    #[error("Could not convert '{value}' in column '{column}' to a number")]
    InvalidNumber { column: String, value: String },

    /// A stage found a field absent that an earlier stage should have filled
    #[error("Field '{column}' is missing")]
    MissingField { column: String },

    #[error("'{column}' column not found in the header")]
    LeadingColumnNotFound { column: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
