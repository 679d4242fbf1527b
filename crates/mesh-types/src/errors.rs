//! # Error Types
//!
//! Failures of the numeric and identity primitives.

use thiserror::Error;

/// Errors raised while interpreting raw record values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypesError {
    /// An amount was required but the operation carries none.
    #[error("amount is missing")]
    AmountMissing,

    /// The amount string is not a base-10 integer.
    #[error("{value} is not an integer")]
    NotAnInteger { value: String },

    /// A record could not be rendered canonically.
    #[error("unable to serialize record: {0}")]
    Serialization(String),
}
