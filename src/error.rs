use std::convert::Infallible;

use thiserror::Error;

/// Errors produced while building loan terms or running the amortization engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MortgageError {
    #[error("Invalid input: {field} - {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid first payment date {value:?}: {reason}")]
    InvalidDate { value: String, reason: String },

    #[error("Unsupported payment frequency type: {0}")]
    UnsupportedFrequency(String),

    #[error("Numeric fault in {context}")]
    NumericFault { context: String },
}

impl From<Infallible> for MortgageError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

pub type MortgageResult<T> = Result<T, MortgageError>;
