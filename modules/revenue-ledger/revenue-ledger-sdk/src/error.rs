use thiserror::Error;

/// Errors from the revenue ledger.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    /// Storage failed. Nothing was written.
    #[error("ledger storage unavailable: {0}")]
    Infra(String),

    /// The request itself is malformed.
    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    /// The record is in a terminal state other than the one requested.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("revenue share not found")]
    NotFound,
}

impl LedgerError {
    pub fn infra(message: impl Into<String>) -> Self {
        Self::Infra(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }
}
