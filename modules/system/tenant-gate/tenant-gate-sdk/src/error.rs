//! Error types for the tenant gate.

use thiserror::Error;

/// Storage or network failure while resolving a tenant or an ownership record.
///
/// This is deliberately distinct from "not found": the gate maps it to
/// `ServiceUnavailable` and never to `NotFound` or `Allow`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("infrastructure unavailable: {message}")]
pub struct InfraError {
    message: String,
}

impl InfraError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
