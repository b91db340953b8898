//! Domain errors for the tenant gate.

use sea_orm::DbErr;
use tenant_gate_sdk::InfraError;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("session token rejected: {0}")]
    InvalidToken(String),

    #[error("session token could not be signed: {0}")]
    TokenSigning(String),
}

impl From<jsonwebtoken::errors::Error> for DomainError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::InvalidToken(e.to_string())
    }
}

impl From<DomainError> for InfraError {
    fn from(e: DomainError) -> Self {
        // Callers only see that the store could not answer.
        match e {
            DomainError::Database(_) => Self::new("tenant store unavailable"),
            DomainError::InvalidToken(_) | DomainError::TokenSigning(_) => {
                Self::new("session service unavailable")
            }
        }
    }
}
