use revenue_ledger_sdk::LedgerError;
use sea_orm::DbErr;

#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),

    #[error("stored row is inconsistent: {0}")]
    Corrupt(String),

    #[error("revenue share not found")]
    NotFound,

    #[error("invalid {field}: {message}")]
    Validation { field: String, message: String },

    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<DomainError> for LedgerError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Database(_) | DomainError::Corrupt(_) => {
                Self::infra("ledger storage unavailable")
            }
            DomainError::NotFound => Self::NotFound,
            DomainError::Validation { field, message } => Self::validation(field, message),
            DomainError::Conflict(msg) => Self::conflict(msg),
        }
    }
}
