use platform_api::Problem;

use crate::domain::error::DomainError;

/// Convert domain errors to problem responses. Storage details stay in the
/// logs.
pub fn domain_error_to_problem(err: DomainError) -> Problem {
    match err {
        DomainError::Database(_) | DomainError::Corrupt(_) => {
            tracing::error!(error = %err, "Revenue ledger request failed");
            Problem::service_unavailable("Ledger storage is unavailable")
        }
        DomainError::NotFound => Problem::not_found("Revenue share not found"),
        DomainError::Validation { field, message } => {
            Problem::bad_request(format!("Invalid {field}: {message}"))
        }
        DomainError::Conflict(message) => Problem::conflict(message),
    }
}

impl From<DomainError> for Problem {
    fn from(e: DomainError) -> Self {
        domain_error_to_problem(e)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_generic() {
        let p = domain_error_to_problem(DomainError::Database(sea_orm::DbErr::Custom(
            "connection refused at 10.0.0.5".to_owned(),
        )));
        assert_eq!(p.status, 503);
        assert!(!p.detail.contains("10.0.0.5"));
    }

    #[test]
    fn business_errors_keep_their_status() {
        assert_eq!(domain_error_to_problem(DomainError::NotFound).status, 404);
        assert_eq!(
            domain_error_to_problem(DomainError::validation("status", "bad")).status,
            400
        );
        assert_eq!(
            domain_error_to_problem(DomainError::Conflict("already paid".to_owned())).status,
            409
        );
    }
}
