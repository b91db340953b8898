//! Rendering of non-`Allow` decisions.

use axum::response::{IntoResponse, Redirect, Response};
use http::StatusCode;
use platform_api::Problem;
use tenant_gate_sdk::AccessDecision;

/// Redirect targets for the browser surface.
#[derive(Debug, Clone)]
pub struct RedirectTargets {
    pub login_path: String,
    pub billing_path: String,
}

/// Turn a denial into a response. `original` is the requested path and
/// query, carried to the login page as `next`.
///
/// Bodies are generic: nothing about why a tenant did not match, or which
/// binding failed, reaches the client.
#[must_use]
pub fn decision_response(
    decision: AccessDecision,
    original: &str,
    targets: &RedirectTargets,
) -> Response {
    match decision {
        AccessDecision::RedirectLogin => {
            let location = format!(
                "{}?next={}",
                targets.login_path,
                urlencoding::encode(original)
            );
            Redirect::to(&location).into_response()
        }
        AccessDecision::RedirectBilling => Redirect::to(&targets.billing_path).into_response(),
        AccessDecision::Unauthorized => Problem::new(
            StatusCode::UNAUTHORIZED,
            "Unauthorized",
            "Authentication required",
        )
        .into_response(),
        AccessDecision::PaymentRequired => Problem::new(
            StatusCode::PAYMENT_REQUIRED,
            "Payment Required",
            "Subscription is not active",
        )
        .into_response(),
        AccessDecision::Forbidden => {
            Problem::new(StatusCode::FORBIDDEN, "Forbidden", "Access denied").into_response()
        }
        AccessDecision::NotFound => Problem::not_found("Resource not found").into_response(),
        AccessDecision::ServiceUnavailable => {
            Problem::service_unavailable("Service temporarily unavailable").into_response()
        }
        // Allow never reaches here; answering 500 keeps the match total.
        AccessDecision::Allow => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use http::header;

    fn targets() -> RedirectTargets {
        RedirectTargets {
            login_path: "/login".to_owned(),
            billing_path: "/billing".to_owned(),
        }
    }

    #[test]
    fn login_redirect_carries_encoded_next() {
        let resp = decision_response(
            AccessDecision::RedirectLogin,
            "/dashboard?tab=orders&x=1",
            &targets(),
        );
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            resp.headers().get(header::LOCATION).unwrap(),
            "/login?next=%2Fdashboard%3Ftab%3Dorders%26x%3D1"
        );
    }

    #[test]
    fn billing_redirect() {
        let resp = decision_response(AccessDecision::RedirectBilling, "/dashboard", &targets());
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers().get(header::LOCATION).unwrap(), "/billing");
    }

    #[test]
    fn api_denials_map_to_statuses() {
        let cases = [
            (AccessDecision::Unauthorized, StatusCode::UNAUTHORIZED),
            (AccessDecision::PaymentRequired, StatusCode::PAYMENT_REQUIRED),
            (AccessDecision::Forbidden, StatusCode::FORBIDDEN),
            (AccessDecision::NotFound, StatusCode::NOT_FOUND),
            (
                AccessDecision::ServiceUnavailable,
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (decision, status) in cases {
            let resp = decision_response(decision, "/api/x", &targets());
            assert_eq!(resp.status(), status, "{decision}");
        }
    }
}
