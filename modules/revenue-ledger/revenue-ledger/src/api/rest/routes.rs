use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::{Extension, Router};

use super::handlers;
use crate::domain::ledger::LedgerService;
use crate::domain::signals::SignalEngine;

/// Operator routes. Mount behind the access gate; `/api/platform` is
/// restricted to platform owners there.
#[must_use]
pub fn router(ledger: Arc<LedgerService>, signals: Arc<SignalEngine>) -> Router {
    Router::new()
        .route(
            "/api/platform/revenue-shares/{id}",
            get(handlers::get_record),
        )
        .route(
            "/api/platform/revenue-shares/{id}/payout",
            post(handlers::transition_payout),
        )
        .route(
            "/api/platform/tenants/{tenant_id}/revenue-shares",
            get(handlers::list_revenue_shares),
        )
        .route(
            "/api/platform/tenants/{tenant_id}/reseller",
            put(handlers::bind_reseller),
        )
        .route(
            "/api/platform/tenants/{tenant_id}/signals",
            post(handlers::compute_signals).get(handlers::churn_history),
        )
        .layer(Extension(ledger))
        .layer(Extension(signals))
}
