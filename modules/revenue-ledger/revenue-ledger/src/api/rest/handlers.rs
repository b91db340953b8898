use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use platform_api::ApiResult;
use revenue_ledger_sdk::{ChurnSignal, PayoutTransitionOutcome, RevenueShareRecord, TenantSignals};
use tracing::info;
use uuid::Uuid;

use super::dto::{BindResellerRequest, HistoryQuery, PayoutRequest, ResellerBindingDto};
use crate::domain::ledger::LedgerService;
use crate::domain::signals::SignalEngine;

const DEFAULT_HISTORY_LIMIT: u64 = 20;
const MAX_HISTORY_LIMIT: u64 = 100;

#[tracing::instrument(skip_all, fields(record_id = %id))]
pub async fn transition_payout(
    Extension(svc): Extension<Arc<LedgerService>>,
    Path(id): Path<Uuid>,
    Json(body): Json<PayoutRequest>,
) -> ApiResult<Json<PayoutTransitionOutcome>> {
    info!(target_status = %body.status, "Payout transition requested");
    Ok(Json(svc.transition_payout(id, body.status).await?))
}

#[tracing::instrument(skip_all, fields(record_id = %id))]
pub async fn get_record(
    Extension(svc): Extension<Arc<LedgerService>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<RevenueShareRecord>> {
    Ok(Json(svc.get_record(id).await?))
}

#[tracing::instrument(skip_all, fields(tenant_id = %tenant_id))]
pub async fn list_revenue_shares(
    Extension(svc): Extension<Arc<LedgerService>>,
    Path(tenant_id): Path<Uuid>,
) -> ApiResult<Json<Vec<RevenueShareRecord>>> {
    Ok(Json(svc.list_for_tenant(tenant_id).await?))
}

#[tracing::instrument(skip_all, fields(tenant_id = %tenant_id))]
pub async fn bind_reseller(
    Extension(svc): Extension<Arc<LedgerService>>,
    Path(tenant_id): Path<Uuid>,
    Json(body): Json<BindResellerRequest>,
) -> ApiResult<Json<ResellerBindingDto>> {
    let binding = svc
        .bind_reseller(tenant_id, body.reseller_id, body.commission_rate_bps)
        .await?;
    Ok(Json(binding.into()))
}

#[tracing::instrument(skip_all, fields(tenant_id = %tenant_id))]
pub async fn compute_signals(
    Extension(engine): Extension<Arc<SignalEngine>>,
    Path(tenant_id): Path<Uuid>,
) -> Json<TenantSignals> {
    Json(engine.compute(tenant_id).await)
}

#[tracing::instrument(skip_all, fields(tenant_id = %tenant_id))]
pub async fn churn_history(
    Extension(engine): Extension<Arc<SignalEngine>>,
    Path(tenant_id): Path<Uuid>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<ChurnSignal>>> {
    let limit = query
        .limit
        .unwrap_or(DEFAULT_HISTORY_LIMIT)
        .clamp(1, MAX_HISTORY_LIMIT);
    Ok(Json(engine.history(tenant_id, limit).await?))
}
