//! In-process clients exposing the ledger services through the SDK traits.

use std::sync::Arc;

use async_trait::async_trait;
use revenue_ledger_sdk::{
    LedgerError, LedgerOutcome, PaymentEvent, PayoutStatus, PayoutTransitionOutcome,
    RevenueLedgerClient, RevenueShareRecord, SignalEngineClient, TenantSignals,
};
use uuid::Uuid;

use super::error::DomainError;
use super::ledger::LedgerService;
use super::signals::SignalEngine;

fn log_and_convert(op: &str, e: DomainError) -> LedgerError {
    match &e {
        DomainError::Database(_) | DomainError::Corrupt(_) => {
            tracing::error!(operation = op, error = ?e, "revenue_ledger call failed");
        }
        _ => tracing::debug!(operation = op, error = %e, "revenue_ledger call rejected"),
    }
    e.into()
}

pub struct RevenueLedgerLocalClient {
    svc: Arc<LedgerService>,
}

impl RevenueLedgerLocalClient {
    #[must_use]
    pub fn new(svc: Arc<LedgerService>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl RevenueLedgerClient for RevenueLedgerLocalClient {
    async fn record_revenue_share(
        &self,
        event: PaymentEvent,
    ) -> Result<LedgerOutcome, LedgerError> {
        self.svc
            .record_revenue_share(event)
            .await
            .map_err(|e| log_and_convert("record_revenue_share", e))
    }

    async fn transition_payout(
        &self,
        record_id: Uuid,
        target: PayoutStatus,
    ) -> Result<PayoutTransitionOutcome, LedgerError> {
        self.svc
            .transition_payout(record_id, target)
            .await
            .map_err(|e| log_and_convert("transition_payout", e))
    }

    async fn get_record(&self, record_id: Uuid) -> Result<RevenueShareRecord, LedgerError> {
        self.svc
            .get_record(record_id)
            .await
            .map_err(|e| log_and_convert("get_record", e))
    }

    async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<RevenueShareRecord>, LedgerError> {
        self.svc
            .list_for_tenant(tenant_id)
            .await
            .map_err(|e| log_and_convert("list_for_tenant", e))
    }
}

pub struct SignalEngineLocalClient {
    engine: Arc<SignalEngine>,
}

impl SignalEngineLocalClient {
    #[must_use]
    pub fn new(engine: Arc<SignalEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl SignalEngineClient for SignalEngineLocalClient {
    async fn compute_signals(&self, tenant_id: Uuid) -> TenantSignals {
        self.engine.compute(tenant_id).await
    }
}
