use async_trait::async_trait;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{
    LedgerOutcome, PaymentEvent, PayoutStatus, PayoutTransitionOutcome, RevenueShareRecord,
    TenantSignals,
};

/// The revenue-share ledger.
#[async_trait]
pub trait RevenueLedgerClient: Send + Sync {
    /// Record the reseller commission for a verified payment event.
    ///
    /// Safe to call any number of times for the same event: at most one
    /// record exists per `(tenant_id, invoice_id)`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Validation`] for an empty invoice id or an inverted
    /// period; [`LedgerError::Infra`] when storage fails.
    async fn record_revenue_share(&self, event: PaymentEvent)
    -> Result<LedgerOutcome, LedgerError>;

    /// Settle a pending record as `Paid` or `Failed`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`], [`LedgerError::Conflict`] when the record
    /// already settled differently, [`LedgerError::Validation`] for a
    /// `Pending` target, [`LedgerError::Infra`] when storage fails.
    async fn transition_payout(
        &self,
        record_id: Uuid,
        target: PayoutStatus,
    ) -> Result<PayoutTransitionOutcome, LedgerError>;

    /// # Errors
    ///
    /// [`LedgerError::NotFound`] or [`LedgerError::Infra`].
    async fn get_record(&self, record_id: Uuid) -> Result<RevenueShareRecord, LedgerError>;

    /// Records of one tenant, newest first.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Infra`] when storage fails.
    async fn list_for_tenant(&self, tenant_id: Uuid)
    -> Result<Vec<RevenueShareRecord>, LedgerError>;
}

/// Advisory churn/upsell signals. Never fails: missing data lowers coverage.
#[async_trait]
pub trait SignalEngineClient: Send + Sync {
    async fn compute_signals(&self, tenant_id: Uuid) -> TenantSignals;
}
