use async_trait::async_trait;
use revenue_ledger_sdk::{ChurnSignal, PayoutStatus, RevenueShareRecord};
use time::OffsetDateTime;
use uuid::Uuid;

use super::error::DomainError;

/// A tenant's reseller and the commission rate owed to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResellerBinding {
    pub tenant_id: Uuid,
    pub reseller_id: Uuid,
    pub commission_rate_bps: i32,
    pub active: bool,
}

#[async_trait]
pub trait LedgerRepository: Send + Sync {
    async fn find_reseller_binding(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<ResellerBinding>, DomainError>;

    async fn upsert_reseller_binding(&self, binding: &ResellerBinding) -> Result<(), DomainError>;

    /// Insert unless `(tenant_id, invoice_id)` already exists, in one
    /// statement. Returns whether a row was written.
    async fn insert_if_absent(&self, record: &RevenueShareRecord) -> Result<bool, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RevenueShareRecord>, DomainError>;

    /// Newest first, at most `limit` rows.
    async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
        limit: u64,
    ) -> Result<Vec<RevenueShareRecord>, DomainError>;

    /// Move a `pending` record to `target`, in one conditional statement.
    /// Returns whether the row changed.
    async fn settle_if_pending(
        &self,
        id: Uuid,
        target: PayoutStatus,
        settled_at: OffsetDateTime,
    ) -> Result<bool, DomainError>;
}

/// Read-only activity aggregates plus the churn history the engine appends to.
///
/// Ranges are half-open: `from <= t < to`.
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn order_count(
        &self,
        tenant_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<i64, DomainError>;

    async fn revenue_cents(
        &self,
        tenant_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<i64, DomainError>;

    /// Most recent day with at least one order.
    async fn last_activity(&self, tenant_id: Uuid) -> Result<Option<OffsetDateTime>, DomainError>;

    async fn append_churn_signal(&self, signal: &ChurnSignal) -> Result<(), DomainError>;

    async fn churn_history(
        &self,
        tenant_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ChurnSignal>, DomainError>;
}
