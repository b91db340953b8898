//! Revenue-share recording and payout settlement.

use std::sync::Arc;
use std::time::Duration;

use platform_audit::{AuditEntry, AuditSink, record_best_effort_within};
use revenue_ledger_sdk::{
    LedgerOutcome, PaymentEvent, PayoutStatus, PayoutTransitionOutcome, RevenueShareRecord,
};
use serde_json::json;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::commission::{BPS_SCALE, checked_commission};
use super::error::DomainError;
use super::repo::{LedgerRepository, ResellerBinding};

pub struct LedgerService {
    repo: Arc<dyn LedgerRepository>,
    audit: Arc<dyn AuditSink>,
    list_limit: u64,
    audit_timeout: Duration,
}

impl LedgerService {
    #[must_use]
    pub fn new(
        repo: Arc<dyn LedgerRepository>,
        audit: Arc<dyn AuditSink>,
        list_limit: u64,
        audit_timeout: Duration,
    ) -> Self {
        Self {
            repo,
            audit,
            list_limit,
            audit_timeout,
        }
    }

    /// Record the reseller commission for `event`.
    ///
    /// Steps run in a fixed order and the first failing check decides the
    /// outcome. Storage is written at most once, and only with a record that
    /// satisfies every invariant.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] for a malformed event, checked before any
    /// read. [`DomainError::Database`] when storage fails; nothing is
    /// written in that case.
    #[tracing::instrument(
        skip_all,
        fields(tenant_id = %event.tenant_id, invoice_id = %event.invoice_id)
    )]
    pub async fn record_revenue_share(
        &self,
        event: PaymentEvent,
    ) -> Result<LedgerOutcome, DomainError> {
        let invoice_id = event.invoice_id.trim();
        if invoice_id.is_empty() {
            return Err(DomainError::validation("invoice_id", "must not be empty"));
        }
        if event.period_end < event.period_start {
            return Err(DomainError::validation(
                "period_end",
                "must not precede period_start",
            ));
        }

        let binding = match self.repo.find_reseller_binding(event.tenant_id).await? {
            Some(b) if b.active => b,
            _ => {
                info!("No active reseller binding; nothing recorded");
                return Ok(LedgerOutcome::NoReseller);
            }
        };

        if event.amount_cents <= 0 {
            warn!(amount_cents = event.amount_cents, "Rejected non-positive amount");
            return Ok(LedgerOutcome::InvalidAmount);
        }

        let Some(commission_cents) =
            checked_commission(event.amount_cents, binding.commission_rate_bps)
        else {
            warn!(
                amount_cents = event.amount_cents,
                rate_bps = binding.commission_rate_bps,
                "Rejected commission outside (0, amount]"
            );
            return Ok(LedgerOutcome::InvalidCommission);
        };

        let record = RevenueShareRecord {
            id: Uuid::new_v4(),
            tenant_id: event.tenant_id,
            invoice_id: invoice_id.to_owned(),
            reseller_id: binding.reseller_id,
            amount_cents: event.amount_cents,
            commission_cents,
            commission_rate_bps: binding.commission_rate_bps,
            payout_status: PayoutStatus::Pending,
            period_start: event.period_start,
            period_end: event.period_end,
            created_at: OffsetDateTime::now_utc(),
            settled_at: None,
        };

        if !self.repo.insert_if_absent(&record).await? {
            info!("Invoice already recorded; duplicate delivery ignored");
            return Ok(LedgerOutcome::DuplicateInvoice);
        }

        info!(
            record_id = %record.id,
            commission_cents,
            "Revenue share recorded"
        );
        record_best_effort_within(
            self.audit.as_ref(),
            AuditEntry::new("revenue_share.created", "revenue_share")
                .tenant(Some(record.tenant_id))
                .entity(record.id)
                .metadata(json!({
                    "invoice_id": record.invoice_id,
                    "reseller_id": record.reseller_id,
                    "amount_cents": record.amount_cents,
                    "commission_cents": record.commission_cents,
                    "commission_rate_bps": record.commission_rate_bps,
                    "payout_status": record.payout_status.as_str(),
                })),
            self.audit_timeout,
        )
        .await;

        Ok(LedgerOutcome::Created(record))
    }

    /// Settle a pending record. Replaying the same settlement is a no-op.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] for a `Pending` target,
    /// [`DomainError::NotFound`], [`DomainError::Conflict`] when the record
    /// settled the other way, [`DomainError::Database`] on storage failure.
    #[tracing::instrument(skip_all, fields(record_id = %record_id, target = %target))]
    pub async fn transition_payout(
        &self,
        record_id: Uuid,
        target: PayoutStatus,
    ) -> Result<PayoutTransitionOutcome, DomainError> {
        if !target.is_terminal() {
            return Err(DomainError::validation(
                "status",
                "target must be paid or failed",
            ));
        }

        let applied = self
            .repo
            .settle_if_pending(record_id, target, OffsetDateTime::now_utc())
            .await?;
        let record = self
            .repo
            .find_by_id(record_id)
            .await?
            .ok_or(DomainError::NotFound)?;

        if applied {
            info!("Payout settled");
            record_best_effort_within(
                self.audit.as_ref(),
                AuditEntry::new(format!("revenue_share.{}", target.as_str()), "revenue_share")
                    .tenant(Some(record.tenant_id))
                    .entity(record.id)
                    .metadata(json!({
                        "commission_cents": record.commission_cents,
                        "payout_status": target.as_str(),
                    })),
                self.audit_timeout,
            )
            .await;
            return Ok(PayoutTransitionOutcome::Applied(record));
        }

        if record.payout_status == target {
            return Ok(PayoutTransitionOutcome::AlreadyApplied(record));
        }

        warn!(current = %record.payout_status, "Payout transition conflicts with settled state");
        Err(DomainError::Conflict(format!(
            "revenue share is already {}",
            record.payout_status
        )))
    }

    /// # Errors
    ///
    /// [`DomainError::NotFound`] or [`DomainError::Database`].
    pub async fn get_record(&self, record_id: Uuid) -> Result<RevenueShareRecord, DomainError> {
        self.repo
            .find_by_id(record_id)
            .await?
            .ok_or(DomainError::NotFound)
    }

    /// # Errors
    ///
    /// [`DomainError::Database`] on storage failure.
    pub async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
    ) -> Result<Vec<RevenueShareRecord>, DomainError> {
        self.repo.list_for_tenant(tenant_id, self.list_limit).await
    }

    /// Bind (or rebind) a tenant to a reseller.
    ///
    /// # Errors
    ///
    /// [`DomainError::Validation`] for a rate outside `1..=10000` bps,
    /// [`DomainError::Database`] on storage failure.
    #[tracing::instrument(skip_all, fields(tenant_id = %tenant_id, reseller_id = %reseller_id))]
    pub async fn bind_reseller(
        &self,
        tenant_id: Uuid,
        reseller_id: Uuid,
        commission_rate_bps: i32,
    ) -> Result<ResellerBinding, DomainError> {
        if !(1..=BPS_SCALE).contains(&i64::from(commission_rate_bps)) {
            return Err(DomainError::validation(
                "commission_rate_bps",
                "must be between 1 and 10000",
            ));
        }
        let binding = ResellerBinding {
            tenant_id,
            reseller_id,
            commission_rate_bps,
            active: true,
        };
        self.repo.upsert_reseller_binding(&binding).await?;
        info!(commission_rate_bps, "Reseller bound");
        Ok(binding)
    }
}
