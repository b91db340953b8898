use async_trait::async_trait;
use revenue_ledger_sdk::{ChurnSignal, PayoutStatus, RevenueShareRecord};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::error::DomainError;
use crate::domain::repo::{ActivityRepository, LedgerRepository, ResellerBinding};

use super::entity::{churn_signal, order_rollup, reseller_binding, revenue_share};

/// Ledger and activity storage over SeaORM.
///
/// Every write that guards an invariant is a single conditional statement,
/// so concurrent callers race in the database, not here.
#[derive(Clone)]
pub struct SeaOrmLedgerRepository {
    db: DatabaseConnection,
}

impl SeaOrmLedgerRepository {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Set the order total of one tenant-day, replacing any earlier total.
    ///
    /// # Errors
    ///
    /// [`DomainError::Database`] on storage failure.
    pub async fn record_order_rollup(
        &self,
        tenant_id: Uuid,
        day: OffsetDateTime,
        order_count: i64,
    ) -> Result<(), DomainError> {
        let row = order_rollup::ActiveModel {
            tenant_id: Set(tenant_id),
            day: Set(day),
            order_count: Set(order_count),
        };
        order_rollup::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([order_rollup::Column::TenantId, order_rollup::Column::Day])
                    .update_column(order_rollup::Column::OrderCount)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}

fn to_record(m: revenue_share::Model) -> Result<RevenueShareRecord, DomainError> {
    let payout_status = m
        .payout_status
        .parse::<PayoutStatus>()
        .map_err(|e| DomainError::corrupt(format!("revenue share {}: {e}", m.id)))?;

    Ok(RevenueShareRecord {
        id: m.id,
        tenant_id: m.tenant_id,
        invoice_id: m.invoice_id,
        reseller_id: m.reseller_id,
        amount_cents: m.amount_cents,
        commission_cents: m.commission_cents,
        commission_rate_bps: m.commission_rate_bps,
        payout_status,
        period_start: m.period_start,
        period_end: m.period_end,
        created_at: m.created_at,
        settled_at: m.settled_at,
    })
}

fn to_signal(m: churn_signal::Model) -> Result<ChurnSignal, DomainError> {
    let corrupt = |what: &str| DomainError::corrupt(format!("churn signal {}: {what}", m.id));
    let risk_score = u8::try_from(m.risk_score).map_err(|_| corrupt("score out of range"))?;
    let risk_level = m.risk_level.parse().map_err(|e: String| corrupt(&e))?;
    let reasons = serde_json::from_str(&m.reasons).map_err(|e| corrupt(&e.to_string()))?;

    Ok(ChurnSignal {
        id: m.id,
        tenant_id: m.tenant_id,
        risk_score,
        risk_level,
        reasons,
        computed_at: m.computed_at,
    })
}

fn total(values: Vec<i64>) -> i64 {
    values.into_iter().fold(0_i64, i64::saturating_add)
}

#[async_trait]
impl LedgerRepository for SeaOrmLedgerRepository {
    async fn find_reseller_binding(
        &self,
        tenant_id: Uuid,
    ) -> Result<Option<ResellerBinding>, DomainError> {
        let found = reseller_binding::Entity::find_by_id(tenant_id)
            .one(&self.db)
            .await?;
        Ok(found.map(|m| ResellerBinding {
            tenant_id: m.tenant_id,
            reseller_id: m.reseller_id,
            commission_rate_bps: m.commission_rate_bps,
            active: m.active,
        }))
    }

    async fn upsert_reseller_binding(&self, binding: &ResellerBinding) -> Result<(), DomainError> {
        let row = reseller_binding::ActiveModel {
            tenant_id: Set(binding.tenant_id),
            reseller_id: Set(binding.reseller_id),
            commission_rate_bps: Set(binding.commission_rate_bps),
            active: Set(binding.active),
            updated_at: Set(OffsetDateTime::now_utc()),
        };
        reseller_binding::Entity::insert(row)
            .on_conflict(
                OnConflict::column(reseller_binding::Column::TenantId)
                    .update_columns([
                        reseller_binding::Column::ResellerId,
                        reseller_binding::Column::CommissionRateBps,
                        reseller_binding::Column::Active,
                        reseller_binding::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn insert_if_absent(&self, record: &RevenueShareRecord) -> Result<bool, DomainError> {
        let row = revenue_share::ActiveModel {
            id: Set(record.id),
            tenant_id: Set(record.tenant_id),
            invoice_id: Set(record.invoice_id.clone()),
            reseller_id: Set(record.reseller_id),
            amount_cents: Set(record.amount_cents),
            commission_cents: Set(record.commission_cents),
            commission_rate_bps: Set(record.commission_rate_bps),
            payout_status: Set(record.payout_status.as_str().to_owned()),
            period_start: Set(record.period_start),
            period_end: Set(record.period_end),
            created_at: Set(record.created_at),
            settled_at: Set(record.settled_at),
        };

        let inserted = revenue_share::Entity::insert(row)
            .on_conflict(
                OnConflict::columns([
                    revenue_share::Column::TenantId,
                    revenue_share::Column::InvoiceId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(inserted == 1)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<RevenueShareRecord>, DomainError> {
        revenue_share::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .map(to_record)
            .transpose()
    }

    async fn list_for_tenant(
        &self,
        tenant_id: Uuid,
        limit: u64,
    ) -> Result<Vec<RevenueShareRecord>, DomainError> {
        revenue_share::Entity::find()
            .filter(revenue_share::Column::TenantId.eq(tenant_id))
            .order_by_desc(revenue_share::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_record)
            .collect()
    }

    async fn settle_if_pending(
        &self,
        id: Uuid,
        target: PayoutStatus,
        settled_at: OffsetDateTime,
    ) -> Result<bool, DomainError> {
        let res = revenue_share::Entity::update_many()
            .col_expr(
                revenue_share::Column::PayoutStatus,
                Expr::value(target.as_str()),
            )
            .col_expr(revenue_share::Column::SettledAt, Expr::value(settled_at))
            .filter(revenue_share::Column::Id.eq(id))
            .filter(revenue_share::Column::PayoutStatus.eq(PayoutStatus::Pending.as_str()))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected == 1)
    }
}

#[async_trait]
impl ActivityRepository for SeaOrmLedgerRepository {
    async fn order_count(
        &self,
        tenant_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<i64, DomainError> {
        let counts = order_rollup::Entity::find()
            .select_only()
            .column(order_rollup::Column::OrderCount)
            .filter(order_rollup::Column::TenantId.eq(tenant_id))
            .filter(order_rollup::Column::Day.gte(from))
            .filter(order_rollup::Column::Day.lt(to))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        Ok(total(counts))
    }

    async fn revenue_cents(
        &self,
        tenant_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<i64, DomainError> {
        let amounts = revenue_share::Entity::find()
            .select_only()
            .column(revenue_share::Column::AmountCents)
            .filter(revenue_share::Column::TenantId.eq(tenant_id))
            .filter(revenue_share::Column::CreatedAt.gte(from))
            .filter(revenue_share::Column::CreatedAt.lt(to))
            .into_tuple::<i64>()
            .all(&self.db)
            .await?;
        Ok(total(amounts))
    }

    async fn last_activity(&self, tenant_id: Uuid) -> Result<Option<OffsetDateTime>, DomainError> {
        let latest = order_rollup::Entity::find()
            .filter(order_rollup::Column::TenantId.eq(tenant_id))
            .filter(order_rollup::Column::OrderCount.gt(0))
            .order_by_desc(order_rollup::Column::Day)
            .one(&self.db)
            .await?;
        Ok(latest.map(|r| r.day))
    }

    async fn append_churn_signal(&self, signal: &ChurnSignal) -> Result<(), DomainError> {
        let reasons = serde_json::to_string(&signal.reasons)
            .map_err(|e| DomainError::corrupt(e.to_string()))?;
        let row = churn_signal::ActiveModel {
            id: Set(signal.id),
            tenant_id: Set(signal.tenant_id),
            risk_score: Set(i32::from(signal.risk_score)),
            risk_level: Set(signal.risk_level.as_str().to_owned()),
            reasons: Set(reasons),
            computed_at: Set(signal.computed_at),
        };
        churn_signal::Entity::insert(row)
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }

    async fn churn_history(
        &self,
        tenant_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ChurnSignal>, DomainError> {
        churn_signal::Entity::find()
            .filter(churn_signal::Column::TenantId.eq(tenant_id))
            .order_by_desc(churn_signal::Column::ComputedAt)
            .limit(limit)
            .all(&self.db)
            .await?
            .into_iter()
            .map(to_signal)
            .collect()
    }
}
