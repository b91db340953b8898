//! Advisory churn and upsell scoring.
//!
//! Fail-soft throughout: an aggregate that cannot be read contributes
//! nothing, and a history write that fails still returns the signal.

use std::sync::Arc;

use revenue_ledger_sdk::{ChurnSignal, RiskLevel, TenantSignals, UpsellSignal};
use time::{Duration, OffsetDateTime};
use tracing::warn;
use uuid::Uuid;

use super::error::DomainError;
use super::repo::ActivityRepository;
use crate::config::SignalsConfig;

const ORDER_DROP_POINTS: u8 = 35;
const REVENUE_DROP_POINTS: u8 = 35;
const INACTIVITY_POINTS: u8 = 30;
const GROWTH_POINTS: u8 = 50;
const MAX_SCORE: u8 = 100;

/// Current and previous window totals for one metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Comparison {
    current: i64,
    previous: i64,
}

impl Comparison {
    /// Whole-percent decrease from `previous`, if there was a previous.
    fn drop_pct(self) -> Option<i64> {
        (self.previous > 0 && self.current < self.previous)
            .then(|| (self.previous - self.current).saturating_mul(100) / self.previous)
    }

    fn growth_pct(self) -> Option<i64> {
        (self.previous > 0 && self.current > self.previous)
            .then(|| (self.current - self.previous).saturating_mul(100) / self.previous)
    }
}

#[derive(Debug, Clone, Copy)]
enum Metric {
    Orders,
    Revenue,
}

impl Metric {
    fn as_str(self) -> &'static str {
        match self {
            Self::Orders => "order_count",
            Self::Revenue => "revenue_cents",
        }
    }
}

pub struct SignalEngine {
    repo: Arc<dyn ActivityRepository>,
    cfg: SignalsConfig,
}

impl SignalEngine {
    #[must_use]
    pub fn new(repo: Arc<dyn ActivityRepository>, cfg: SignalsConfig) -> Self {
        Self { repo, cfg }
    }

    /// Compute and record signals as of now.
    pub async fn compute(&self, tenant_id: Uuid) -> TenantSignals {
        self.compute_at(tenant_id, OffsetDateTime::now_utc()).await
    }

    /// Compute and record signals as of `now`.
    #[tracing::instrument(skip_all, fields(tenant_id = %tenant_id))]
    pub async fn compute_at(&self, tenant_id: Uuid, now: OffsetDateTime) -> TenantSignals {
        let window = Duration::days(i64::from(self.cfg.window_days));
        let bounds = now
            .checked_sub(window)
            .and_then(|current| current.checked_sub(window).map(|previous| (current, previous)));

        let (orders, revenue) = if let Some((current_from, previous_from)) = bounds {
            let orders = self
                .compare(Metric::Orders, tenant_id, now, current_from, previous_from)
                .await;
            let revenue = self
                .compare(Metric::Revenue, tenant_id, now, current_from, previous_from)
                .await;
            (orders, revenue)
        } else {
            warn!(
                window_days = self.cfg.window_days,
                "Signal window out of range; window comparisons skipped"
            );
            (None, None)
        };
        let idle_days = match self.repo.last_activity(tenant_id).await {
            Ok(last) => Some(last.map(|t| (now - t).whole_days())),
            Err(e) => {
                warn!(aggregate = "last_activity", error = %e, "Signal aggregate unavailable");
                None
            }
        };

        let churn = self.churn(tenant_id, now, orders, revenue, idle_days);
        if let Err(e) = self.repo.append_churn_signal(&churn).await {
            warn!(error = %e, "Churn signal not persisted");
        }
        let upsell = self.upsell(tenant_id, now, orders, revenue);

        TenantSignals { churn, upsell }
    }

    /// Recorded churn signals, newest first.
    ///
    /// # Errors
    ///
    /// [`DomainError::Database`] on storage failure.
    pub async fn history(
        &self,
        tenant_id: Uuid,
        limit: u64,
    ) -> Result<Vec<ChurnSignal>, DomainError> {
        self.repo.churn_history(tenant_id, limit).await
    }

    async fn compare(
        &self,
        metric: Metric,
        tenant_id: Uuid,
        now: OffsetDateTime,
        current_from: OffsetDateTime,
        previous_from: OffsetDateTime,
    ) -> Option<Comparison> {
        let current = self.read(metric, tenant_id, current_from, now).await;
        let previous = self.read(metric, tenant_id, previous_from, current_from).await;
        match (current, previous) {
            (Ok(current), Ok(previous)) => Some(Comparison { current, previous }),
            (Err(e), _) | (_, Err(e)) => {
                warn!(aggregate = metric.as_str(), error = %e, "Signal aggregate unavailable");
                None
            }
        }
    }

    async fn read(
        &self,
        metric: Metric,
        tenant_id: Uuid,
        from: OffsetDateTime,
        to: OffsetDateTime,
    ) -> Result<i64, DomainError> {
        match metric {
            Metric::Orders => self.repo.order_count(tenant_id, from, to).await,
            Metric::Revenue => self.repo.revenue_cents(tenant_id, from, to).await,
        }
    }

    fn churn(
        &self,
        tenant_id: Uuid,
        now: OffsetDateTime,
        orders: Option<Comparison>,
        revenue: Option<Comparison>,
        idle_days: Option<Option<i64>>,
    ) -> ChurnSignal {
        let mut score: u8 = 0;
        let mut reasons = Vec::new();

        if let Some(pct) = orders.and_then(Comparison::drop_pct)
            && pct >= i64::from(self.cfg.order_drop_pct)
        {
            score = score.saturating_add(ORDER_DROP_POINTS);
            reasons.push(format!("orders dropped {pct}%"));
        }
        if let Some(pct) = revenue.and_then(Comparison::drop_pct)
            && pct >= i64::from(self.cfg.revenue_drop_pct)
        {
            score = score.saturating_add(REVENUE_DROP_POINTS);
            reasons.push(format!("revenue dropped {pct}%"));
        }
        match idle_days {
            Some(Some(days)) if days >= i64::from(self.cfg.inactivity_days) => {
                score = score.saturating_add(INACTIVITY_POINTS);
                reasons.push(format!("no activity for {days} days"));
            }
            Some(None) => {
                score = score.saturating_add(INACTIVITY_POINTS);
                reasons.push("no recorded activity".to_owned());
            }
            _ => {}
        }

        let risk_score = score.min(MAX_SCORE);
        ChurnSignal {
            id: Uuid::new_v4(),
            tenant_id,
            risk_score,
            risk_level: RiskLevel::from_score(risk_score),
            reasons,
            computed_at: now,
        }
    }

    fn upsell(
        &self,
        tenant_id: Uuid,
        now: OffsetDateTime,
        orders: Option<Comparison>,
        revenue: Option<Comparison>,
    ) -> UpsellSignal {
        let mut score: u8 = 0;
        let mut reasons = Vec::new();
        let threshold = i64::from(self.cfg.growth_pct);

        if let Some(pct) = orders.and_then(Comparison::growth_pct)
            && pct >= threshold
        {
            score = score.saturating_add(GROWTH_POINTS);
            reasons.push(format!("orders grew {pct}%"));
        }
        if let Some(pct) = revenue.and_then(Comparison::growth_pct)
            && pct >= threshold
        {
            score = score.saturating_add(GROWTH_POINTS);
            reasons.push(format!("revenue grew {pct}%"));
        }

        UpsellSignal {
            tenant_id,
            score: score.min(MAX_SCORE),
            reasons,
            computed_at: now,
        }
    }
}
