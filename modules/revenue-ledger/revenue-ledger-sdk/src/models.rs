//! Ledger and signal models. Money is always integer cents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// A payment already authenticated by the payment-gateway collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentEvent {
    pub tenant_id: Uuid,
    pub invoice_id: String,
    pub amount_cents: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub period_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub period_end: OffsetDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoutStatus {
    Pending,
    Paid,
    Failed,
}

impl PayoutStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            other => Err(format!("unknown payout status '{other}'")),
        }
    }
}

/// One reseller commission for one invoice.
///
/// Invariants: `amount_cents > 0`, `0 < commission_cents <= amount_cents`,
/// unique per `(tenant_id, invoice_id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevenueShareRecord {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub invoice_id: String,
    pub reseller_id: Uuid,
    pub amount_cents: i64,
    pub commission_cents: i64,
    /// Commission rate in basis points (1 = 0.01%).
    pub commission_rate_bps: i32,
    pub payout_status: PayoutStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub period_start: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub period_end: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub settled_at: Option<OffsetDateTime>,
}

/// Result of [`crate::RevenueLedgerClient::record_revenue_share`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum LedgerOutcome {
    Created(RevenueShareRecord),
    /// A record for this invoice already exists; nothing was written.
    DuplicateInvoice,
    /// The tenant has no active reseller binding.
    NoReseller,
    /// `amount_cents <= 0`.
    InvalidAmount,
    /// The commission would be zero, exceed the amount, or overflow.
    InvalidCommission,
}

impl LedgerOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created(_) => "created",
            Self::DuplicateInvoice => "duplicate_invoice",
            Self::NoReseller => "no_reseller",
            Self::InvalidAmount => "invalid_amount",
            Self::InvalidCommission => "invalid_commission",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "record", rename_all = "snake_case")]
pub enum PayoutTransitionOutcome {
    Applied(RevenueShareRecord),
    /// The record already carried the requested status.
    AlreadyApplied(RevenueShareRecord),
}

impl PayoutTransitionOutcome {
    #[must_use]
    pub fn record(&self) -> &RevenueShareRecord {
        match self {
            Self::Applied(r) | Self::AlreadyApplied(r) => r,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// `High` at 70 and above, `Medium` at 40 and above.
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        match score {
            70.. => Self::High,
            40.. => Self::Medium,
            _ => Self::Low,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(format!("unknown risk level '{other}'")),
        }
    }
}

/// Advisory churn score. Appended to history, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurnSignal {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// `0..=100`.
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub reasons: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub computed_at: OffsetDateTime,
}

/// Advisory expansion score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsellSignal {
    pub tenant_id: Uuid,
    /// `0..=100`.
    pub score: u8,
    pub reasons: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub computed_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantSignals {
    pub churn: ChurnSignal,
    pub upsell: UpsellSignal,
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn risk_level_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(39), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(40), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(69), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(70), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn payout_status_parse() {
        for s in [PayoutStatus::Pending, PayoutStatus::Paid, PayoutStatus::Failed] {
            assert_eq!(s.as_str().parse::<PayoutStatus>(), Ok(s));
        }
        assert!("settled".parse::<PayoutStatus>().is_err());
        assert!(!PayoutStatus::Pending.is_terminal());
        assert!(PayoutStatus::Failed.is_terminal());
    }

    #[test]
    fn outcome_is_tagged() {
        let json = serde_json::to_value(LedgerOutcome::DuplicateInvoice).unwrap();
        assert_eq!(json["outcome"], "duplicate_invoice");
        assert_eq!(LedgerOutcome::NoReseller.as_str(), "no_reseller");
    }
}
