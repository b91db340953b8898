//! Revenue Ledger SDK
//!
//! Public API of the `revenue_ledger` module:
//!
//! - [`RevenueLedgerClient`] - at-most-once revenue-share records per
//!   `(tenant_id, invoice_id)`, plus payout settlement
//! - [`SignalEngineClient`] - advisory churn and upsell scores
//!
//! Ledger outcomes that are business results (duplicate delivery, no
//! reseller, invalid input) are values of [`LedgerOutcome`]; only storage and
//! request-shape failures are [`LedgerError`]s.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

pub use api::{RevenueLedgerClient, SignalEngineClient};
pub use error::LedgerError;
pub use models::{
    ChurnSignal, LedgerOutcome, PaymentEvent, PayoutStatus, PayoutTransitionOutcome,
    RevenueShareRecord, RiskLevel, TenantSignals, UpsellSignal,
};
