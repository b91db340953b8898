//! Revenue Ledger Module
//!
//! Turns verified payment events into reseller commission records, at most
//! one per `(tenant_id, invoice_id)`, and settles them once. Commissions are
//! integer cents computed from a basis-point rate with half-away-from-zero
//! rounding; any input that would break `0 < commission <= amount` is
//! rejected before storage is touched.
//!
//! The churn/upsell engine lives alongside but shares none of the ledger's
//! failure policy: it degrades to partial coverage instead of failing.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::RevenueLedgerModule;
