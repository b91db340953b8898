//! Tenant Gate SDK
//!
//! This crate provides the public API for the `tenant_gate` module:
//!
//! - [`TenantResolverClient`] - canonical host to [`TenantContext`]
//! - [`PrincipalResolverClient`] - session token to [`Principal`]
//! - [`AccessGateClient`] - full two-stage admission for an [`InboundRequest`]
//! - [`AccessDecision`] - the single outcome produced for every request
//! - [`InfraError`] - storage/network failure, always mapped to
//!   [`AccessDecision::ServiceUnavailable`] by the gate
//!
//! ## Usage
//!
//! ```ignore
//! use tenant_gate_sdk::{AccessGateClient, InboundRequest};
//!
//! let outcome = gate.decide(&InboundRequest {
//!     host: "orders.example-bistro.com".to_owned(),
//!     path: "/dashboard".to_owned(),
//!     method: "GET".to_owned(),
//!     session_token: None,
//! }).await;
//! assert!(!outcome.decision.is_allow());
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

pub use api::{AccessGateClient, PrincipalResolverClient, TenantResolverClient};
pub use error::InfraError;
pub use models::{
    AccessDecision, GateOutcome, HostKind, InboundRequest, Principal, Role, RoleBinding,
    RouteAccess, RouteClass, RouteSurface, SubscriptionStatus, TenantContext,
};
