//! Tenant Gate Module
//!
//! Decides, before any business logic runs, whether a request may exist for
//! its hostname, role, and subscription combination:
//!
//! 1. normalize the `Host` header ([`domain::host`])
//! 2. resolve the tenant bound to the host ([`domain::tenant_resolver`])
//! 3. stage A: tenant/domain admission ([`domain::gate`])
//! 4. resolve the session principal ([`domain::principal`])
//! 5. stage B: role/binding admission ([`domain::gate`])
//!
//! Every path ends in exactly one [`tenant_gate_sdk::AccessDecision`]; any
//! infrastructure failure becomes `ServiceUnavailable`.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use module::TenantGateModule;
