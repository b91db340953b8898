//! Public API traits for the tenant gate.
//!
//! The HTTP layer consumes [`AccessGateClient`]; the two resolver traits are
//! exposed separately so that other modules (and tests) can swap either side.

use async_trait::async_trait;

use crate::error::InfraError;
use crate::models::{GateOutcome, InboundRequest, Principal, TenantContext};

/// Resolves a canonical host into a [`TenantContext`].
///
/// Implementations read tenant records and never write.
#[async_trait]
pub trait TenantResolverClient: Send + Sync {
    /// Resolve the tenant bound to `canonical_host`.
    ///
    /// # Errors
    ///
    /// Returns [`InfraError`] when the tenant store cannot be queried. A
    /// missing, inactive, or unverified tenant is NOT an error.
    async fn resolve(&self, canonical_host: &str) -> Result<TenantContext, InfraError>;
}

/// Resolves a session token into a [`Principal`].
#[async_trait]
pub trait PrincipalResolverClient: Send + Sync {
    /// Verify `session_token` and materialize the principal's bindings.
    ///
    /// Returns `None` for any token that cannot be fully verified. A binding
    /// that cannot be looked up is left empty rather than guessed.
    async fn resolve(&self, session_token: &str) -> Option<Principal>;
}

/// Two-stage admission control for an inbound request.
#[async_trait]
pub trait AccessGateClient: Send + Sync {
    /// Compute exactly one decision for `request`. Never fails.
    async fn decide(&self, request: &InboundRequest) -> GateOutcome;
}
