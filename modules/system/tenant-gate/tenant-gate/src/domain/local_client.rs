//! In-process clients exposing the domain services through the SDK traits.

use std::sync::Arc;

use async_trait::async_trait;
use tenant_gate_sdk::{
    InfraError, Principal, PrincipalResolverClient, TenantContext, TenantResolverClient,
};

use super::error::DomainError;
use super::principal::PrincipalResolverService;
use super::tenant_resolver::TenantResolverService;

fn log_and_convert(op: &str, e: DomainError) -> InfraError {
    tracing::error!(operation = op, error = ?e, "tenant_gate call failed");
    e.into()
}

pub struct TenantResolverLocalClient {
    svc: Arc<TenantResolverService>,
}

impl TenantResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<TenantResolverService>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl TenantResolverClient for TenantResolverLocalClient {
    async fn resolve(&self, canonical_host: &str) -> Result<TenantContext, InfraError> {
        self.svc
            .resolve(canonical_host)
            .await
            .map_err(|e| log_and_convert("resolve_tenant", e))
    }
}

pub struct PrincipalResolverLocalClient {
    svc: Arc<PrincipalResolverService>,
}

impl PrincipalResolverLocalClient {
    #[must_use]
    pub fn new(svc: Arc<PrincipalResolverService>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl PrincipalResolverClient for PrincipalResolverLocalClient {
    async fn resolve(&self, session_token: &str) -> Option<Principal> {
        self.svc.resolve(session_token).await
    }
}
