//! The access gate: classification, both admission stages, one decision.

use std::sync::Arc;

use async_trait::async_trait;
use tenant_gate_sdk::{
    AccessDecision, AccessGateClient, GateOutcome, InboundRequest, PrincipalResolverClient,
    TenantResolverClient,
};

use super::gate::{admit_principal, admit_tenant};
use super::host::normalize_host;
use super::routes::RouteTable;

pub struct GateService {
    tenants: Arc<dyn TenantResolverClient>,
    principals: Arc<dyn PrincipalResolverClient>,
    routes: RouteTable,
}

impl GateService {
    #[must_use]
    pub fn new(
        tenants: Arc<dyn TenantResolverClient>,
        principals: Arc<dyn PrincipalResolverClient>,
        routes: RouteTable,
    ) -> Self {
        Self {
            tenants,
            principals,
            routes,
        }
    }
}

#[async_trait]
impl AccessGateClient for GateService {
    #[tracing::instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn decide(&self, request: &InboundRequest) -> GateOutcome {
        let route = self.routes.classify(&request.path);
        let host = normalize_host(&request.host);

        let resolution = self.tenants.resolve(&host).await;
        let tenant_id = match admit_tenant(&resolution, &route) {
            Ok(tenant_id) => tenant_id,
            Err(decision) => {
                tracing::debug!(host = %host, decision = %decision, "Stage A denied request");
                return GateOutcome {
                    decision,
                    route,
                    tenant: resolution.ok(),
                    principal: None,
                };
            }
        };

        // Stage B only starts once the tenant is admitted.
        let principal = match (&request.session_token, route.is_public()) {
            (Some(token), false) => self.principals.resolve(token).await,
            _ => None,
        };

        let decision = admit_principal(principal.as_ref(), tenant_id, &route);
        if decision == AccessDecision::Forbidden {
            tracing::info!(
                host = %host,
                role = ?principal.as_ref().map(|p| p.role),
                "Stage B forbade request"
            );
        } else {
            tracing::debug!(host = %host, decision = %decision, "Gate decision");
        }

        GateOutcome {
            decision,
            route,
            tenant: resolution.ok(),
            principal,
        }
    }
}
