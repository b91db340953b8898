//! Tenant gate module wiring.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use platform_audit::AuditSink;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tenant_gate_sdk::{AccessGateClient, PrincipalResolverClient, TenantResolverClient};
use tracing::info;

use crate::api::rest::middleware::{GateState, access_gate_middleware};
use crate::api::rest::responses::RedirectTargets;
use crate::config::TenantGateConfig;
use crate::domain::host::PlatformHosts;
use crate::domain::local_client::{PrincipalResolverLocalClient, TenantResolverLocalClient};
use crate::domain::principal::PrincipalResolverService;
use crate::domain::repo::{DistrictRepository, OwnershipRepository};
use crate::domain::routes::RouteTable;
use crate::domain::service::GateService;
use crate::domain::session::SessionCodec;
use crate::domain::tenant_resolver::{TenantCache, TenantResolverService};
use crate::infra::storage::{Migrator, SeaOrmDirectoryRepository};

/// Tenant gate module.
///
/// Owns:
/// 1. the tenant resolver with its host cache
/// 2. the principal resolver and session codec
/// 3. the two-stage gate and its axum middleware
pub struct TenantGateModule {
    config: TenantGateConfig,
    tenants: Arc<TenantResolverService>,
    principals: Arc<PrincipalResolverService>,
    gate: Arc<GateService>,
}

impl TenantGateModule {
    /// Build the module over SeaORM-backed repositories.
    #[must_use]
    pub fn new(config: TenantGateConfig, db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmDirectoryRepository::new(db));
        Self::with_repositories(config, repo.clone(), repo)
    }

    #[must_use]
    pub fn with_repositories(
        config: TenantGateConfig,
        districts: Arc<dyn DistrictRepository>,
        ownership: Arc<dyn OwnershipRepository>,
    ) -> Self {
        let hosts = PlatformHosts::new(
            &config.platform_domain,
            config.dev_hosts.iter().map(String::as_str),
        );
        let tenants = Arc::new(TenantResolverService::new(
            hosts,
            districts,
            TenantCache::new(
                Duration::from_secs(config.tenant_cache_ttl_secs),
                config.tenant_cache_max_entries,
            ),
        ));
        let principals = Arc::new(PrincipalResolverService::new(
            SessionCodec::new(&config.session),
            ownership,
        ));
        let gate = Arc::new(GateService::new(
            Arc::new(TenantResolverLocalClient::new(tenants.clone())),
            Arc::new(PrincipalResolverLocalClient::new(principals.clone())),
            RouteTable::new(&config.routes),
        ));

        info!(
            platform_domain = %config.platform_domain,
            cache_ttl_secs = config.tenant_cache_ttl_secs,
            cache_max_entries = config.tenant_cache_max_entries,
            "Tenant gate initialized"
        );

        Self {
            config,
            tenants,
            principals,
            gate,
        }
    }

    /// Apply the module's schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        Migrator::up(db, None).await?;
        info!("Tenant gate migrations applied");
        Ok(())
    }

    #[must_use]
    pub fn config(&self) -> &TenantGateConfig {
        &self.config
    }

    #[must_use]
    pub fn gate(&self) -> Arc<dyn AccessGateClient> {
        self.gate.clone()
    }

    #[must_use]
    pub fn tenant_resolver(&self) -> Arc<dyn TenantResolverClient> {
        Arc::new(TenantResolverLocalClient::new(self.tenants.clone()))
    }

    #[must_use]
    pub fn principal_resolver(&self) -> Arc<dyn PrincipalResolverClient> {
        Arc::new(PrincipalResolverLocalClient::new(self.principals.clone()))
    }

    /// The principal service, for minting session tokens.
    #[must_use]
    pub fn sessions(&self) -> Arc<PrincipalResolverService> {
        self.principals.clone()
    }

    #[must_use]
    pub fn gate_state(&self, audit: Arc<dyn AuditSink>) -> GateState {
        GateState {
            gate: self.gate(),
            audit,
            cookie_name: Arc::from(self.config.session.cookie_name.as_str()),
            targets: Arc::new(RedirectTargets {
                login_path: self.config.routes.login_path.clone(),
                billing_path: self.config.routes.billing_path.clone(),
            }),
        }
    }

    /// Wrap every route of `router` in the gate.
    pub fn layer<S>(&self, router: Router<S>, audit: Arc<dyn AuditSink>) -> Router<S>
    where
        S: Clone + Send + Sync + 'static,
    {
        router.layer(axum::middleware::from_fn_with_state(
            self.gate_state(audit),
            access_gate_middleware,
        ))
    }
}
