//! Revenue ledger module wiring.

use std::sync::Arc;

use axum::Router;
use platform_audit::AuditSink;
use revenue_ledger_sdk::{RevenueLedgerClient, SignalEngineClient};
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::config::RevenueLedgerConfig;
use crate::domain::ledger::LedgerService;
use crate::domain::local_client::{RevenueLedgerLocalClient, SignalEngineLocalClient};
use crate::domain::repo::{ActivityRepository, LedgerRepository};
use crate::domain::signals::SignalEngine;
use crate::infra::storage::{Migrator, SeaOrmLedgerRepository};

pub struct RevenueLedgerModule {
    ledger: Arc<LedgerService>,
    signals: Arc<SignalEngine>,
}

impl RevenueLedgerModule {
    #[must_use]
    pub fn new(
        config: &RevenueLedgerConfig,
        db: DatabaseConnection,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let repo = Arc::new(SeaOrmLedgerRepository::new(db));
        Self::with_repositories(config, repo.clone(), repo, audit)
    }

    #[must_use]
    pub fn with_repositories(
        config: &RevenueLedgerConfig,
        ledger_repo: Arc<dyn LedgerRepository>,
        activity: Arc<dyn ActivityRepository>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let ledger = Arc::new(LedgerService::new(
            ledger_repo,
            audit,
            config.list_limit,
            config.audit_timeout(),
        ));
        let signals = Arc::new(SignalEngine::new(activity, config.signals.clone()));

        info!(
            list_limit = config.list_limit,
            audit_timeout_ms = config.audit_timeout_ms,
            window_days = config.signals.window_days,
            "Revenue ledger initialized"
        );

        Self { ledger, signals }
    }

    /// Apply the module's schema migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails.
    pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
        Migrator::up(db, None).await?;
        info!("Revenue ledger migrations applied");
        Ok(())
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<dyn RevenueLedgerClient> {
        Arc::new(RevenueLedgerLocalClient::new(self.ledger.clone()))
    }

    #[must_use]
    pub fn signals(&self) -> Arc<dyn SignalEngineClient> {
        Arc::new(SignalEngineLocalClient::new(self.signals.clone()))
    }

    /// The ledger service, for operator actions outside the client trait.
    #[must_use]
    pub fn service(&self) -> Arc<LedgerService> {
        self.ledger.clone()
    }

    #[must_use]
    pub fn router(&self) -> Router {
        crate::api::rest::router(self.ledger.clone(), self.signals.clone())
    }
}
