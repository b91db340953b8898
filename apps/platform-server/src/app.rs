//! Database setup and router assembly.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::routing::get;
use axum::{Json, Router};
use platform_api::Problem;
use platform_audit::{AuditSink, SeaOrmAuditSink};
use revenue_ledger::RevenueLedgerModule;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use secrecy::ExposeSecret;
use serde_json::{Value, json};
use tenant_gate::TenantGateModule;
use tracing::{info, warn};

use crate::config::{AppConfig, DatabaseConfig};

/// Open the connection pool.
///
/// # Errors
///
/// Fails if the database cannot be reached.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let mut opts = ConnectOptions::new(cfg.url.clone());
    opts.max_connections(cfg.max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .context("failed to connect to database")?;
    info!(max_connections = cfg.max_connections, "Database connected");
    Ok(db)
}

/// Run every module's migrations. Each module tracks its own migration
/// table, so order only matters for readability.
///
/// # Errors
///
/// Fails on the first migration error.
pub async fn migrate(db: &DatabaseConnection) -> anyhow::Result<()> {
    platform_audit::storage::migrations::Migrator::up(db, None)
        .await
        .context("audit migrations failed")?;
    TenantGateModule::migrate(db).await?;
    RevenueLedgerModule::migrate(db).await?;
    Ok(())
}

/// Assemble the application: operator routes and health, all behind the gate.
#[must_use]
pub fn build_router(cfg: &AppConfig, db: DatabaseConnection) -> Router {
    if cfg.tenant_gate.session.secret.expose_secret().is_empty() {
        warn!("Session secret is empty; every session token will be rejected");
    }

    let audit: Arc<dyn AuditSink> = Arc::new(SeaOrmAuditSink::new(db.clone()));
    let gate = TenantGateModule::new(cfg.tenant_gate.clone(), db.clone());
    let ledger = RevenueLedgerModule::new(&cfg.revenue_ledger, db, audit.clone());

    let routes = ledger
        .router()
        .route("/health", get(health))
        .fallback(not_found);

    gate.layer(routes, audit)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> Problem {
    Problem::not_found("Resource not found")
}
