#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use platform_audit::{AuditEntry, AuditError, AuditSink};
use revenue_ledger::RevenueLedgerModule;
use revenue_ledger::config::RevenueLedgerConfig;
use revenue_ledger_sdk::PaymentEvent;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

pub async fn inmem_db() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opts)
        .await
        .expect("Failed to connect to in-memory database");
    RevenueLedgerModule::migrate(&db)
        .await
        .expect("Failed to run migrations");
    db
}

#[derive(Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<AuditEntry>>,
}

impl RecordingSink {
    pub fn actions(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.action.clone())
            .collect()
    }
}

#[async_trait]
impl AuditSink for RecordingSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }
}

pub struct Harness {
    pub db: DatabaseConnection,
    pub module: RevenueLedgerModule,
    pub audit: Arc<RecordingSink>,
}

pub async fn harness() -> Harness {
    let db = inmem_db().await;
    let audit = Arc::new(RecordingSink::default());
    let module = RevenueLedgerModule::new(
        &RevenueLedgerConfig::default(),
        db.clone(),
        audit.clone(),
    );
    Harness { db, module, audit }
}

/// Audit sink whose writes never complete.
pub struct StalledSink;

#[async_trait]
impl AuditSink for StalledSink {
    async fn record(&self, _entry: AuditEntry) -> Result<(), AuditError> {
        std::future::pending().await
    }
}

/// Bind `tenant` to a fresh reseller at `bps` and return the reseller id.
pub async fn bind(h: &Harness, tenant: Uuid, bps: i32) -> Uuid {
    let reseller = Uuid::new_v4();
    h.module
        .service()
        .bind_reseller(tenant, reseller, bps)
        .await
        .expect("bind reseller");
    reseller
}

pub fn event(tenant: Uuid, invoice: &str, amount_cents: i64) -> PaymentEvent {
    let period_end = OffsetDateTime::now_utc();
    PaymentEvent {
        tenant_id: tenant,
        invoice_id: invoice.to_owned(),
        amount_cents,
        period_start: period_end - Duration::days(30),
        period_end,
    }
}
