//! `SeaORM`-backed audit storage.

pub mod entity;
pub mod migrations;

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, DatabaseConnection, EntityTrait};
use uuid::Uuid;

use crate::entry::AuditEntry;
use crate::sink::{AuditError, AuditSink};

/// Sink writing to the `audit_log` table. Rows are only ever inserted.
#[derive(Clone)]
pub struct SeaOrmAuditSink {
    db: DatabaseConnection,
}

impl SeaOrmAuditSink {
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditSink for SeaOrmAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        let row = entity::ActiveModel {
            id: Set(Uuid::new_v4()),
            tenant_id: Set(entry.tenant_id),
            actor_id: Set(entry.actor_id),
            action: Set(entry.action.clone()),
            entity_type: Set(entry.entity_type.clone()),
            entity_id: Set(entry.entity_id),
            metadata: Set(entry.metadata_value().to_string()),
            occurred_at: Set(entry.occurred_at),
        };

        entity::Entity::insert(row)
            .exec_without_returning(&self.db)
            .await
            .map(|_| ())
            .map_err(|e| AuditError::Storage(e.to_string()))
    }
}
