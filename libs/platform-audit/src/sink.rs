use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::entry::AuditEntry;

#[derive(Debug, Error)]
pub enum AuditError {
    #[error("audit storage error: {0}")]
    Storage(String),
}

/// Append-only destination for audit entries.
#[async_trait]
pub trait AuditSink: Send + Sync {
    /// Append one entry.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError`] if the entry could not be persisted. Callers on a
    /// primary path should use [`record_best_effort`] instead of propagating it.
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError>;
}

/// Upper bound on a best-effort write.
pub const AUDIT_WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Record `entry`, logging and swallowing any sink failure.
///
/// A sink slower than [`AUDIT_WRITE_TIMEOUT`] is abandoned.
pub async fn record_best_effort(sink: &dyn AuditSink, entry: AuditEntry) {
    record_best_effort_within(sink, entry, AUDIT_WRITE_TIMEOUT).await;
}

/// [`record_best_effort`] with an explicit deadline.
pub async fn record_best_effort_within(sink: &dyn AuditSink, entry: AuditEntry, limit: Duration) {
    let action = entry.action.clone();
    match tokio::time::timeout(limit, sink.record(entry)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => {
            tracing::warn!(action = %action, error = %e, "Audit sink write failed; continuing");
        }
        Err(_) => {
            tracing::warn!(
                action = %action,
                timeout = ?limit,
                "Audit sink write timed out; continuing"
            );
        }
    }
}

/// Sink that emits entries as structured `tracing` events under the `audit`
/// target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
    async fn record(&self, entry: AuditEntry) -> Result<(), AuditError> {
        tracing::info!(
            target: "audit",
            action = %entry.action,
            entity_type = %entry.entity_type,
            tenant_id = ?entry.tenant_id,
            actor_id = ?entry.actor_id,
            entity_id = ?entry.entity_id,
            metadata = %entry.metadata_value(),
            "audit"
        );
        Ok(())
    }
}
