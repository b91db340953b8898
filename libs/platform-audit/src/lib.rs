//! Append-only audit log for security- and ledger-relevant events.
//!
//! The sink is a best-effort collaborator: callers go through
//! [`record_best_effort`] so that a failing sink never fails the primary
//! operation.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod entry;
pub mod sink;
pub mod storage;

pub use entry::{AuditEntry, MAX_METADATA_BYTES};
pub use sink::{
    AUDIT_WRITE_TIMEOUT, AuditError, AuditSink, TracingAuditSink, record_best_effort,
    record_best_effort_within,
};
pub use storage::SeaOrmAuditSink;
