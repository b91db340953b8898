use serde_json::{Value, json};
use time::OffsetDateTime;
use uuid::Uuid;

/// Upper bound for the serialized metadata payload of a single entry.
pub const MAX_METADATA_BYTES: usize = 4096;

/// One audit record.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub tenant_id: Option<Uuid>,
    pub actor_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Option<Uuid>,
    metadata: Value,
    pub occurred_at: OffsetDateTime,
}

impl AuditEntry {
    pub fn new(action: impl Into<String>, entity_type: impl Into<String>) -> Self {
        Self {
            tenant_id: None,
            actor_id: None,
            action: action.into(),
            entity_type: entity_type.into(),
            entity_id: None,
            metadata: Value::Null,
            occurred_at: OffsetDateTime::now_utc(),
        }
    }

    #[must_use]
    pub fn tenant(mut self, tenant_id: Option<Uuid>) -> Self {
        self.tenant_id = tenant_id;
        self
    }

    #[must_use]
    pub fn actor(mut self, actor_id: Option<Uuid>) -> Self {
        self.actor_id = actor_id;
        self
    }

    #[must_use]
    pub fn entity(mut self, entity_id: Uuid) -> Self {
        self.entity_id = Some(entity_id);
        self
    }

    /// Attach metadata. Payloads above [`MAX_METADATA_BYTES`] are replaced by a
    /// truncation marker carrying the original size.
    #[must_use]
    pub fn metadata(mut self, metadata: Value) -> Self {
        self.metadata = cap_metadata(metadata);
        self
    }

    #[must_use]
    pub fn metadata_value(&self) -> &Value {
        &self.metadata
    }
}

fn cap_metadata(metadata: Value) -> Value {
    let size = serde_json::to_vec(&metadata).map_or(usize::MAX, |bytes| bytes.len());
    if size <= MAX_METADATA_BYTES {
        metadata
    } else {
        json!({ "truncated": true, "original_bytes": size })
    }
}
