//! Audit entry definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::{Timestamp, Uuid};

use crate::attributes::{AttributeMap, ValueChange};

/// Generates a new v7 UUID for audit entries.
fn new_entry_id() -> Uuid {
    let ts = Timestamp::now(uuid::NoContext);
    Uuid::new_v7(ts)
}

/// Record lifecycle actions eligible for auditing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditAction {
    /// Record was created.
    Create,
    /// Record attributes were updated.
    Update,
    /// Record was destroyed.
    Destroy,
}

impl AuditAction {
    /// All auditable lifecycle actions.
    pub const ALL: [Self; 3] = [Self::Create, Self::Update, Self::Destroy];

    /// Returns a string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Destroy => "destroy",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The audited payload of a lifecycle event.
///
/// Create and destroy capture a snapshot of the permitted attributes; update
/// captures only the permitted attributes whose value changed, each as an
/// `[old, new]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "attributes", rename_all = "lowercase")]
pub enum AuditChanges {
    /// Permitted attribute state at the time of the event.
    Snapshot(AttributeMap),

    /// Permitted attribute transitions produced by an update.
    Delta(BTreeMap<String, ValueChange>),
}

impl AuditChanges {
    /// Returns true when the payload captures no attributes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Snapshot(map) => map.is_empty(),
            Self::Delta(map) => map.is_empty(),
        }
    }

    /// Number of attributes captured by the payload.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Snapshot(map) => map.len(),
            Self::Delta(map) => map.len(),
        }
    }

    /// Returns true when the payload captures the named attribute.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        match self {
            Self::Snapshot(map) => map.contains_key(name),
            Self::Delta(map) => map.contains_key(name),
        }
    }

    /// Names of the captured attributes.
    #[must_use]
    pub fn attribute_names(&self) -> Vec<&str> {
        match self {
            Self::Snapshot(map) => map.keys().map(String::as_str).collect(),
            Self::Delta(map) => map.keys().map(String::as_str).collect(),
        }
    }

    /// The snapshot payload, when this payload is a snapshot.
    #[must_use]
    pub const fn as_snapshot(&self) -> Option<&AttributeMap> {
        match self {
            Self::Snapshot(map) => Some(map),
            Self::Delta(_) => None,
        }
    }

    /// The delta payload, when this payload is a delta.
    #[must_use]
    pub const fn as_delta(&self) -> Option<&BTreeMap<String, ValueChange>> {
        match self {
            Self::Delta(map) => Some(map),
            Self::Snapshot(_) => None,
        }
    }
}

/// One immutable entry in a record's audit trail.
///
/// Entries reference the audited record by type and id only; the record may
/// be destroyed later while its trail remains. Once persisted an entry is
/// never mutated or deleted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Unique entry ID.
    pub id: Uuid,

    /// Type of the audited record.
    pub record_type: String,

    /// Identifier of the audited record within its type.
    pub record_id: String,

    /// Lifecycle action that produced this entry.
    pub action: AuditAction,

    /// Position in the record's history, starting at 1.
    pub version: u64,

    /// Audited payload.
    pub changes: AuditChanges,

    /// Identity that performed the action, when one was resolved.
    pub actor_id: Option<String>,

    /// Caller-supplied annotation, stored verbatim.
    pub comment: Option<String>,

    /// When the entry was persisted.
    pub created_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Creates a new entry with no actor or comment.
    #[must_use]
    pub fn new(
        record_type: &str,
        record_id: &str,
        action: AuditAction,
        version: u64,
        changes: AuditChanges,
    ) -> Self {
        Self {
            id: new_entry_id(),
            record_type: record_type.to_string(),
            record_id: record_id.to_string(),
            action,
            version,
            changes,
            actor_id: None,
            comment: None,
            created_at: Utc::now(),
        }
    }

    /// Attributes the entry to an acting identity.
    #[must_use]
    pub fn with_actor(mut self, actor_id: &str) -> Self {
        self.actor_id = Some(actor_id.to_string());
        self
    }

    /// Attaches a caller-supplied comment.
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }
}
