//! Lifecycle event recording.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::config::ConfigRegistry;
use crate::diff;
use crate::error::Result;
use crate::filter::permitted_columns;
use mnemosyne_core::{AttributeMap, AuditAction, AuditChanges, AuditEntry, AuditStore};

/// A record mutation notification handed to the recorder.
///
/// The host record store builds one of these synchronously, inside the same
/// transaction as the mutation itself, so that mutation and audit entry
/// commit or roll back together. The acting identity is resolved by the
/// caller before the call; the comment is stored on the resulting entry
/// verbatim.
#[derive(Debug, Clone)]
pub struct LifecycleEvent {
    record_type: String,
    record_id: String,
    action: AuditAction,
    before: AttributeMap,
    after: AttributeMap,
    actor_id: Option<String>,
    comment: Option<String>,
}

impl LifecycleEvent {
    fn new(record_type: &str, record_id: &str, action: AuditAction) -> Self {
        Self {
            record_type: record_type.to_string(),
            record_id: record_id.to_string(),
            action,
            before: AttributeMap::new(),
            after: AttributeMap::new(),
            actor_id: None,
            comment: None,
        }
    }

    /// Notification for a newly created record, carrying its initial state.
    #[must_use]
    pub fn created(record_type: &str, record_id: &str, after: AttributeMap) -> Self {
        let mut event = Self::new(record_type, record_id, AuditAction::Create);
        event.after = after;
        event
    }

    /// Notification for an updated record, carrying the state on both sides
    /// of the mutation.
    #[must_use]
    pub fn updated(
        record_type: &str,
        record_id: &str,
        before: AttributeMap,
        after: AttributeMap,
    ) -> Self {
        let mut event = Self::new(record_type, record_id, AuditAction::Update);
        event.before = before;
        event.after = after;
        event
    }

    /// Notification for a destroyed record, carrying its final state.
    #[must_use]
    pub fn destroyed(record_type: &str, record_id: &str, before: AttributeMap) -> Self {
        let mut event = Self::new(record_type, record_id, AuditAction::Destroy);
        event.before = before;
        event
    }

    /// Attributes the event to an acting identity.
    #[must_use]
    pub fn with_actor(mut self, actor_id: &str) -> Self {
        self.actor_id = Some(actor_id.to_string());
        self
    }

    /// Attaches a caller-supplied comment, scoped to this single mutation.
    #[must_use]
    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    /// Type of the mutated record.
    #[must_use]
    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    /// Identifier of the mutated record.
    #[must_use]
    pub fn record_id(&self) -> &str {
        &self.record_id
    }

    /// Lifecycle action carried by this event.
    #[must_use]
    pub const fn action(&self) -> AuditAction {
        self.action
    }

    /// Union of attribute names across the before and after states.
    fn attribute_names(&self) -> BTreeSet<String> {
        self.before
            .keys()
            .chain(self.after.keys())
            .cloned()
            .collect()
    }
}

/// Records qualifying lifecycle events as versioned audit entries.
///
/// The recorder consults the configuration registry, computes the audit
/// payload, assigns the next version for the record, and appends exactly
/// one entry to the store per qualifying event.
#[derive(Debug)]
pub struct AuditRecorder {
    registry: Arc<ConfigRegistry>,
    store: Arc<dyn AuditStore>,
}

impl AuditRecorder {
    /// Creates a recorder over a configuration registry and a store.
    #[must_use]
    pub fn new(registry: Arc<ConfigRegistry>, store: Arc<dyn AuditStore>) -> Self {
        Self { registry, store }
    }

    /// Returns the configuration registry this recorder consults.
    #[must_use]
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Records a lifecycle event, returning the persisted entry.
    ///
    /// Returns `Ok(None)` without touching the store when the record type
    /// has no registered configuration, when the event's action is not
    /// audited, or when an update changes no permitted attribute.
    ///
    /// Version assignment reads the store's latest version and increments
    /// it. That read-then-write is not atomic within the engine: concurrent
    /// mutations of the same record must be serialized by the caller, in
    /// the same critical section as the mutation itself.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::Storage`](crate::AuditError::Storage) when the
    /// store fails to report the latest version or to append the entry. The
    /// failure propagates unchanged; whether to roll back the triggering
    /// mutation is the caller's decision.
    pub fn record(&self, event: &LifecycleEvent) -> Result<Option<AuditEntry>> {
        let Some(config) = self.registry.get(&event.record_type) else {
            tracing::trace!(
                record_type = %event.record_type,
                "Record type not configured for auditing"
            );
            return Ok(None);
        };

        if !config.audits(event.action) {
            tracing::trace!(
                record_type = %event.record_type,
                action = %event.action,
                "Action not audited"
            );
            return Ok(None);
        }

        let permitted = permitted_columns(&config, &event.attribute_names());

        let changes = match event.action {
            AuditAction::Create => AuditChanges::Snapshot(diff::snapshot(&event.after, &permitted)),
            AuditAction::Destroy => {
                AuditChanges::Snapshot(diff::snapshot(&event.before, &permitted))
            }
            AuditAction::Update => {
                let delta = diff::delta(&event.before, &event.after, &permitted);
                if delta.is_empty() {
                    tracing::debug!(
                        record_type = %event.record_type,
                        record_id = %event.record_id,
                        "Update changed no permitted attribute, suppressing entry"
                    );
                    return Ok(None);
                }
                AuditChanges::Delta(delta)
            }
        };

        let version = self
            .store
            .latest_version(&event.record_type, &event.record_id)?
            + 1;

        let mut entry = AuditEntry::new(
            &event.record_type,
            &event.record_id,
            event.action,
            version,
            changes,
        );
        if let Some(actor_id) = &event.actor_id {
            entry = entry.with_actor(actor_id);
        }
        if let Some(comment) = &event.comment {
            entry = entry.with_comment(comment);
        }

        self.store.append(entry.clone())?;
        tracing::debug!(
            record_type = %event.record_type,
            record_id = %event.record_id,
            action = %event.action,
            version,
            "Audit entry persisted"
        );

        Ok(Some(entry))
    }
}
