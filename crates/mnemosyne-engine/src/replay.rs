//! Point-in-time state reconstruction from an audit trail.

use mnemosyne_core::{AttributeMap, AuditChanges, AuditEntry};

/// Folds a record's trail up to and including `version` into the attribute
/// state the trail implies at that point.
///
/// Entries must be ordered ascending by version, as returned by
/// [`AuditStore::list_for`](mnemosyne_core::AuditStore::list_for). Snapshot
/// entries replace the working state; delta entries apply each attribute's
/// new value. Returns `None` when the trail holds no entry at or below
/// `version`.
///
/// Only audited attributes ever enter a trail, so the reconstruction covers
/// the permitted slice of the record, not its full schema.
#[must_use]
pub fn reconstruct(entries: &[AuditEntry], version: u64) -> Option<AttributeMap> {
    let mut state: Option<AttributeMap> = None;

    for entry in entries.iter().filter(|entry| entry.version <= version) {
        let current = state.get_or_insert_with(AttributeMap::new);
        match &entry.changes {
            AuditChanges::Snapshot(attributes) => {
                current.clone_from(attributes);
            }
            AuditChanges::Delta(delta) => {
                for (name, change) in delta {
                    current.insert(name.clone(), change.new.clone());
                }
            }
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use mnemosyne_core::{AuditAction, ValueChange};
    use serde_json::json;
    use std::collections::BTreeMap;

    fn snapshot_entry(version: u64, action: AuditAction, name: &str) -> AuditEntry {
        let mut map = AttributeMap::new();
        map.insert("name".to_string(), json!(name));
        AuditEntry::new("workspaces", "ws-1", action, version, AuditChanges::Snapshot(map))
    }

    fn rename_entry(version: u64, old: &str, new: &str) -> AuditEntry {
        let mut delta = BTreeMap::new();
        delta.insert("name".to_string(), ValueChange::new(json!(old), json!(new)));
        AuditEntry::new(
            "workspaces",
            "ws-1",
            AuditAction::Update,
            version,
            AuditChanges::Delta(delta),
        )
    }

    #[test]
    fn test_reconstruct_walks_versions() {
        let trail = vec![
            snapshot_entry(1, AuditAction::Create, "Atlas"),
            rename_entry(2, "Atlas", "Borealis"),
            rename_entry(3, "Borealis", "Cygnus"),
        ];

        assert_eq!(reconstruct(&trail, 1).unwrap()["name"], json!("Atlas"));
        assert_eq!(reconstruct(&trail, 2).unwrap()["name"], json!("Borealis"));
        assert_eq!(reconstruct(&trail, 3).unwrap()["name"], json!("Cygnus"));
    }

    #[test]
    fn test_reconstruct_before_first_entry_is_none() {
        let trail = vec![snapshot_entry(1, AuditAction::Create, "Atlas")];
        assert!(reconstruct(&trail, 0).is_none());
        assert!(reconstruct(&[], 5).is_none());
    }

    #[test]
    fn test_reconstruct_beyond_last_version_uses_full_trail() {
        let trail = vec![
            snapshot_entry(1, AuditAction::Create, "Atlas"),
            rename_entry(2, "Atlas", "Borealis"),
        ];

        assert_eq!(reconstruct(&trail, 99).unwrap()["name"], json!("Borealis"));
    }

    #[test]
    fn test_reconstruct_from_delta_only_trail() {
        // Create was not audited; the trail starts with an update.
        let trail = vec![rename_entry(1, "Atlas", "Borealis")];
        let state = reconstruct(&trail, 1).unwrap();

        assert_eq!(state["name"], json!("Borealis"));
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn test_destroy_snapshot_wins_at_end_of_trail() {
        let trail = vec![
            snapshot_entry(1, AuditAction::Create, "Atlas"),
            rename_entry(2, "Atlas", "Borealis"),
            snapshot_entry(3, AuditAction::Destroy, "Borealis"),
        ];

        assert_eq!(reconstruct(&trail, 3).unwrap()["name"], json!("Borealis"));
    }
}
