//! In-memory audit trail storage.

use std::collections::HashMap;

use parking_lot::Mutex;

use mnemosyne_core::{AuditEntry, AuditStore, StorageError};

/// In-memory [`AuditStore`] for tests and embedded use.
///
/// Entries are grouped per record and kept in append order. Nothing is
/// persisted across process restarts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    trails: Mutex<HashMap<(String, String), Vec<AuditEntry>>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of entries across all records.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.trails.lock().values().map(Vec::len).sum()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.trails.lock().clear();
    }
}

impl AuditStore for MemoryStore {
    fn append(&self, entry: AuditEntry) -> Result<(), StorageError> {
        let key = (entry.record_type.clone(), entry.record_id.clone());
        self.trails.lock().entry(key).or_default().push(entry);
        Ok(())
    }

    fn latest_version(&self, record_type: &str, record_id: &str) -> Result<u64, StorageError> {
        let trails = self.trails.lock();
        let latest = trails
            .get(&(record_type.to_string(), record_id.to_string()))
            .and_then(|entries| entries.iter().map(|entry| entry.version).max())
            .unwrap_or(0);
        Ok(latest)
    }

    fn list_for(
        &self,
        record_type: &str,
        record_id: &str,
    ) -> Result<Vec<AuditEntry>, StorageError> {
        let trails = self.trails.lock();
        let mut entries = trails
            .get(&(record_type.to_string(), record_id.to_string()))
            .cloned()
            .unwrap_or_default();
        entries.sort_by_key(|entry| entry.version);
        Ok(entries)
    }
}
