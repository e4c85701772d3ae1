//! Persistence contract for audit trails.

use std::fmt::Debug;
use std::path::PathBuf;

use crate::entry::AuditEntry;

/// Errors surfaced by audit trail storage backends.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O failure against backing storage.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path of the file or directory involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Entry encoding or decoding failure.
    #[error("Failed to serialize audit entry: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure.
    #[error("Storage backend error: {message}")]
    Backend {
        /// Reason reported by the backend.
        message: String,
    },
}

/// Append-only storage for audit entries.
///
/// The recording engine performs exactly one [`append`](Self::append) per
/// qualifying lifecycle event and never updates or deletes what it wrote;
/// retention is the deployment's concern, not the store's. Implementations
/// must be safe to share across threads, though version assignment for a
/// single record is serialized by the caller, not the store.
pub trait AuditStore: Send + Sync + Debug {
    /// Persists an entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry cannot be written. The engine
    /// propagates the failure to its caller unchanged.
    fn append(&self, entry: AuditEntry) -> Result<(), StorageError>;

    /// Returns the highest version recorded for a record, 0 when the record
    /// has no entries.
    ///
    /// # Errors
    ///
    /// Returns an error if backing storage cannot be read.
    fn latest_version(&self, record_type: &str, record_id: &str) -> Result<u64, StorageError>;

    /// Returns a record's entries, ascending by version.
    ///
    /// # Errors
    ///
    /// Returns an error if backing storage cannot be read or an entry
    /// cannot be decoded.
    fn list_for(&self, record_type: &str, record_id: &str)
        -> Result<Vec<AuditEntry>, StorageError>;
}
