//! Append-only JSON-lines audit trail storage.
//!
//! One serialized [`AuditEntry`] per line. Appends go through a mutex so
//! concurrent writers cannot interleave partial lines; reads parse the whole
//! file. Suited to modest trail sizes where durability across process
//! restarts matters more than lookup speed.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use mnemosyne_core::{AuditEntry, AuditStore, StorageError};

/// File-backed [`AuditStore`] writing one JSON document per line.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonlStore {
    /// Creates a store backed by the given file, creating parent directories
    /// as needed. The file itself is created on first append.
    ///
    /// # Errors
    ///
    /// Returns an error if a parent directory cannot be created.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Io {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        Ok(Self {
            path,
            write_lock: Mutex::new(()),
        })
    }

    /// Returns the path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_entries(&self) -> Result<Vec<AuditEntry>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(StorageError::from))
            .collect()
    }
}

impl AuditStore for JsonlStore {
    fn append(&self, entry: AuditEntry) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(&entry)?;
        line.push('\n');

        let _guard = self.write_lock.lock();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::Io {
                path: self.path.clone(),
                source: e,
            })?;
        file.write_all(line.as_bytes()).map_err(|e| StorageError::Io {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(
            path = ?self.path,
            record_type = %entry.record_type,
            record_id = %entry.record_id,
            version = entry.version,
            "Appended audit entry"
        );
        Ok(())
    }

    fn latest_version(&self, record_type: &str, record_id: &str) -> Result<u64, StorageError> {
        let latest = self
            .read_entries()?
            .iter()
            .filter(|entry| entry.record_type == record_type && entry.record_id == record_id)
            .map(|entry| entry.version)
            .max()
            .unwrap_or(0);
        Ok(latest)
    }

    fn list_for(
        &self,
        record_type: &str,
        record_id: &str,
    ) -> Result<Vec<AuditEntry>, StorageError> {
        let mut entries: Vec<AuditEntry> = self
            .read_entries()?
            .into_iter()
            .filter(|entry| entry.record_type == record_type && entry.record_id == record_id)
            .collect();
        entries.sort_by_key(|entry| entry.version);
        Ok(entries)
    }
}
