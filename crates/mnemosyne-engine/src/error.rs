//! Error types for the Mnemosyne engine.
//!
//! This module defines the error types used throughout the
//! `mnemosyne-engine` crate.

use mnemosyne_core::StorageError;
use thiserror::Error;

/// Result type alias using [`AuditError`] as the error type.
pub type Result<T> = std::result::Result<T, AuditError>;

/// Errors that can occur while configuring or recording audits.
#[derive(Error, Debug)]
pub enum AuditError {
    /// Audit configuration was rejected.
    #[error("Invalid audit configuration: {reason}")]
    InvalidConfig {
        /// Reason the configuration is invalid.
        reason: String,
    },

    /// The audit store failed.
    #[error("Audit storage failed: {0}")]
    Storage(#[from] StorageError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_config() {
        let err = AuditError::InvalidConfig {
            reason: "`only` and `except` are mutually exclusive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid audit configuration: `only` and `except` are mutually exclusive"
        );
    }

    #[test]
    fn test_error_display_storage() {
        let err = AuditError::Storage(StorageError::Backend {
            message: "disk full".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Audit storage failed: Storage backend error: disk full"
        );
    }
}
