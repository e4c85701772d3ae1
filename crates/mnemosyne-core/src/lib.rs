//! # Mnemosyne Core
//!
//! Core types and traits for the Mnemosyne change-auditing platform.
//!
//! This crate provides the foundational data structures shared across the
//! Mnemosyne ecosystem, including:
//!
//! - [`AttributeMap`] - A record's named attribute state at a point in time
//! - [`AuditEntry`] - One immutable, versioned entry in a record's history
//! - [`AuditChanges`] - The audited payload (snapshot or delta)
//! - [`AuditStore`] - The append-only persistence contract for audit trails
//!
//! ## Example
//!
//! ```rust
//! use mnemosyne_core::{AttributeMap, AuditAction, AuditChanges, AuditEntry};
//! use serde_json::json;
//!
//! let mut state = AttributeMap::new();
//! state.insert("name".to_string(), json!("Atlas"));
//!
//! let entry = AuditEntry::new(
//!     "workspaces",
//!     "ws-42",
//!     AuditAction::Create,
//!     1,
//!     AuditChanges::Snapshot(state),
//! )
//! .with_actor("user-7");
//!
//! assert_eq!(entry.version, 1);
//! assert!(entry.changes.contains("name"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod attributes;
pub mod entry;
pub mod store;


// Re-export main types at crate root
pub use attributes::{AttributeMap, ValueChange};
pub use entry::{AuditAction, AuditChanges, AuditEntry};
pub use store::{AuditStore, StorageError};
