//! # Mnemosyne Engine
//!
//! Change-auditing engine for the Mnemosyne platform.
//!
//! Given before/after attribute state around a record mutation, the engine
//! records an immutable, versioned history of the record's lifecycle
//! events, filtered to the attributes the record type's configuration
//! permits and optionally attributed to an acting identity:
//!
//! - [`ConfigRegistry`] / [`AuditConfig`] - per-record-type policy: which
//!   attributes are tracked and which lifecycle actions are audited
//! - [`permitted_columns`] - the attribute filter
//! - [`diff`] - snapshot and delta payload computation, including the rule
//!   that a no-op update yields no entry
//! - [`AuditRecorder`] / [`LifecycleEvent`] - versioning, actor and comment
//!   attribution, persistence through an [`AuditStore`]
//! - [`reconstruct`] - point-in-time state from a recorded trail
//!
//! The caller drives the engine synchronously from inside its own record
//! transaction and serializes mutations of a single record; the engine
//! performs no background work and holds no long-lived locks.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use mnemosyne_engine::{AuditConfig, AuditRecorder, ConfigRegistry, LifecycleEvent};
//! use mnemosyne_store::MemoryStore;
//! use serde_json::json;
//!
//! let registry = Arc::new(ConfigRegistry::new());
//! registry.configure(
//!     "workspaces",
//!     AuditConfig::builder().only(["name"]).build().unwrap(),
//! );
//!
//! let recorder = AuditRecorder::new(registry, Arc::new(MemoryStore::new()));
//!
//! let mut state = mnemosyne_core::AttributeMap::new();
//! state.insert("name".to_string(), json!("Atlas"));
//!
//! let entry = recorder
//!     .record(&LifecycleEvent::created("workspaces", "ws-1", state).with_actor("user-7"))
//!     .unwrap()
//!     .expect("create is audited");
//! assert_eq!(entry.version, 1);
//! ```

pub mod config;
pub mod diff;
pub mod error;
pub mod filter;
pub mod recorder;
pub mod replay;

#[cfg(test)]
mod proptest_tests;

// Re-export main types at crate root
pub use config::{AuditConfig, AuditConfigBuilder, ConfigRegistry, DEFAULT_IGNORED_ATTRIBUTES};
pub use error::{AuditError, Result};
pub use filter::permitted_columns;
pub use recorder::{AuditRecorder, LifecycleEvent};
pub use replay::reconstruct;

// Re-export the shared core types consumed at this crate's API surface
pub use mnemosyne_core::{
    AttributeMap, AuditAction, AuditChanges, AuditEntry, AuditStore, StorageError, ValueChange,
};
