//! # Mnemosyne Store
//!
//! [`AuditStore`] implementations for the Mnemosyne audit platform:
//!
//! - [`MemoryStore`] - in-memory trails for tests and embedded use
//! - [`JsonlStore`] - append-only JSON-lines file, one entry per line
//!
//! Both backends are append-only from the engine's perspective: entries are
//! never updated or deleted through the store interface.

pub mod jsonl;
pub mod memory;

pub use jsonl::JsonlStore;
pub use memory::MemoryStore;

// Re-export the contract these backends implement
pub use mnemosyne_core::{AuditStore, StorageError};
