//! Per-record-type audit configuration and its registry.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::error::{AuditError, Result};
use mnemosyne_core::AuditAction;

/// Attribute names excluded from auditing unless a configuration names them
/// in [`AuditConfigBuilder::only`]: bookkeeping columns that change on every
/// write and carry no domain meaning.
pub const DEFAULT_IGNORED_ATTRIBUTES: &[&str] = &["created_at", "updated_at", "lock_version"];

fn default_ignored() -> BTreeSet<String> {
    DEFAULT_IGNORED_ATTRIBUTES
        .iter()
        .map(|name| (*name).to_string())
        .collect()
}

fn all_actions() -> BTreeSet<AuditAction> {
    AuditAction::ALL.into_iter().collect()
}

/// Immutable audit policy for one record type.
///
/// A non-empty included set restricts auditing to exactly those attributes;
/// otherwise every attribute outside the excluded set is audited. The two
/// sets are never both populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditConfig {
    included: BTreeSet<String>,
    excluded: BTreeSet<String>,
    actions: BTreeSet<AuditAction>,
}

impl Default for AuditConfig {
    /// Except-mode with the default ignored attributes, all actions audited.
    fn default() -> Self {
        Self {
            included: BTreeSet::new(),
            excluded: default_ignored(),
            actions: all_actions(),
        }
    }
}

impl AuditConfig {
    /// Creates a builder for configuring a record type.
    #[must_use]
    pub fn builder() -> AuditConfigBuilder {
        AuditConfigBuilder::new()
    }

    /// Returns true when `action` is audited under this configuration.
    #[must_use]
    pub fn audits(&self, action: AuditAction) -> bool {
        self.actions.contains(&action)
    }

    /// Attribute names explicitly included; auditing is restricted to this
    /// set when it is non-empty.
    #[must_use]
    pub const fn included(&self) -> &BTreeSet<String> {
        &self.included
    }

    /// Attribute names excluded from auditing.
    #[must_use]
    pub const fn excluded(&self) -> &BTreeSet<String> {
        &self.excluded
    }

    /// Lifecycle actions audited under this configuration.
    #[must_use]
    pub const fn actions(&self) -> &BTreeSet<AuditAction> {
        &self.actions
    }
}

/// Builder for [`AuditConfig`].
#[derive(Debug, Default)]
pub struct AuditConfigBuilder {
    only: BTreeSet<String>,
    except: BTreeSet<String>,
    on: BTreeSet<AuditAction>,
}

impl AuditConfigBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts auditing to exactly these attributes.
    #[must_use]
    pub fn only<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.only.extend(names.into_iter().map(Into::into));
        self
    }

    /// Excludes these attributes, in addition to
    /// [`DEFAULT_IGNORED_ATTRIBUTES`].
    #[must_use]
    pub fn except<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.except.extend(names.into_iter().map(Into::into));
        self
    }

    /// Restricts which lifecycle actions are audited. All three are audited
    /// when this is never called.
    #[must_use]
    pub fn on<I>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = AuditAction>,
    {
        self.on.extend(actions);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`AuditError::InvalidConfig`] when both `only` and `except`
    /// were supplied; the two policies are mutually exclusive.
    pub fn build(self) -> Result<AuditConfig> {
        if !self.only.is_empty() && !self.except.is_empty() {
            return Err(AuditError::InvalidConfig {
                reason: "`only` and `except` are mutually exclusive".to_string(),
            });
        }

        let actions = if self.on.is_empty() { all_actions() } else { self.on };

        if self.only.is_empty() {
            let mut excluded = default_ignored();
            excluded.extend(self.except);
            Ok(AuditConfig {
                included: BTreeSet::new(),
                excluded,
                actions,
            })
        } else {
            Ok(AuditConfig {
                included: self.only,
                excluded: BTreeSet::new(),
                actions,
            })
        }
    }
}

/// Registry of audit configurations keyed by record type.
///
/// Registering a configuration swaps the stored snapshot atomically:
/// [`get`](Self::get) hands out an `Arc`, so a recording call in flight
/// keeps whichever snapshot it started with and never observes a partially
/// applied configuration.
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    configs: RwLock<HashMap<String, Arc<AuditConfig>>>,
}

impl ConfigRegistry {
    /// Creates an empty registry. Record types without a registered
    /// configuration are not audited.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the configuration for a record type.
    pub fn configure(&self, record_type: impl Into<String>, config: AuditConfig) {
        let record_type = record_type.into();
        tracing::debug!(record_type = %record_type, "Audit configuration registered");
        self.configs.write().insert(record_type, Arc::new(config));
    }

    /// Returns the current configuration snapshot for a record type.
    #[must_use]
    pub fn get(&self, record_type: &str) -> Option<Arc<AuditConfig>> {
        self.configs.read().get(record_type).cloned()
    }

    /// Removes the configuration for a record type, disabling its auditing.
    /// Returns the configuration that was registered, if any.
    pub fn remove(&self, record_type: &str) -> Option<Arc<AuditConfig>> {
        self.configs.write().remove(record_type)
    }

    /// Returns true when a record type has a registered configuration.
    #[must_use]
    pub fn is_configured(&self, record_type: &str) -> bool {
        self.configs.read().contains_key(record_type)
    }
}
