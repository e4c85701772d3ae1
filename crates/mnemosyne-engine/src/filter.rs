//! Attribute filtering for audit payloads.

use std::collections::BTreeSet;

use crate::config::AuditConfig;

/// Computes the attribute names eligible for auditing under `config`.
///
/// With a non-empty included set the result is the intersection of the
/// schema with that set; otherwise it is the schema minus the excluded set.
/// The result depends only on the configuration and the schema, never on
/// any record's values, so two records of the same type always get the same
/// permitted set for a given configuration snapshot.
#[must_use]
pub fn permitted_columns(config: &AuditConfig, schema: &BTreeSet<String>) -> BTreeSet<String> {
    if config.included().is_empty() {
        schema.difference(config.excluded()).cloned().collect()
    } else {
        schema.intersection(config.included()).cloned().collect()
    }
}
