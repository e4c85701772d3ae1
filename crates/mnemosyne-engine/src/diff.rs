//! Change payload computation for lifecycle events.
//!
//! Pure functions over attribute maps; no I/O and no clock access. The
//! recorder decides what to do with the results, including the rule that an
//! empty update delta produces no audit entry at all.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

use mnemosyne_core::{AttributeMap, ValueChange};

/// Captures the permitted slice of a record's state.
///
/// Used for create and destroy entries: every permitted attribute present
/// in the state appears in the result with its current value.
#[must_use]
pub fn snapshot(state: &AttributeMap, permitted: &BTreeSet<String>) -> AttributeMap {
    state
        .iter()
        .filter(|(name, _)| permitted.contains(name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}

/// Computes the permitted attribute transitions of an update.
///
/// Attributes compare by value, not identity; an attribute present on only
/// one side compares against JSON null, so appearing and disappearing
/// attributes still yield a transition. An empty result means the update
/// touched no permitted attribute and must not produce an audit entry.
#[must_use]
pub fn delta(
    before: &AttributeMap,
    after: &AttributeMap,
    permitted: &BTreeSet<String>,
) -> BTreeMap<String, ValueChange> {
    permitted
        .iter()
        .filter_map(|name| {
            let old = before.get(name).cloned().unwrap_or(Value::Null);
            let new = after.get(name).cloned().unwrap_or(Value::Null);
            if old == new {
                None
            } else {
                Some((name.clone(), ValueChange::new(old, new)))
            }
        })
        .collect()
}
