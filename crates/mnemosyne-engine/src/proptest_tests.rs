//! Property-based tests for the engine's filtering and diff invariants.
//!
//! These tests use proptest to verify the filtering and suppression rules
//! across many randomly generated schemas and states.

use proptest::prelude::*;
use std::collections::BTreeSet;

use serde_json::Value;

use crate::config::{AuditConfig, DEFAULT_IGNORED_ATTRIBUTES};
use crate::filter::permitted_columns;
use crate::{diff, AttributeMap};

/// Strategy for generating attribute names.
fn attribute_name_strategy() -> impl Strategy<Value = String> {
    "(id|name|email|settings|position|state|owner_id|quantity)"
}

/// Strategy for generating attribute values.
fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| serde_json::json!(n)),
        "[a-zA-Z0-9]{0,12}".prop_map(Value::from),
    ]
}

/// Strategy for generating schemas (attribute name sets).
fn schema_strategy() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set(attribute_name_strategy(), 0..8)
}

/// Strategy for generating attribute maps.
fn attribute_map_strategy() -> impl Strategy<Value = AttributeMap> {
    prop::collection::btree_map(attribute_name_strategy(), value_strategy(), 0..8)
}

proptest! {
    /// Only-mode results are a subset of the only set, sized by its overlap
    /// with the schema.
    #[test]
    fn only_mode_is_intersection(
        schema in schema_strategy(),
        only in prop::collection::btree_set(attribute_name_strategy(), 1..4),
    ) {
        let config = AuditConfig::builder().only(only.clone()).build().unwrap();
        let permitted = permitted_columns(&config, &schema);

        prop_assert!(permitted.is_subset(&only));
        prop_assert_eq!(permitted.len(), schema.intersection(&only).count());
    }

    /// Except-mode results never contain an excluded or bookkeeping name.
    #[test]
    fn except_mode_is_difference(
        schema in schema_strategy(),
        except in prop::collection::btree_set(attribute_name_strategy(), 0..4),
    ) {
        let config = AuditConfig::builder().except(except.clone()).build().unwrap();
        let permitted = permitted_columns(&config, &schema);

        prop_assert!(permitted.is_subset(&schema));
        for name in &permitted {
            prop_assert!(!except.contains(name));
            prop_assert!(!DEFAULT_IGNORED_ATTRIBUTES.contains(&name.as_str()));
        }
        let expected: BTreeSet<String> =
            schema.difference(config.excluded()).cloned().collect();
        prop_assert_eq!(permitted, expected);
    }

    /// Snapshots never leak an attribute outside the permitted set.
    #[test]
    fn snapshot_never_leaks_excluded(
        state in attribute_map_strategy(),
        except in prop::collection::btree_set(attribute_name_strategy(), 0..4),
    ) {
        let config = AuditConfig::builder().except(except.clone()).build().unwrap();
        let schema: BTreeSet<String> = state.keys().cloned().collect();
        let permitted = permitted_columns(&config, &schema);

        let snapshot = diff::snapshot(&state, &permitted);
        for name in snapshot.keys() {
            prop_assert!(permitted.contains(name));
            prop_assert!(!except.contains(name));
        }
    }

    /// A delta contains an attribute exactly when its value changed.
    #[test]
    fn delta_contains_exactly_the_changed(
        before in attribute_map_strategy(),
        after in attribute_map_strategy(),
    ) {
        let schema: BTreeSet<String> =
            before.keys().chain(after.keys()).cloned().collect();
        let delta = diff::delta(&before, &after, &schema);

        for (name, change) in &delta {
            prop_assert_ne!(&change.old, &change.new, "unchanged attribute {} emitted", name);
        }
        for name in &schema {
            let old = before.get(name).cloned().unwrap_or(Value::Null);
            let new = after.get(name).cloned().unwrap_or(Value::Null);
            prop_assert_eq!(delta.contains_key(name), old != new);
        }
    }

    /// Diffing a state against itself is always a no-op.
    #[test]
    fn self_delta_is_empty(state in attribute_map_strategy()) {
        let schema: BTreeSet<String> = state.keys().cloned().collect();
        prop_assert!(diff::delta(&state, &state, &schema).is_empty());
    }
}
