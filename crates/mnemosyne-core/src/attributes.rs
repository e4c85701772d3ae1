//! Attribute state for audited records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A record's named attribute state at a point in time.
///
/// Keys are attribute names, values the attribute values as JSON. The map
/// guarantees key uniqueness; key order carries no meaning beyond giving the
/// encoding a deterministic shape.
pub type AttributeMap = BTreeMap<String, Value>;

/// An attribute transition captured by an update.
///
/// Serialized as the two-element array `[old, new]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(Value, Value)", into = "(Value, Value)")]
pub struct ValueChange {
    /// Value before the mutation.
    pub old: Value,

    /// Value after the mutation.
    pub new: Value,
}

impl ValueChange {
    /// Creates a transition from `old` to `new`.
    #[must_use]
    pub const fn new(old: Value, new: Value) -> Self {
        Self { old, new }
    }
}

impl From<(Value, Value)> for ValueChange {
    fn from((old, new): (Value, Value)) -> Self {
        Self { old, new }
    }
}

impl From<ValueChange> for (Value, Value) {
    fn from(change: ValueChange) -> Self {
        (change.old, change.new)
    }
}
