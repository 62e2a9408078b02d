//! Wire-convention capabilities: key case transforms and value predicates.
//!
//! Internal keys are camelCase; the wire convention is snake_case. Both
//! transforms recurse through plain objects and arrays only — record
//! instances never appear in these trees, the recursive marshal calls handle
//! them before the transforms run.

use convert_case::{Case, Casing};
use serde_json::{Map, Value};

/// Rename keys from the wire convention to internal camelCase, recursively.
#[must_use]
pub fn to_internal(tree: &Value) -> Value {
    rekey(tree, Case::Camel)
}

/// Rename keys from internal camelCase to the wire convention, recursively.
#[must_use]
pub fn to_external(tree: &Value) -> Value {
    rekey(tree, Case::Snake)
}

fn rekey(tree: &Value, case: Case) -> Value {
    match tree {
        Value::Object(map) => {
            let renamed: Map<String, Value> = map
                .iter()
                .map(|(key, value)| (key.as_str().to_case(case), rekey(value, case)))
                .collect();
            Value::Object(renamed)
        }
        Value::Array(items) => Value::Array(items.iter().map(|v| rekey(v, case)).collect()),
        leaf => leaf.clone(),
    }
}

/// True for values with nothing in them: `null` or the empty string.
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// True only for `null`. Distinguishes "no value" from falsy-but-present
/// values such as `0` and `false`.
#[must_use]
pub const fn is_none(value: &Value) -> bool {
    matches!(value, Value::Null)
}
