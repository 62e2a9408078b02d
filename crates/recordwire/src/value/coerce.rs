//! Type coercion: raw wire values into the shape a field's kind demands.

use crate::{
    model::field::{FieldDescriptor, FieldKind, ScalarKind},
    value::FieldValue,
    wire,
};
use serde_json::{Number, Value};
use thiserror::Error as ThisError;

///
/// CoerceError
///

#[derive(Debug, ThisError)]
pub enum CoerceError {
    #[error("value {value} is not a member of enum {enum_name}")]
    Validation { enum_name: &'static str, value: Value },

    #[error("field {field} expects {expected}, got an incompatible {given} value")]
    KindMismatch {
        field: String,
        expected: String,
        given: &'static str,
    },
}

///
/// Raw
///
/// Coercion input: a plain JSON value, or a zero-argument producer supplied
/// at construction time. Wire data is never a producer.
///

pub enum Raw {
    Value(Value),
    Producer(fn() -> Value),
}

/// Coerce a raw value to the descriptor's kind.
///
/// Policy, in order: empty values resolve the default (declared default,
/// else the kind zero); producers are invoked and their output coerced;
/// everything else converts per kind. Kinds without a conversion rule pass
/// the value through unchanged.
pub fn coerce(descriptor: &FieldDescriptor, raw: Raw) -> Result<FieldValue, CoerceError> {
    match raw {
        Raw::Value(value) if wire::is_empty(&value) => Ok(resolve_default(descriptor)),
        Raw::Value(value) => coerce_kind(descriptor, value),
        Raw::Producer(producer) => coerce_kind(descriptor, producer()),
    }
}

fn resolve_default(descriptor: &FieldDescriptor) -> FieldValue {
    descriptor.default.as_ref().map_or_else(
        || FieldValue::zero_for(&descriptor.kind),
        |default| FieldValue::Scalar(default.resolve()),
    )
}

fn coerce_kind(descriptor: &FieldDescriptor, value: Value) -> Result<FieldValue, CoerceError> {
    let out = match descriptor.kind {
        FieldKind::Scalar(ScalarKind::Text) => Value::String(coerce_text(&value)),
        FieldKind::Scalar(ScalarKind::Number) => coerce_number(value),
        FieldKind::Scalar(ScalarKind::Boolean) => Value::Bool(coerce_boolean(&value)),
        FieldKind::Scalar(ScalarKind::List) => {
            if value.is_array() {
                value
            } else {
                Value::Array(Vec::new())
            }
        }
        FieldKind::Enum(ty) => {
            if !ty.is_member(&value) {
                return Err(CoerceError::Validation {
                    enum_name: ty.name,
                    value,
                });
            }
            value
        }
        // No conversion rule: pass through unchanged. For fragment kinds the
        // serializer owns the consequences (legacy hook or anomaly).
        FieldKind::Scalar(ScalarKind::Date)
        | FieldKind::Fragment(_)
        | FieldKind::FragmentArray(_) => value,
    };

    Ok(FieldValue::Scalar(out))
}

fn coerce_text(value: &Value) -> String {
    if wire::is_none(value) {
        return String::new();
    }
    match value {
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        // Compound values take their compact JSON text.
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

fn coerce_number(value: Value) -> Value {
    match value {
        // Already numeric: keep the exact wire number.
        Value::Number(_) => value,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map_or_else(|| Value::Number(0.into()), Value::Number),
        _ => Value::Number(0.into()),
    }
}

fn coerce_boolean(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        // Only the JSON literal forms are accepted as textual booleans.
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        Value::Number(n) => n.as_f64().is_some_and(|x| x != 0.0),
        _ => false,
    }
}
