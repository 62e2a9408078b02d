//! Instance to wire tree.

use crate::{
    instance::Instance,
    model::field::FieldKind,
    obs::{self, DiagnosticEvent},
    value::FieldValue,
    wire,
};
use serde_json::{Map, Value};

impl Instance {
    /// Serialize to a plain JSON tree in the wire key convention.
    ///
    /// Fields declared exclude-on-write are omitted entirely. Output keys
    /// follow schema order. Serialization never fails: unsupported fragment
    /// shapes are written as `null` and reported through the diagnostic
    /// sink.
    #[must_use]
    pub fn serialize(&self) -> Value {
        wire::to_external(&self.serialize_tree())
    }

    // Inner walk in internal key space; denormalization happens once, on the
    // assembled root.
    fn serialize_tree(&self) -> Value {
        let mut out = Map::new();

        for (descriptor, value) in self.schema().fields().iter().zip(self.values()) {
            if !descriptor.include_on_write {
                continue;
            }

            let emitted = match (&descriptor.kind, value) {
                (FieldKind::Fragment(_), FieldValue::Fragment(Some(instance))) => {
                    instance.serialize_tree()
                }
                (FieldKind::Fragment(_), FieldValue::Fragment(None)) => Value::Null,
                // Raw value in a fragment slot: the nested type's legacy
                // hook is the one fallback; otherwise null plus a report.
                (FieldKind::Fragment(nested), FieldValue::Scalar(raw)) => {
                    if raw.is_null() {
                        Value::Null
                    } else if let Some(hook) = nested.legacy_serialize {
                        hook(raw, descriptor)
                    } else {
                        obs::report(&DiagnosticEvent::SerializeAnomaly {
                            record: self.record().name,
                            field: descriptor.key,
                            value: raw.clone(),
                        });
                        Value::Null
                    }
                }
                (FieldKind::FragmentArray(_), FieldValue::Fragments(items)) => Value::Array(
                    items.iter().map(|item| item.serialize_tree()).collect(),
                ),
                // Raw array in a fragment-array slot: map element-wise, each
                // element through the legacy hook where one exists, else null
                // plus a report. The array itself is never discarded.
                (FieldKind::FragmentArray(nested), FieldValue::Scalar(Value::Array(items))) => {
                    Value::Array(
                        items
                            .iter()
                            .map(|raw| {
                                if raw.is_null() {
                                    Value::Null
                                } else if let Some(hook) = nested.legacy_serialize {
                                    hook(raw, descriptor)
                                } else {
                                    obs::report(&DiagnosticEvent::SerializeAnomaly {
                                        record: self.record().name,
                                        field: descriptor.key,
                                        value: raw.clone(),
                                    });
                                    Value::Null
                                }
                            })
                            .collect(),
                    )
                }
                // Non-array shape in a fragment-array slot: empty sequence.
                (FieldKind::FragmentArray(_), _) => Value::Array(Vec::new()),
                (_, FieldValue::Scalar(scalar)) => scalar.clone(),
                // Typed fragment shapes cannot land in scalar fields; the
                // setter and factory both kind-check.
                _ => Value::Null,
            };

            out.insert(descriptor.wire_key().to_string(), emitted);
        }

        Value::Object(out)
    }
}
