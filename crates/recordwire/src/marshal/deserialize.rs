//! Wire tree to instance.

use crate::{
    Error,
    instance::{Init, Instance},
    marshal::{DeserializeOptions, Strictness},
    model::{
        field::{FieldDescriptor, FieldKind},
        record::RecordType,
    },
    obs::{self, DiagnosticEvent},
    schema::registry,
    value::{
        FieldValue,
        coerce::{self, CoerceError, Raw},
    },
    wire,
};
use serde_json::Value;
use std::sync::Arc;

/// Deserialize a textual JSON document into an instance of `record`.
///
/// Malformed text fails with [`Error::Parse`]; a `null` document yields
/// `Ok(None)`.
pub fn from_str(
    record: &'static RecordType,
    text: &str,
    opts: &DeserializeOptions,
) -> Result<Option<Instance>, Error> {
    let tree: Value = serde_json::from_str(text)?;
    from_value(record, &tree, opts)
}

/// Deserialize a parsed JSON tree into an instance of `record`.
///
/// The caller's tree is never mutated. A `null` tree yields `Ok(None)`.
pub fn from_value(
    record: &'static RecordType,
    tree: &Value,
    opts: &DeserializeOptions,
) -> Result<Option<Instance>, Error> {
    if tree.is_null() {
        return Ok(None);
    }
    from_normalized(record, &wire::to_internal(tree), opts)
}

// Recursion entry once keys are internally consistent; nested sub-trees were
// normalized along with the root.
fn from_normalized(
    record: &'static RecordType,
    tree: &Value,
    opts: &DeserializeOptions,
) -> Result<Option<Instance>, Error> {
    if tree.is_null() {
        return Ok(None);
    }

    let schema = registry::get_schema(record)?;
    let mut inits: Vec<(&str, Init)> = Vec::with_capacity(schema.len());

    for descriptor in schema.fields() {
        let raw = read_field(tree, descriptor);
        let value = match descriptor.kind {
            FieldKind::Fragment(nested) => match raw {
                Some(sub) => FieldValue::Fragment(
                    from_normalized(nested, sub, opts)?.map(Arc::new),
                ),
                None => FieldValue::Fragment(None),
            },
            FieldKind::FragmentArray(nested) => {
                // Anything that is not a sequence, absent included, reads as
                // an empty one. By design, not an error.
                let items = match raw {
                    Some(Value::Array(items)) => items.as_slice(),
                    _ => &[],
                };
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    if let Some(instance) = from_normalized(nested, item, opts)? {
                        out.push(Arc::new(instance));
                    }
                }
                FieldValue::Fragments(out)
            }
            FieldKind::Scalar(_) | FieldKind::Enum(_) => {
                let raw = raw.cloned().unwrap_or(Value::Null);
                match coerce::coerce(descriptor, Raw::Value(raw)) {
                    Ok(value) => value,
                    Err(CoerceError::Validation { enum_name: _, value })
                        if opts.strictness == Strictness::Lenient =>
                    {
                        obs::report(&DiagnosticEvent::EnumRejected {
                            record: record.name,
                            field: descriptor.key,
                            value,
                        });
                        FieldValue::NULL
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        };
        inits.push((descriptor.key, Init::Field(value)));
    }

    Instance::create(record, inits).map(Some)
}

// Read at the wire key first, then fall back to the internal key.
fn read_field<'a>(tree: &'a Value, descriptor: &FieldDescriptor) -> Option<&'a Value> {
    let map = tree.as_object()?;
    map.get(descriptor.wire_key())
        .or_else(|| map.get(descriptor.key))
}
