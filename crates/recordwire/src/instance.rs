//! Record instances and the factory.

use crate::{
    Error,
    model::record::RecordType,
    schema::{Schema, SchemaError, registry},
    value::{
        FieldValue,
        coerce::{self, CoerceError, Raw},
    },
};
use serde_json::Value;
use std::sync::Arc;

///
/// Init
///
/// One initializer supplied to the factory: a raw JSON value (coerced per
/// the field's kind), a zero-argument producer (invoked, then coerced), or
/// an already-typed field value (the deserializer's path; kind-checked).
///

pub enum Init {
    Value(Value),
    Producer(fn() -> Value),
    Field(FieldValue),
}

///
/// Instance
///
/// One record instance: its type, its shared schema, and one value per
/// schema field in schema order. Shape never changes after construction;
/// field values are mutable through [`Instance::set`].
///
/// `Clone` performs the schema-driven deep copy: nested fragments are
/// recursively cloned into fresh `Arc`s, so mutating any field of the clone
/// never affects the original.
///

#[derive(Debug)]
pub struct Instance {
    record: &'static RecordType,
    schema: Arc<Schema>,
    values: Vec<FieldValue>,
}

impl Instance {
    /// Build a fully-populated instance.
    ///
    /// Every schema field receives a value: the supplied initializer if one
    /// names it, else its declared default, else the kind zero. Initializer
    /// keys that name no schema field are rejected rather than silently
    /// dropped.
    pub fn create(
        record: &'static RecordType,
        inits: Vec<(&str, Init)>,
    ) -> Result<Self, Error> {
        let schema = registry::get_schema(record)?;

        let mut supplied: Vec<Option<Init>> = Vec::new();
        supplied.resize_with(schema.len(), || None);

        for (key, init) in inits {
            let Some(position) = schema.index_of(key) else {
                return Err(SchemaError::UnknownField {
                    record: record.name,
                    field: key.to_string(),
                }
                .into());
            };
            supplied[position] = Some(init);
        }

        let mut values = Vec::with_capacity(schema.len());
        for (descriptor, init) in schema.fields().iter().zip(supplied) {
            let value = match init {
                Some(Init::Field(value)) => {
                    if !value.fits_kind(&descriptor.kind) {
                        return Err(CoerceError::KindMismatch {
                            field: descriptor.key.to_string(),
                            expected: descriptor.kind.to_string(),
                            given: value.shape_name(),
                        }
                        .into());
                    }
                    value
                }
                Some(Init::Value(raw)) => coerce::coerce(descriptor, Raw::Value(raw))?,
                Some(Init::Producer(producer)) => {
                    coerce::coerce(descriptor, Raw::Producer(producer))?
                }
                // Absent resolves the default policy; fragment arrays with
                // no default come out as an empty sequence.
                None => coerce::coerce(descriptor, Raw::Value(Value::Null))?,
            };
            values.push(value);
        }

        Ok(Self {
            record,
            schema,
            values,
        })
    }

    #[must_use]
    pub const fn record(&self) -> &'static RecordType {
        self.record
    }

    #[must_use]
    pub const fn schema(&self) -> &Arc<Schema> {
        &self.schema
    }

    /// Field values in schema order.
    #[must_use]
    pub fn values(&self) -> &[FieldValue] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.schema.index_of(key).map(|i| &self.values[i])
    }

    /// Scalar payload of a field, if it holds one.
    #[must_use]
    pub fn scalar(&self, key: &str) -> Option<&Value> {
        self.get(key).and_then(FieldValue::as_scalar)
    }

    /// Nested instance held by a fragment field, if present.
    #[must_use]
    pub fn fragment(&self, key: &str) -> Option<&Arc<Self>> {
        self.get(key).and_then(FieldValue::as_fragment)
    }

    /// Elements of a fragment-array field.
    #[must_use]
    pub fn fragments(&self, key: &str) -> Option<&[Arc<Self>]> {
        self.get(key).and_then(FieldValue::as_fragments)
    }

    /// Replace a field's value. The new value must fit the field's declared
    /// kind; the field set itself never changes.
    pub fn set(&mut self, key: &str, value: FieldValue) -> Result<(), Error> {
        let Some(position) = self.schema.index_of(key) else {
            return Err(SchemaError::UnknownField {
                record: self.record.name,
                field: key.to_string(),
            }
            .into());
        };
        let descriptor = &self.schema.fields()[position];
        if !value.fits_kind(&descriptor.kind) {
            return Err(CoerceError::KindMismatch {
                field: descriptor.key.to_string(),
                expected: descriptor.kind.to_string(),
                given: value.shape_name(),
            }
            .into());
        }
        self.values[position] = value;
        Ok(())
    }

    /// Shallow field-wise equality.
    ///
    /// Scalars compare by JSON value; fragments compare by `Arc` identity.
    /// Structurally identical but distinct nested instances are therefore
    /// *not* equal — a documented limitation of the schema walk.
    #[must_use]
    pub fn is_equal(&self, other: &Self) -> bool {
        if !self.record.is(other.record) {
            return false;
        }
        self.values
            .iter()
            .zip(&other.values)
            .all(|(a, b)| match (a, b) {
                (FieldValue::Scalar(x), FieldValue::Scalar(y)) => x == y,
                (FieldValue::Fragment(x), FieldValue::Fragment(y)) => match (x, y) {
                    (None, None) => true,
                    (Some(x), Some(y)) => Arc::ptr_eq(x, y),
                    _ => false,
                },
                (FieldValue::Fragments(x), FieldValue::Fragments(y)) => {
                    x.len() == y.len()
                        && x.iter().zip(y).all(|(x, y)| Arc::ptr_eq(x, y))
                }
                _ => false,
            })
    }
}

impl Clone for Instance {
    fn clone(&self) -> Self {
        let values = self
            .values
            .iter()
            .map(|value| match value {
                FieldValue::Scalar(v) => FieldValue::Scalar(v.clone()),
                FieldValue::Fragment(instance) => FieldValue::Fragment(
                    instance.as_ref().map(|i| Arc::new(Self::clone(i))),
                ),
                FieldValue::Fragments(items) => FieldValue::Fragments(
                    items.iter().map(|i| Arc::new(Self::clone(i))).collect(),
                ),
            })
            .collect();

        Self {
            record: self.record,
            schema: self.schema.clone(),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{ADDRESS, CUSTOMER};
    use serde_json::json;

    fn address(country: &str) -> Instance {
        Instance::create(&ADDRESS, vec![("country", Init::Value(json!(country)))]).unwrap()
    }

    #[test]
    fn create_fills_every_field() {
        let address = Instance::create(&ADDRESS, Vec::new()).unwrap();
        for key in ["country", "postcode", "state", "streetAddress", "suburb"] {
            assert_eq!(address.scalar(key).unwrap(), &json!(""), "field {key}");
        }
    }

    #[test]
    fn create_rejects_unknown_keys() {
        let err = Instance::create(&ADDRESS, vec![("planet", Init::Value(json!("Earth")))])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Schema(SchemaError::UnknownField { .. })
        ));
    }

    #[test]
    fn create_invokes_producers() {
        let address = Instance::create(
            &ADDRESS,
            vec![("country", Init::Producer(|| json!("Australia")))],
        )
        .unwrap();
        assert_eq!(address.scalar("country").unwrap(), &json!("Australia"));
    }

    #[test]
    fn fragment_arrays_default_to_empty() {
        let customer = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        assert!(customer.fragments("otherAddresses").unwrap().is_empty());
        assert!(customer.fragment("address").is_none());
    }

    #[test]
    fn set_checks_kind_and_shape() {
        let mut customer = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        let home = Arc::new(address("Australia"));
        customer
            .set("address", FieldValue::Fragment(Some(home.clone())))
            .unwrap();
        assert!(Arc::ptr_eq(customer.fragment("address").unwrap(), &home));

        // A fragment shape cannot land in a scalar field.
        let err = customer
            .set("name", FieldValue::Fragment(Some(home)))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Coerce(CoerceError::KindMismatch { .. })
        ));

        // An instance of the wrong record type cannot land in a fragment field.
        let stray = Arc::new(Instance::create(&CUSTOMER, Vec::new()).unwrap());
        assert!(
            customer
                .set("address", FieldValue::Fragment(Some(stray)))
                .is_err()
        );
    }

    #[test]
    fn clone_is_deep_and_independent() {
        let mut customer = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        customer
            .set(
                "address",
                FieldValue::Fragment(Some(Arc::new(address("Australia")))),
            )
            .unwrap();

        let cloned = customer.clone();
        let original_fragment = customer.fragment("address").unwrap();
        let cloned_fragment = cloned.fragment("address").unwrap();

        assert!(!Arc::ptr_eq(original_fragment, cloned_fragment));
        assert!(original_fragment.is_equal(cloned_fragment));
    }

    #[test]
    fn equality_is_shallow_for_fragments() {
        let shared = Arc::new(address("Australia"));

        let mut left = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        let mut right = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        left.set("address", FieldValue::Fragment(Some(shared.clone())))
            .unwrap();
        right
            .set("address", FieldValue::Fragment(Some(shared)))
            .unwrap();
        assert!(left.is_equal(&right));

        // Same structure, distinct nested objects: not equal.
        let mut distinct = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        distinct
            .set(
                "address",
                FieldValue::Fragment(Some(Arc::new(address("Australia")))),
            )
            .unwrap();
        assert!(!left.is_equal(&distinct));
    }

    #[test]
    fn equality_requires_same_record_type() {
        let address = Instance::create(&ADDRESS, Vec::new()).unwrap();
        let customer = Instance::create(&CUSTOMER, Vec::new()).unwrap();
        assert!(!address.is_equal(&customer));
    }
}
