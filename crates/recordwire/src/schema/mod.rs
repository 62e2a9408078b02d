//! Derived schemas and the process-wide schema registry.

pub mod registry;

use crate::model::{
    field::{FieldDescriptor, FieldKind, ScalarKind},
    record::RecordType,
};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::HashMap;
use thiserror::Error as ThisError;

///
/// SchemaError
///
/// Derivation and field-addressing failures. Derivation errors are fatal for
/// the type and surface on its first use, not at process start.
///

#[derive(Debug, ThisError)]
pub enum SchemaError {
    #[error("record {record} declares field {field} more than once")]
    DuplicateField {
        record: &'static str,
        field: &'static str,
    },

    #[error("record {record} field {field} has kind {kind}, which is not marshalable")]
    UnsupportedKind {
        record: &'static str,
        field: &'static str,
        kind: FieldKind,
    },

    #[error("record {record} has no field named {field}")]
    UnknownField { record: &'static str, field: String },
}

///
/// Schema
///
/// The complete, ordered descriptor list for one record type, plus a
/// key-to-position lookup. Derived once per type and shared read-only behind
/// an `Arc`; never inspects instance data.
///

#[derive(Debug)]
pub struct Schema {
    record: &'static RecordType,
    fields: Vec<FieldDescriptor>,
    index: HashMap<&'static str, usize>,
}

impl Schema {
    pub(crate) fn derive(record: &'static RecordType) -> Result<Self, SchemaError> {
        let table = (record.fields)();

        let mut fields = Vec::with_capacity(table.len());
        let mut index = HashMap::with_capacity(table.len());

        for (key, decl) in table {
            if matches!(decl.kind, FieldKind::Scalar(ScalarKind::Date)) {
                return Err(SchemaError::UnsupportedKind {
                    record: record.name,
                    field: key,
                    kind: decl.kind,
                });
            }
            if index.insert(key, fields.len()).is_some() {
                return Err(SchemaError::DuplicateField {
                    record: record.name,
                    field: key,
                });
            }
            fields.push(FieldDescriptor::from_decl(key, decl));
        }

        Ok(Self {
            record,
            fields,
            index,
        })
    }

    #[must_use]
    pub const fn record(&self) -> &'static RecordType {
        self.record
    }

    /// Descriptors in declaration order.
    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor> {
        self.index_of(key).map(|i| &self.fields[i])
    }

    #[must_use]
    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.index.get(key).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Schema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Schema", 2)?;
        s.serialize_field("record", self.record.name)?;
        s.serialize_field("fields", &self.fields)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{field::FieldDecl, record::FieldTable};

    static DUPLICATE: RecordType = RecordType::new("Duplicate", || {
        vec![("name", FieldDecl::text()), ("name", FieldDecl::number())]
    });

    static DATED: RecordType = RecordType::new("Dated", || {
        vec![("created", FieldDecl::date())]
    });

    static PLAIN: RecordType = RecordType::new("Plain", plain_fields);

    fn plain_fields() -> FieldTable {
        vec![
            ("country", FieldDecl::text()),
            ("population", FieldDecl::number().wire_key("head_count")),
        ]
    }

    #[test]
    fn derivation_assigns_keys_in_order() {
        let schema = Schema::derive(&PLAIN).unwrap();
        let keys: Vec<_> = schema.fields().iter().map(|f| f.key).collect();
        assert_eq!(keys, ["country", "population"]);
        assert_eq!(schema.index_of("population"), Some(1));
        assert_eq!(schema.field("population").unwrap().wire_key(), "head_count");
    }

    #[test]
    fn duplicate_field_fails_derivation() {
        let err = Schema::derive(&DUPLICATE).unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateField { field: "name", .. }));
    }

    #[test]
    fn date_kind_fails_derivation() {
        let err = Schema::derive(&DATED).unwrap_err();
        assert!(matches!(err, SchemaError::UnsupportedKind { field: "created", .. }));
    }

    #[test]
    fn schema_serializes_for_tooling() {
        let schema = Schema::derive(&PLAIN).unwrap();
        let dump = serde_json::to_value(&schema).unwrap();
        assert_eq!(dump["record"], "Plain");
        assert_eq!(dump["fields"][0]["key"], "country");
        assert_eq!(dump["fields"][0]["kind"], "text");
    }

    #[test]
    fn enum_kinds_export_their_member_set() {
        use crate::model::record::EnumType;
        use serde_json::json;

        static SIZE: EnumType = EnumType::new("Size", &["Small", "Large"]);
        static SIZED: RecordType = RecordType::new("Sized", || {
            vec![("size", FieldDecl::enumeration(&SIZE))]
        });

        let schema = Schema::derive(&SIZED).unwrap();
        let dump = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            dump["fields"][0]["kind"],
            json!({ "name": "Size", "members": ["Small", "Large"] })
        );
    }
}
