use crate::model::field::{FieldDecl, FieldDescriptor};
use serde::Serialize;
use serde_json::Value;

/// Ordered field table for one record type: internal key paired with its
/// declaration. Produced lazily, once, at schema derivation.
pub type FieldTable = Vec<(&'static str, FieldDecl)>;

/// Type-level serialization hook for nested types that cannot serialize an
/// instance themselves. Receives the raw field value and its descriptor.
pub type LegacySerializeFn = fn(&Value, &FieldDescriptor) -> Value;

///
/// RecordType
///
/// Static descriptor for one record type: a stable name, the field-table
/// producer, and an optional legacy serialization hook. Type identity is the
/// `'static` reference itself; the registry caches schemas by its address,
/// so two types with identical field tables still derive independently.
///

#[derive(Debug)]
pub struct RecordType {
    pub name: &'static str,
    pub fields: fn() -> FieldTable,
    pub legacy_serialize: Option<LegacySerializeFn>,
}

impl RecordType {
    #[must_use]
    pub const fn new(name: &'static str, fields: fn() -> FieldTable) -> Self {
        Self {
            name,
            fields,
            legacy_serialize: None,
        }
    }

    /// Attach a type-level fallback used when a fragment slot holds a raw
    /// value instead of an instance. Resolved here, at definition time, so
    /// the serializer has exactly one fallback path.
    #[must_use]
    pub const fn with_legacy_serialize(mut self, hook: LegacySerializeFn) -> Self {
        self.legacy_serialize = Some(hook);
        self
    }

    /// Identity comparison; record types are compared by address, never by
    /// name or structure.
    #[must_use]
    pub fn is(&'static self, other: &'static Self) -> bool {
        std::ptr::eq(self, other)
    }
}

///
/// EnumType
///
/// Closed set of named values with a membership test. Only string members
/// exist on the wire; anything else is a non-member by definition.
///

#[derive(Debug, Serialize)]
pub struct EnumType {
    pub name: &'static str,
    pub members: &'static [&'static str],
}

impl EnumType {
    #[must_use]
    pub const fn new(name: &'static str, members: &'static [&'static str]) -> Self {
        Self { name, members }
    }

    #[must_use]
    pub fn is_member(&self, value: &Value) -> bool {
        value
            .as_str()
            .is_some_and(|s| self.members.contains(&s))
    }
}
