use crate::model::record::{EnumType, RecordType};
use derive_more::{Display, FromStr};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;

///
/// ScalarKind
///
/// Closed set of scalar field kinds. `List` is a pass-through untyped JSON
/// sequence, not a nested record. `Date` is declared for wire compatibility
/// but carries no coercion rule; schema derivation rejects it.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, PartialEq)]
pub enum ScalarKind {
    #[display("number")]
    Number,
    #[display("boolean")]
    Boolean,
    #[display("text")]
    Text,
    #[display("list")]
    List,
    #[display("date")]
    Date,
}

///
/// FieldKind
///
/// Tagged variant for everything a field can hold. Enum fields carry their
/// value set; fragment kinds carry the nested record type, so kind dispatch
/// is a single match with no type sniffing.
///

#[derive(Clone, Copy, Debug)]
pub enum FieldKind {
    Scalar(ScalarKind),
    Enum(&'static EnumType),
    Fragment(&'static RecordType),
    FragmentArray(&'static RecordType),
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => write!(f, "{kind}"),
            Self::Enum(ty) => write!(f, "enum {}", ty.name),
            Self::Fragment(ty) => write!(f, "fragment {}", ty.name),
            Self::FragmentArray(ty) => write!(f, "fragment array {}", ty.name),
        }
    }
}

impl Serialize for FieldKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // Enum kinds export their full value set so a schema dump is
            // self-describing; every other kind is its display name.
            Self::Enum(ty) => ty.serialize(serializer),
            _ => serializer.collect_str(self),
        }
    }
}

///
/// FieldDefault
///
/// Default supplied at declaration time: a literal JSON value used as-is, or
/// a zero-argument producer invoked whenever the default is resolved.
///

#[derive(Clone, Debug)]
pub enum FieldDefault {
    Literal(Value),
    Producer(fn() -> Value),
}

impl FieldDefault {
    /// Resolve the default to a concrete JSON value.
    #[must_use]
    pub fn resolve(&self) -> Value {
        match self {
            Self::Literal(value) => value.clone(),
            Self::Producer(producer) => producer(),
        }
    }
}

///
/// FieldDecl
///
/// What a record author writes in the field table. The field name is not
/// part of the declaration; the table pairs names with declarations and the
/// registry assigns each descriptor's `key` during derivation.
///

#[derive(Clone, Debug)]
pub struct FieldDecl {
    pub kind: FieldKind,
    pub wire_override: Option<&'static str>,
    pub include_on_write: bool,
    pub default: Option<FieldDefault>,
}

impl FieldDecl {
    #[must_use]
    pub const fn new(kind: FieldKind) -> Self {
        Self {
            kind,
            wire_override: None,
            include_on_write: true,
            default: None,
        }
    }

    #[must_use]
    pub const fn number() -> Self {
        Self::new(FieldKind::Scalar(ScalarKind::Number))
    }

    #[must_use]
    pub const fn boolean() -> Self {
        Self::new(FieldKind::Scalar(ScalarKind::Boolean))
    }

    #[must_use]
    pub const fn text() -> Self {
        Self::new(FieldKind::Scalar(ScalarKind::Text))
    }

    #[must_use]
    pub const fn list() -> Self {
        Self::new(FieldKind::Scalar(ScalarKind::List))
    }

    #[must_use]
    pub const fn date() -> Self {
        Self::new(FieldKind::Scalar(ScalarKind::Date))
    }

    #[must_use]
    pub const fn enumeration(ty: &'static EnumType) -> Self {
        Self::new(FieldKind::Enum(ty))
    }

    #[must_use]
    pub const fn fragment(ty: &'static RecordType) -> Self {
        Self::new(FieldKind::Fragment(ty))
    }

    #[must_use]
    pub const fn fragment_array(ty: &'static RecordType) -> Self {
        Self::new(FieldKind::FragmentArray(ty))
    }

    /// Override the key used in the wire representation.
    #[must_use]
    pub const fn wire_key(mut self, key: &'static str) -> Self {
        self.wire_override = Some(key);
        self
    }

    /// Omit this field from serialized output.
    #[must_use]
    pub const fn exclude_on_write(mut self) -> Self {
        self.include_on_write = false;
        self
    }

    /// Declare a literal default value.
    #[must_use]
    pub fn default_value(mut self, value: Value) -> Self {
        self.default = Some(FieldDefault::Literal(value));
        self
    }

    /// Declare a deferred default, invoked whenever the default is resolved.
    #[must_use]
    pub fn default_with(mut self, producer: fn() -> Value) -> Self {
        self.default = Some(FieldDefault::Producer(producer));
        self
    }
}

///
/// FieldDescriptor
///
/// Registry output: one declaration with its `key` assigned from the field
/// table. Immutable after derivation; callers treat descriptors as read-only.
///

#[derive(Clone, Debug, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire_override: Option<&'static str>,
    pub include_on_write: bool,
    #[serde(skip)]
    pub default: Option<FieldDefault>,
}

impl FieldDescriptor {
    pub(crate) fn from_decl(key: &'static str, decl: FieldDecl) -> Self {
        Self {
            key,
            kind: decl.kind,
            wire_override: decl.wire_override,
            include_on_write: decl.include_on_write,
            default: decl.default,
        }
    }

    /// The key used in the wire representation: the override if declared,
    /// else the internal key.
    #[must_use]
    pub const fn wire_key(&self) -> &'static str {
        match self.wire_override {
            Some(key) => key,
            None => self.key,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decl_defaults_are_inclusive() {
        let decl = FieldDecl::text();
        assert!(decl.include_on_write);
        assert!(decl.wire_override.is_none());
        assert!(decl.default.is_none());
    }

    #[test]
    fn wire_key_falls_back_to_key() {
        let plain = FieldDescriptor::from_decl("suburb", FieldDecl::text());
        assert_eq!(plain.wire_key(), "suburb");

        let overridden =
            FieldDescriptor::from_decl("otherAddresses", FieldDecl::text().wire_key("other_addresses"));
        assert_eq!(overridden.wire_key(), "other_addresses");
    }

    #[test]
    fn kind_display_names() {
        assert_eq!(FieldKind::Scalar(ScalarKind::Number).to_string(), "number");
        assert_eq!(FieldKind::Scalar(ScalarKind::Date).to_string(), "date");
    }
}
