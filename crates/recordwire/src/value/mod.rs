//! Runtime field payloads.

pub mod coerce;

use crate::{
    instance::Instance,
    model::field::{FieldKind, ScalarKind},
};
use serde_json::Value;
use std::sync::Arc;

///
/// FieldValue
///
/// The value one field holds at runtime. `Scalar` carries plain JSON and
/// doubles as the untyped escape hatch: a raw value supplied for a
/// fragment-kind field passes through coercion unchanged and lands here,
/// where the serializer later resolves it via the legacy hook or the
/// anomaly path. Fragments are `Arc`-shared so identity comparison and
/// clone independence are observable.
///

#[derive(Clone, Debug)]
pub enum FieldValue {
    Scalar(Value),
    Fragment(Option<Arc<Instance>>),
    Fragments(Vec<Arc<Instance>>),
}

impl FieldValue {
    pub const NULL: Self = Self::Scalar(Value::Null);

    /// The kind-specific zero used when a field has no value and no default.
    #[must_use]
    pub fn zero_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Scalar(ScalarKind::Boolean) => Self::Scalar(Value::Bool(false)),
            FieldKind::Scalar(ScalarKind::Text) => Self::Scalar(Value::String(String::new())),
            FieldKind::Scalar(ScalarKind::List) => Self::Scalar(Value::Array(Vec::new())),
            FieldKind::Scalar(ScalarKind::Number | ScalarKind::Date) | FieldKind::Enum(_) => {
                Self::NULL
            }
            FieldKind::Fragment(_) => Self::Fragment(None),
            FieldKind::FragmentArray(_) => Self::Fragments(Vec::new()),
        }
    }

    /// Shape label for diagnostics.
    #[must_use]
    pub const fn shape_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Fragment(_) => "fragment",
            Self::Fragments(_) => "fragment array",
        }
    }

    #[must_use]
    pub const fn as_scalar(&self) -> Option<&Value> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_fragment(&self) -> Option<&Arc<Instance>> {
        match self {
            Self::Fragment(Some(instance)) => Some(instance),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_fragments(&self) -> Option<&[Arc<Instance>]> {
        match self {
            Self::Fragments(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this value shape is storable under the given kind.
    ///
    /// `Scalar` is storable anywhere (the documented pass-through for raw
    /// fragment values); typed fragment shapes must match their kind and
    /// their instances must belong to the declared nested type.
    #[must_use]
    pub(crate) fn fits_kind(&self, kind: &FieldKind) -> bool {
        match self {
            Self::Scalar(_) => true,
            Self::Fragment(instance) => match *kind {
                FieldKind::Fragment(nested) => {
                    instance.as_ref().is_none_or(|i| i.record().is(nested))
                }
                _ => false,
            },
            Self::Fragments(items) => match *kind {
                FieldKind::FragmentArray(nested) => {
                    items.iter().all(|i| i.record().is(nested))
                }
                _ => false,
            },
        }
    }
}
