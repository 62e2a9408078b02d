//! recordwire — declarative schemas and marshaling between wire-format JSON
//! trees and typed record instances.
//!
//! A record type declares its fields once, in a static table; the registry
//! derives and caches a [`schema::Schema`] per type on first use. The
//! marshaling engine walks that schema to deserialize wire trees into
//! [`instance::Instance`]s (coercing scalars, recursing into fragments) and
//! to serialize instances back out. Clone and equality ride the same walk.

pub mod instance;
pub mod marshal;
pub mod model;
pub mod obs;
pub mod schema;
pub mod value;
pub mod wire;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

use crate::{schema::SchemaError, value::coerce::CoerceError};
use thiserror::Error as ThisError;

///
/// Prelude
///
/// Domain vocabulary only; errors and capability plumbing stay at their
/// module paths.
///

pub mod prelude {
    pub use crate::{
        instance::{Init, Instance},
        marshal::{DeserializeOptions, Strictness, from_str, from_value},
        model::{
            field::{FieldDecl, FieldDescriptor, FieldKind, ScalarKind},
            record::{EnumType, FieldTable, RecordType},
        },
        schema::{Schema, registry::get_schema},
        value::FieldValue,
    };
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    #[error(transparent)]
    Coerce(#[from] CoerceError),

    #[error("malformed JSON input: {0}")]
    Parse(#[from] serde_json::Error),
}
