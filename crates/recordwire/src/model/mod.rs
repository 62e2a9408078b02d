//! Declarative model definitions.
//!
//! Types in `model` are what a record author writes down: the per-type field
//! table, the closed enumerations fields may reference, and the descriptor
//! shapes the registry derives from them. Nothing here holds instance data;
//! the runtime side lives in `instance` and `value`.

pub mod field;
pub mod record;

pub use field::{FieldDecl, FieldDescriptor, FieldDefault, FieldKind, ScalarKind};
pub use record::{EnumType, FieldTable, RecordType};
