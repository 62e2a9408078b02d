//! Recursive marshaling between wire JSON trees and record instances.

pub mod deserialize;
pub mod serialize;


pub use deserialize::{from_str, from_value};

///
/// Strictness
///
/// How enum membership failures are treated during deserialization. Strict
/// propagates the validation error; lenient reports a diagnostic and nulls
/// the field. Explicitly caller-controlled, never inferred from build mode.
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Strictness {
    #[default]
    Strict,
    Lenient,
}

///
/// DeserializeOptions
///

#[derive(Clone, Copy, Debug, Default)]
pub struct DeserializeOptions {
    pub strictness: Strictness,
}

impl DeserializeOptions {
    #[must_use]
    pub const fn lenient() -> Self {
        Self {
            strictness: Strictness::Lenient,
        }
    }
}
