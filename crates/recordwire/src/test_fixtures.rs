//! Shared record fixtures for unit tests.

use crate::model::{
    field::FieldDecl,
    record::{EnumType, FieldTable, RecordType},
};
use serde_json::{Value, json};

pub(crate) static COUNTRY: EnumType =
    EnumType::new("Country", &["Australia", "UnitedKingdom"]);

pub(crate) static ADDRESS: RecordType = RecordType::new("Address", address_fields);

fn address_fields() -> FieldTable {
    vec![
        ("country", FieldDecl::text()),
        ("postcode", FieldDecl::text()),
        ("state", FieldDecl::text()),
        ("streetAddress", FieldDecl::text()),
        ("suburb", FieldDecl::text()),
    ]
}

pub(crate) static CUSTOMER: RecordType = RecordType::new("Customer", customer_fields);

fn customer_fields() -> FieldTable {
    vec![
        ("name", FieldDecl::text()),
        ("address", FieldDecl::fragment(&ADDRESS)),
        (
            "otherAddresses",
            FieldDecl::fragment_array(&ADDRESS).wire_key("other_addresses"),
        ),
    ]
}

/// Scalar-only record exercising every supported scalar kind plus an
/// exclude-on-write field.
pub(crate) static SHIPMENT: RecordType = RecordType::new("Shipment", shipment_fields);

fn shipment_fields() -> FieldTable {
    vec![
        ("reference", FieldDecl::text()),
        ("weight", FieldDecl::number()),
        ("fragile", FieldDecl::boolean()),
        ("tags", FieldDecl::list()),
        ("destination", FieldDecl::enumeration(&COUNTRY)),
        ("internalNote", FieldDecl::text().exclude_on_write()),
    ]
}

/// Nested type with a type-level legacy serialization hook: raw values in
/// its fragment slots serialize as `{"raw": <value>}`.
pub(crate) static LEGACY_NOTE: RecordType =
    RecordType::new("LegacyNote", legacy_note_fields).with_legacy_serialize(legacy_note_hook);

fn legacy_note_fields() -> FieldTable {
    vec![("body", FieldDecl::text())]
}

fn legacy_note_hook(raw: &Value, _descriptor: &crate::model::field::FieldDescriptor) -> Value {
    json!({ "raw": raw })
}

/// Parent carrying one legacy-hooked fragment and one plain fragment.
pub(crate) static TICKET: RecordType = RecordType::new("Ticket", ticket_fields);

fn ticket_fields() -> FieldTable {
    vec![
        ("note", FieldDecl::fragment(&LEGACY_NOTE)),
        ("address", FieldDecl::fragment(&ADDRESS)),
    ]
}
