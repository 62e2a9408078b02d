//! Process-wide schema cache.
//!
//! Schemas are derived lazily on first use of a record type and cached for
//! the process lifetime. The derive-and-insert sequence runs under the write
//! lock with a re-check, so derivation executes at most once per type and
//! readers only ever observe a fully-formed schema. Failed derivations are
//! not cached; they fail identically on every call.

use crate::{
    model::record::RecordType,
    schema::{Schema, SchemaError},
};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, RwLock},
};

static SCHEMAS: LazyLock<RwLock<HashMap<usize, Arc<Schema>>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

fn cache_key(record: &'static RecordType) -> usize {
    std::ptr::from_ref(record) as usize
}

/// Fetch the schema for a record type, deriving it on first use.
///
/// Repeated calls for the same type return the identical `Arc`; distinct
/// types never share a schema, even with identical field tables.
pub fn get_schema(record: &'static RecordType) -> Result<Arc<Schema>, SchemaError> {
    let key = cache_key(record);

    {
        let cache = SCHEMAS
            .read()
            .expect("schema RwLock poisoned while acquiring read lock");
        if let Some(schema) = cache.get(&key) {
            return Ok(schema.clone());
        }
    }

    let mut cache = SCHEMAS
        .write()
        .expect("schema RwLock poisoned while acquiring write lock");

    // Another thread may have derived it between the two locks.
    if let Some(schema) = cache.get(&key) {
        return Ok(schema.clone());
    }

    let schema = Arc::new(Schema::derive(record)?);
    cache.insert(key, schema.clone());

    Ok(schema)
}
