mod conflict;
mod customers;
mod hotels;
mod reservations;

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::model::Record;
use crate::store::{JsonStore, Kind};

/// The reservation engine. Stateless between operations: every call loads a
/// fresh snapshot from the store, computes in memory, and writes the whole
/// collection back. Source of truth is the durable store, never a cache.
pub struct Service {
    pub(crate) store: JsonStore,
}

impl Service {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Index a snapshot and log what could not be keyed. Bad stored data
    /// degrades with a diagnostic; it never fails the operation.
    pub(crate) fn snapshot_index<'a>(
        &self,
        records: &'a [Record],
        key: &'static str,
        kind: Kind,
    ) -> Indexed<'a> {
        let indexed = index_by(records, key);
        for reason in &indexed.skipped {
            warn!(collection = kind.file_name(), %reason, "skipping unkeyed record");
        }
        indexed
    }
}

/// An id → record index over one loaded snapshot, carrying the skip
/// diagnostics instead of printing during the load.
pub(crate) struct Indexed<'a> {
    by_id: HashMap<&'a str, &'a Record>,
    pub skipped: Vec<String>,
}

impl<'a> Indexed<'a> {
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&'a Record> {
        self.by_id.get(id).copied()
    }
}

pub(crate) fn index_by<'a>(records: &'a [Record], key: &str) -> Indexed<'a> {
    let mut by_id = HashMap::with_capacity(records.len());
    let mut skipped = Vec::new();
    for record in records {
        match record.get(key).and_then(Value::as_str).map(str::trim) {
            Some(id) if !id.is_empty() => {
                by_id.insert(id, record);
            }
            _ => skipped.push(format!(
                "missing or blank {key} in {}",
                Value::Object(record.clone())
            )),
        }
    }
    Indexed { by_id, skipped }
}

pub(crate) fn require_id(id: &str, field: &'static str) -> Result<(), Error> {
    if id.trim().is_empty() {
        return Err(Error::Validation(format!("{field} must be a non-empty string")));
    }
    Ok(())
}

/// String value of a record field, for id comparisons during filtering.
pub(crate) fn field_str<'a>(record: &'a Record, key: &str) -> Option<&'a str> {
    record.get(key).and_then(Value::as_str)
}
