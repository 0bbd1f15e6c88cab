use std::fs::{self, File};
use std::io::{self, Write};
use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;

use crate::error::Error;
use crate::model::Record;

/// The persisted collections, one JSON array file each.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Hotels,
    Customers,
    Reservations,
}

impl Kind {
    pub fn file_name(self) -> &'static str {
        match self {
            Kind::Hotels => "hotels.json",
            Kind::Customers => "customers.json",
            Kind::Reservations => "reservations.json",
        }
    }
}

/// Flat-file record store. Each collection is replaced wholesale on save;
/// loads tolerate malformed content (missing file, bad JSON, wrong shape)
/// by degrading to an empty collection with a logged warning. Only OS-level
/// I/O failures surface as errors.
pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, kind: Kind) -> PathBuf {
        self.dir.join(kind.file_name())
    }

    pub fn load(&self, kind: Kind) -> Result<Vec<Record>, Error> {
        let path = self.path(kind);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::Storage { path, source: e }),
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let parsed: Value = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "invalid JSON, treating collection as empty");
                return Ok(Vec::new());
            }
        };
        let items = match parsed {
            Value::Array(items) => items,
            other => {
                warn!(
                    path = %path.display(),
                    got = json_type_name(&other),
                    "collection file must be a JSON array, treating as empty"
                );
                return Ok(Vec::new());
            }
        };

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            match item {
                Value::Object(map) => records.push(map),
                other => {
                    warn!(
                        path = %path.display(),
                        got = json_type_name(&other),
                        "skipping non-object record"
                    );
                }
            }
        }
        Ok(records)
    }

    /// Full overwrite via temp file + rename, so a crash mid-write never
    /// leaves a half-written collection behind.
    pub fn save(&self, kind: Kind, records: &[Record]) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).map_err(|e| Error::Storage {
            path: self.dir.clone(),
            source: e,
        })?;
        let path = self.path(kind);
        let body = serde_json::to_vec_pretty(records).map_err(|e| Error::Storage {
            path: path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, e),
        })?;

        let tmp = path.with_extension("json.tmp");
        let write = (|| -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(&body)?;
            file.sync_all()?;
            fs::rename(&tmp, &path)
        })();
        write.map_err(|e| Error::Storage { path, source: e })
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> (tempfile::TempDir, JsonStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonStore::new(dir.path());
        (dir, store)
    }

    fn record(key: &str, id: &str) -> Record {
        let mut map = Record::new();
        map.insert(key.into(), Value::from(id));
        map
    }

    #[test]
    fn missing_file_loads_empty() {
        let (_dir, store) = store();
        assert!(store.load(Kind::Hotels).unwrap().is_empty());
    }

    #[test]
    fn empty_file_loads_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join("hotels.json"), "  \n").unwrap();
        assert!(store.load(Kind::Hotels).unwrap().is_empty());
    }

    #[test]
    fn invalid_json_loads_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join("hotels.json"), "{ not valid json }").unwrap();
        assert!(store.load(Kind::Hotels).unwrap().is_empty());
    }

    #[test]
    fn non_array_root_loads_empty() {
        let (dir, store) = store();
        fs::write(dir.path().join("customers.json"), r#"{"oops": true}"#).unwrap();
        assert!(store.load(Kind::Customers).unwrap().is_empty());
    }

    #[test]
    fn non_object_elements_are_skipped() {
        let (dir, store) = store();
        fs::write(
            dir.path().join("reservations.json"),
            r#"[{"resv_id": "R1"}, 42, "junk", {"resv_id": "R2"}]"#,
        )
        .unwrap();
        let records = store.load(Kind::Reservations).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("resv_id"), Some(&Value::from("R1")));
        assert_eq!(records[1].get("resv_id"), Some(&Value::from("R2")));
    }

    #[test]
    fn save_then_load_roundtrip() {
        let (_dir, store) = store();
        let records = vec![record("hotel_id", "H1"), record("hotel_id", "H2")];
        store.save(Kind::Hotels, &records).unwrap();
        assert_eq!(store.load(Kind::Hotels).unwrap(), records);
    }

    #[test]
    fn save_is_a_full_overwrite() {
        let (_dir, store) = store();
        store.save(Kind::Hotels, &[record("hotel_id", "H1")]).unwrap();
        store.save(Kind::Hotels, &[record("hotel_id", "H2")]).unwrap();
        let records = store.load(Kind::Hotels).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get("hotel_id"), Some(&Value::from("H2")));
    }

    #[test]
    fn save_creates_data_dir_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");
        let store = JsonStore::new(&nested);
        store.save(Kind::Hotels, &[record("hotel_id", "H1")]).unwrap();
        assert!(nested.join("hotels.json").exists());
        assert!(!nested.join("hotels.json.tmp").exists());
    }

    #[test]
    fn collections_are_independent() {
        let (_dir, store) = store();
        store.save(Kind::Hotels, &[record("hotel_id", "H1")]).unwrap();
        assert!(store.load(Kind::Customers).unwrap().is_empty());
        assert!(store.load(Kind::Reservations).unwrap().is_empty());
    }
}
