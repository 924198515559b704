//! Flat-file JSON persistence for the patient collection.
//!
//! The whole collection lives in a single JSON document mapping patient id
//! to attributes. [`FileStore::load`] reads and parses the full document;
//! [`FileStore::save`] serializes the full collection and atomically
//! replaces the file (write to a sibling temp file, then rename), so an
//! interrupted write never leaves a truncated document behind.
//!
//! The store itself does no locking; the server guards the
//! load-mutate-save sequence with a process-wide lock.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use patients_core::Patient;

/// The full set of patient records, keyed by identifier.
pub type Collection = BTreeMap<String, Patient>;

/// Errors that can occur when loading or saving the backing file.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    /// The backing file is missing or unreadable.
    #[error("Failed to read patient file '{path}': {source}")]
    Unavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The backing file content is not a valid patient collection.
    #[error("Failed to parse patient file '{path}': {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Writing the replacement document failed.
    #[error("Failed to write patient file '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// File-backed store for the patient [`Collection`].
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store backed by the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the entire backing document.
    pub fn load(&self) -> Result<Collection, StoreError> {
        let content = fs::read_to_string(&self.path).map_err(|e| StoreError::Unavailable {
            path: self.path.display().to_string(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Serializes the full collection and atomically replaces the file.
    pub fn save(&self, collection: &Collection) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(collection).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;

        let write_err = |source| StoreError::Write {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use patients_core::{Gender, PatientInput};

    fn sample_collection() -> Collection {
        let mut data = Collection::new();
        data.insert(
            "P001".to_string(),
            Patient::new(PatientInput {
                name: "Ananya".to_string(),
                city: "Pune".to_string(),
                age: 30,
                gender: Gender::Female,
                height: 1.7,
                weight: 70.0,
            })
            .unwrap(),
        );
        data.insert(
            "P002".to_string(),
            Patient::new(PatientInput {
                name: "Ravi".to_string(),
                city: "Delhi".to_string(),
                age: 45,
                gender: Gender::Male,
                height: 1.6,
                weight: 90.0,
            })
            .unwrap(),
        );
        data
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("patients.json"));

        let data = sample_collection();
        store.save(&data).unwrap();
        let loaded = store.load().unwrap();

        assert_eq!(loaded.len(), 2);
        let p1 = &loaded["P001"];
        assert_eq!(p1.name, "Ananya");
        assert_eq!(p1.bmi, 24.22);
        let p2 = &loaded["P002"];
        assert_eq!(p2.weight, 90.0);
        assert_eq!(p2.bmi, 35.16);
    }

    #[test]
    fn load_missing_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nope.json"));
        assert!(matches!(
            store.load(),
            Err(StoreError::Unavailable { .. })
        ));
    }

    #[test]
    fn load_garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("patients.json");
        fs::write(&path, "not json at all").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn save_replaces_the_whole_document() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("patients.json"));

        store.save(&sample_collection()).unwrap();

        let mut smaller = sample_collection();
        smaller.remove("P002");
        store.save(&smaller).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert!(loaded.contains_key("P001"));
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("patients.json"));
        store.save(&Collection::new()).unwrap();
        assert!(!dir.path().join("patients.tmp").exists());
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("data").join("patients.json"));
        store.save(&Collection::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }
}
