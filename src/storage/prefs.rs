use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Errors from preference storage writes.
///
/// Reads never error: a missing or malformed record reads as `None` and the
/// caller falls back to its default value.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// A directory of named JSON records.
///
/// Not safe for concurrent writers: two simultaneous `put` calls on the same
/// key can silently drop one update. Intended usage is one writer at a time
/// on a background context.
#[derive(Debug, Clone)]
pub struct PrefStore {
    dir: PathBuf,
}

impl PrefStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// The directory this store reads and writes.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Read a named record. Missing or malformed data yields `None`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.record_path(key);
        let raw = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key, error = %e, "Discarding malformed preference record");
                None
            }
        }
    }

    /// Write a named record, replacing any previous content.
    ///
    /// Writes to a sibling temp file first and renames it over the record,
    /// so a crash mid-write leaves the old record intact.
    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let path = self.record_path(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Delete a named record. Deleting a missing record is not an error.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn open_store() -> (tempfile::TempDir, PrefStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = PrefStore::open(dir.path().join("prefs")).unwrap();
        (dir, store)
    }

    #[test]
    fn open_creates_directory() {
        let (_dir, store) = open_store();
        assert!(store.dir().is_dir());
    }

    #[test]
    fn put_then_get_roundtrips() {
        let (_dir, store) = open_store();
        let sample = Sample {
            name: "milk".into(),
            count: 3,
        };

        store.put("sample", &sample).unwrap();
        let read: Sample = store.get("sample").unwrap();
        assert_eq!(read, sample);
    }

    #[test]
    fn get_missing_record_is_none() {
        let (_dir, store) = open_store();
        let read: Option<Sample> = store.get("nothing_here");
        assert!(read.is_none());
    }

    #[test]
    fn get_malformed_record_is_none() {
        let (_dir, store) = open_store();
        fs::write(store.dir().join("broken.json"), "{not json").unwrap();

        let read: Option<Sample> = store.get("broken");
        assert!(read.is_none());
    }

    #[test]
    fn put_repairs_malformed_record() {
        let (_dir, store) = open_store();
        fs::write(store.dir().join("sample.json"), "]][[").unwrap();

        let sample = Sample {
            name: "peanut".into(),
            count: 1,
        };
        store.put("sample", &sample).unwrap();

        let read: Sample = store.get("sample").unwrap();
        assert_eq!(read, sample);
    }

    #[test]
    fn put_replaces_previous_content() {
        let (_dir, store) = open_store();
        store.put("k", &vec!["a", "b"]).unwrap();
        store.put("k", &vec!["c"]).unwrap();

        let read: Vec<String> = store.get("k").unwrap();
        assert_eq!(read, vec!["c".to_string()]);
    }

    #[test]
    fn remove_deletes_record() {
        let (_dir, store) = open_store();
        store.put("gone", &1u32).unwrap();
        store.remove("gone").unwrap();
        assert!(store.get::<u32>("gone").is_none());
    }

    #[test]
    fn remove_missing_record_is_ok() {
        let (_dir, store) = open_store();
        assert!(store.remove("never_existed").is_ok());
    }

    #[test]
    fn no_temp_file_left_after_put() {
        let (_dir, store) = open_store();
        store.put("clean", &42u32).unwrap();
        assert!(!store.dir().join("clean.json.tmp").exists());
    }
}
