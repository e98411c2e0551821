// SPDX-License-Identifier: MPL-2.0
//! Key/value store persisted as a CBOR map.
//!
//! Every mutation rewrites the whole map to disk.
//!
//! # Path Resolution
//!
//! 1. `base_dir` passed to [`FileStore::open_in`]
//! 2. `--data-dir` / `SHOWCASE_DATA_DIR`
//! 3. Platform-specific data directory

use super::KeyValueStore;
use crate::app::paths;
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

/// Storage file name within the app data directory.
const STORAGE_FILE: &str = "storage.cbor";

#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Opens the store in `base_dir`, falling back to the default resolution.
    ///
    /// Returns the store plus an optional i18n warning key describing why the
    /// previous contents could not be read.
    pub fn open_in(base_dir: Option<PathBuf>) -> Result<(Self, Option<String>)> {
        let Some(mut path) = paths::get_app_data_dir_with_override(base_dir) else {
            return Err(Error::State("no data directory available".to_string()));
        };
        path.push(STORAGE_FILE);
        Ok(Self::open_at(path))
    }

    /// Opens the store backed by the exact file `path`.
    ///
    /// A missing file yields an empty store; an unreadable or corrupted file
    /// yields an empty store with a warning key.
    pub fn open_at(path: PathBuf) -> (Self, Option<String>) {
        let (entries, warning) = match read_entries(&path) {
            Ok(entries) => (entries, None),
            Err(Error::Io(message)) => {
                tracing::warn!(path = %path.display(), %message, "cannot read storage file");
                (
                    BTreeMap::new(),
                    Some("notification-storage-read-error".to_string()),
                )
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "corrupted storage file");
                (
                    BTreeMap::new(),
                    Some("notification-storage-parse-error".to_string()),
                )
            }
        };
        (Self { path, entries }, warning)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        if let Err(err) = write_entries(&self.path, &self.entries) {
            tracing::warn!(path = %self.path.display(), error = %err, "failed to persist storage");
        }
    }
}

fn read_entries(path: &Path) -> Result<BTreeMap<String, String>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let reader = BufReader::new(fs::File::open(path)?);
    Ok(ciborium::from_reader(reader)?)
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(fs::File::create(path)?);
    ciborium::into_writer(entries, writer)?;
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn open_in_empty_directory_returns_empty_store() {
        let temp_dir = tempdir().expect("create temp dir");
        let (store, warning) =
            FileStore::open_in(Some(temp_dir.path().to_path_buf())).expect("open store");
        assert!(warning.is_none(), "should not warn for missing file");
        assert!(store.get("anything").is_none());
    }

    #[test]
    fn values_survive_reopen() {
        let temp_dir = tempdir().expect("create temp dir");
        let base_dir = temp_dir.path().to_path_buf();

        {
            let (mut store, _) = FileStore::open_in(Some(base_dir.clone())).expect("open store");
            store.set("user", "admin");
            store.set("token", "tok-123");
        }

        let (store, warning) = FileStore::open_in(Some(base_dir)).expect("reopen store");
        assert!(warning.is_none());
        assert_eq!(store.get("user").as_deref(), Some("admin"));
        assert_eq!(store.get("token").as_deref(), Some("tok-123"));
    }

    #[test]
    fn removal_is_persisted() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join(STORAGE_FILE);

        let (mut store, _) = FileStore::open_at(path.clone());
        store.set("user", "admin");
        store.remove("user");

        let (reopened, _) = FileStore::open_at(path);
        assert!(reopened.get("user").is_none());
    }

    #[test]
    fn corrupted_file_returns_empty_store_with_warning() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join(STORAGE_FILE);
        fs::write(&path, "not valid cbor data").expect("write file");

        let (store, warning) = FileStore::open_at(path);
        assert_eq!(warning.as_deref(), Some("notification-storage-parse-error"));
        assert!(store.get("user").is_none());
    }

    #[test]
    fn set_creates_parent_directories() {
        let temp_dir = tempdir().expect("create temp dir");
        let path = temp_dir.path().join("nested").join("deeply").join(STORAGE_FILE);

        let (mut store, _) = FileStore::open_at(path.clone());
        store.set("user", "admin");
        assert!(path.exists());
    }
}
