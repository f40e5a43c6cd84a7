//! Local key-value storage
//!
//! A single JSON object on disk, read and written whole. The app keeps
//! exactly one key in it: the last-listened pointer.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::models::LastListened;

pub const LAST_LISTENED_KEY: &str = "lastListened";

/// Storage error types
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not determine data directory")]
    NoDataDir,

    #[error("Storage I/O failed: {0}")]
    Io(#[from] io::Error),

    #[error("Storage file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON-file backed key-value store
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store backed by an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default location (~/.local/share/podtui/storage.json on Linux)
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("podtui").join("storage.json"))
    }

    pub fn open_default() -> Result<Self, StoreError> {
        Self::default_path().map(Self::at).ok_or(StoreError::NoDataDir)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        match fs::read_to_string(&self.path) {
            Ok(s) if s.trim().is_empty() => Ok(Map::new()),
            Ok(s) => Ok(serde_json::from_str(&s)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_all(&self, map: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_string_pretty(map)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    /// Read and decode one key. A missing file or key is `None`.
    pub fn get_item<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        let mut map = self.read_all()?;
        match map.remove(key) {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub fn set_item<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let mut map = self.read_all()?;
        map.insert(key.to_string(), serde_json::to_value(value)?);
        self.write_all(&map)?;
        debug!(key, path = %self.path.display(), "stored item");
        Ok(())
    }

    pub fn save_last_listened(&self, last: &LastListened) -> Result<(), StoreError> {
        self.set_item(LAST_LISTENED_KEY, last)
    }

    pub fn last_listened(&self) -> Result<Option<LastListened>, StoreError> {
        self.get_item(LAST_LISTENED_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::at(dir.path().join("nope.json"));
        assert_eq!(store.last_listened().unwrap(), None);
    }

    #[test]
    fn test_last_listened_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");
        let store = LocalStore::at(&path);

        store
            .save_last_listened(&LastListened::new("10716", 1, 4))
            .unwrap();

        let reopened = LocalStore::at(&path);
        let last = reopened.last_listened().unwrap().unwrap();
        assert_eq!(last.show_id, "10716");
        assert_eq!(last.episode_id, "1-4");

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"lastListened\""));
        assert!(raw.contains("\"showId\""));
    }

    #[test]
    fn test_other_keys_survive() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::at(dir.path().join("storage.json"));
        store.set_item("volume", &80).unwrap();
        store
            .save_last_listened(&LastListened::new("1", 2, 3))
            .unwrap();

        assert_eq!(store.get_item::<u32>("volume").unwrap(), Some(80));
        assert_eq!(store.last_listened().unwrap(), Some(LastListened::new("1", 2, 3)));
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "{not json").unwrap();
        let store = LocalStore::at(&path);
        assert!(matches!(store.last_listened(), Err(StoreError::Json(_))));
    }
}
