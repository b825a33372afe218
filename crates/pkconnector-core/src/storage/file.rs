//! File-backed key-value store
//!
//! All keys live in a single JSON object. Every operation re-reads the file so
//! a login performed by one binary is visible to another without restarting.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::KeyValueStore;
use crate::error::Error;
use crate::Result;

/// File name of the store inside the data directory
pub const STORAGE_FILE_NAME: &str = "storage.json";

/// JSON object on disk, written atomically
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open a store at `path`. The file is created lazily on first write.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Open the store inside a data directory
    pub fn in_dir(data_dir: impl AsRef<Path>) -> Self {
        Self::open(data_dir.as_ref().join(STORAGE_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&self.path).map_err(|e| {
            Error::Storage(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        match serde_json::from_str(&contents) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Storage file is malformed, treating as empty");
                Ok(BTreeMap::new())
            }
        }
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Storage(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .map_err(|e| Error::Storage(format!("Failed to write {}: {}", tmp.display(), e)))?;
        fs::rename(&tmp, &self.path).map_err(|e| {
            Error::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        debug!(path = %self.path.display(), keys = entries.len(), "Storage persisted");
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::in_dir(dir.path());
        assert_eq!(store.get("currentUser").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_values_visible_to_second_instance() {
        let dir = TempDir::new().unwrap();
        let mut writer = FileStore::in_dir(dir.path());
        writer.set("isAuthenticated", "true").unwrap();

        let reader = FileStore::in_dir(dir.path());
        assert_eq!(reader.get("isAuthenticated").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn test_remove_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::in_dir(dir.path());
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.remove("a").unwrap();

        let reopened = FileStore::in_dir(dir.path());
        assert_eq!(reopened.get("a").unwrap(), None);
        assert_eq!(reopened.get("b").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("profile").join("default");
        let mut store = FileStore::in_dir(&nested);
        store.set("k", "v").unwrap();
        assert!(nested.join(STORAGE_FILE_NAME).exists());
        assert!(!nested.join("storage.json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(STORAGE_FILE_NAME);
        fs::write(&path, "{ definitely not json").unwrap();

        let mut store = FileStore::open(&path);
        assert_eq!(store.get("isAuthenticated").unwrap(), None);

        store.set("isAuthenticated", "true").unwrap();
        assert_eq!(store.get("isAuthenticated").unwrap().as_deref(), Some("true"));
    }
}
