//! Local key-value storage
//!
//! The session persists its state in a small string key-value store, the
//! equivalent of a browser's local storage.
//!
//! # Architecture
//!
//! - `memory`: `MemoryStore`, a `BTreeMap` that lives as long as the process
//! - `file`: `FileStore`, a JSON object on disk shared by every run of the
//!   CLI and TUI for the same profile
//!
//! # Usage
//!
//! ```ignore
//! use pkconnector_core::storage::{FileStore, KeyValueStore};
//!
//! let mut store = FileStore::open(data_dir.join("storage.json"));
//! store.set("isAuthenticated", "true")?;
//! assert_eq!(store.get("isAuthenticated")?.as_deref(), Some("true"));
//! ```

pub mod file;
pub mod memory;

pub use file::{FileStore, STORAGE_FILE_NAME};
pub use memory::MemoryStore;

use crate::Result;

/// String key-value storage used to persist session state
pub trait KeyValueStore {
    /// Read a value, `None` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or replace a value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Remove a key; removing an absent key is not an error
    fn remove(&mut self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
