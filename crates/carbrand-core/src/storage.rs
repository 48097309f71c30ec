//! Persistent key-value storage
//!
//! The router only reads from storage. Writes belong to whoever manages
//! the session (the login form, a logout button), which is why `set` and
//! `remove` are inherent methods rather than part of the trait.

use crate::{Error, Result};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Read access to a client-side key-value store
pub trait Storage: Send + Sync {
    /// Value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;
}

impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }
}

/// In-memory storage
///
/// Share it through an `Arc` to keep a handle for logging in and out
/// while the guard holds the other.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-filled with one entry
    pub fn with(key: impl Into<String>, value: impl Into<String>) -> Self {
        let storage = Self::new();
        storage.set(key, value);
        storage
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.write().insert(key.into(), value.into());
    }

    pub fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().remove(key)
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }
}

/// Storage backed by a JSON object on disk
///
/// The file is read on every `get`, so a token written by another process
/// is seen by the next navigation. A missing file holds no keys.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let mut entries = self.load()?;
        entries.insert(key.into(), value.into());
        self.save(&entries)
    }

    pub fn remove(&self, key: &str) -> Result<Option<String>> {
        let mut entries = self.load()?;
        let removed = entries.remove(key);
        if removed.is_some() {
            self.save(&entries)?;
        }
        Ok(removed)
    }

    fn load(&self) -> Result<HashMap<String, String>> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(HashMap::new());
        }
        serde_json::from_str(&raw)
            .map_err(|e| Error::Storage(format!("{}: {}", self.path.display(), e)))
    }

    fn save(&self, entries: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| Error::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.remove(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("token").unwrap(), None);

        storage.set("token", "abc123");
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc123"));
        assert_eq!(storage.len(), 1);

        assert_eq!(storage.remove("token").as_deref(), Some("abc123"));
        assert!(storage.is_empty());
    }

    #[test]
    fn test_shared_memory_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let reader: Box<dyn Storage> = Box::new(Arc::clone(&storage));

        storage.set("token", "t");
        assert_eq!(reader.get("token").unwrap().as_deref(), Some("t"));
        storage.clear();
        assert_eq!(reader.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));
        assert_eq!(storage.get("token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_set_get_remove() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("storage.json"));

        storage.set("token", "abc123").unwrap();
        storage.set("theme", "dark").unwrap();
        assert_eq!(storage.get("token").unwrap().as_deref(), Some("abc123"));

        // A second handle on the same file sees the write
        let other = FileStorage::new(storage.path());
        assert_eq!(other.get("theme").unwrap().as_deref(), Some("dark"));

        assert_eq!(storage.remove("token").unwrap().as_deref(), Some("abc123"));
        assert_eq!(other.get("token").unwrap(), None);
        assert_eq!(storage.remove("token").unwrap(), None);
    }

    #[test]
    fn test_file_storage_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "[1, 2").unwrap();

        let storage = FileStorage::new(&path);
        assert!(matches!(storage.get("token"), Err(Error::Storage(_))));
    }
}
