//! Durable client-side key/value storage.
//!
//! The route resolver writes the last resolved locale here. Nothing reads it
//! back to restore state: the URL fragment stays authoritative.
//!
//! # Implementations
//!
//! - [`MemoryStorage`]: In-process map, for tests and one-shot rendering
//! - [`FileStorage`]: JSON object on disk, rewritten on every change

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::StorageError;

/// Durable string key/value storage.
///
/// Writes are infallible from the caller's point of view. Backends that can
/// fail log the failure and keep their in-memory view current.
pub trait ClientStorage: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Remove a value. Removing a missing key is a no-op.
    fn remove(&self, key: &str);
}

/// In-memory [`ClientStorage`].
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// [`ClientStorage`] persisted as a JSON object file.
///
/// ```text
/// { "ELEMENT_LANGUAGE": "en-US" }
/// ```
///
/// The whole file is rewritten on each change. Write errors are logged and
/// never fatal.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStorage {
    /// Open storage at `path`, loading existing entries.
    ///
    /// A missing file is treated as empty storage and created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match fs::read_to_string(&path) {
            Ok(content) => {
                serde_json::from_str(&content).map_err(|source| StorageError::Json {
                    path: path.clone(),
                    source,
                })?
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "Opened client storage");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Storage file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            tracing::warn!(path = %parent.display(), "Failed to create storage directory: {e}");
            return;
        }

        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("Failed to serialize client storage: {e}");
                return;
            }
        };

        if let Err(e) = fs::write(&self.path, json) {
            tracing::warn!(path = %self.path.display(), "Failed to write client storage: {e}");
        }
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.get(key).is_some_and(|v| v == value) {
            return;
        }
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("ELEMENT_LANGUAGE"), None);

        storage.set("ELEMENT_LANGUAGE", "zh-CN");
        storage.set("ELEMENT_LANGUAGE", "en-US");
        assert_eq!(storage.get("ELEMENT_LANGUAGE").as_deref(), Some("en-US"));

        storage.remove("ELEMENT_LANGUAGE");
        storage.remove("ELEMENT_LANGUAGE");
        assert_eq!(storage.get("ELEMENT_LANGUAGE"), None);
    }

    #[test]
    fn test_file_storage_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::open(dir.path().join("storage.json")).unwrap();
        assert_eq!(storage.get("ELEMENT_LANGUAGE"), None);
        assert!(!storage.path().exists());
    }

    #[test]
    fn test_file_storage_persists_across_opens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("ELEMENT_LANGUAGE", "en-US");
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("ELEMENT_LANGUAGE").as_deref(), Some("en-US"));

        let on_disk: BTreeMap<String, String> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk.get("ELEMENT_LANGUAGE").map(String::as_str), Some("en-US"));
    }

    #[test]
    fn test_file_storage_remove_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");

        let storage = FileStorage::open(&path).unwrap();
        storage.set("a", "1");
        storage.set("b", "2");
        storage.remove("a");

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("a"), None);
        assert_eq!(reopened.get("b").as_deref(), Some("2"));
    }

    #[test]
    fn test_file_storage_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::Json { .. }));
    }

    static_assertions::assert_impl_all!(MemoryStorage: Send, Sync);
    static_assertions::assert_impl_all!(FileStorage: Send, Sync);
}
