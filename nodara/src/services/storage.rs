//! # Durable Storage
//!
//! [`KeyValueStore`] implementations.
//!
//! - [`FileStore`]: one JSON object file; each write replaces the file
//!   through a temporary sibling and a rename, so a crash never leaves a
//!   half-written file behind
//! - [`MemoryStore`]: process-local map for tests and ephemeral sessions

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::core::service::KeyValueStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Key-value store backed by a JSON object file.
pub struct FileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Map<String, Value>, StorageError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            _ => {
                warn!(path = %self.path.display(), "Store file is malformed, treating it as empty");
                Ok(Map::new())
            }
        }
    }

    async fn save(&self, map: &Map<String, Value>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(map)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.load().await?;
        Ok(map.get(key).and_then(|v| v.as_str()).map(str::to_string))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        map.insert(key.to_string(), Value::String(value.to_string()));
        self.save(&map).await?;
        debug!(key, "Stored item");
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut map = self.load().await?;
        if map.remove(key).is_some() {
            self.save(&map).await?;
            debug!(key, "Removed item");
        }
        Ok(())
    }
}

/// In-memory key-value store.
#[derive(Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.read().get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.write().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    // ========== FileStore Tests ==========

    #[tokio::test]
    async fn test_file_store_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get_item("selectedWallet").await.unwrap(), None);

        store.set_item("selectedWallet", "Phantom").await.unwrap();
        store.set_item("walletAddress", "abc").await.unwrap();
        assert_eq!(
            store.get_item("selectedWallet").await.unwrap().as_deref(),
            Some("Phantom")
        );

        store.remove_item("selectedWallet").await.unwrap();
        assert_eq!(store.get_item("selectedWallet").await.unwrap(), None);
        assert_eq!(store.get_item("walletAddress").await.unwrap().as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_file_store_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("store.json");

        FileStore::new(&path).set_item("walletAddress", "xyz").await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get_item("walletAddress").await.unwrap().as_deref(), Some("xyz"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_store_malformed_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get_item("selectedWallet").await.unwrap(), None);

        store.set_item("selectedWallet", "Embedded").await.unwrap();
        assert_eq!(
            store.get_item("selectedWallet").await.unwrap().as_deref(),
            Some("Embedded")
        );
    }

    #[tokio::test]
    async fn test_file_store_ignores_non_string_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, r#"{"selectedWallet": 42}"#).unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.get_item("selectedWallet").await.unwrap(), None);
    }

    // ========== MemoryStore Tests ==========

    #[tokio::test]
    async fn test_memory_store() {
        let store = MemoryStore::default();
        assert!(store.is_empty());

        store.set_item("k", "v").await.unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get_item("k").await.unwrap().as_deref(), Some("v"));

        store.remove_item("k").await.unwrap();
        store.remove_item("k").await.unwrap();
        assert!(store.is_empty());
    }
}
