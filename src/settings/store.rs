// src/settings/store.rs
// =============================================================================
// The key-value store the settings live in.
//
// A browser extension gets `storage.local` with async get(keys)/set(record).
// We model exactly that shape as a trait so the loader does not care whether
// the values come from a JSON file on disk or a map in memory.
//
// Semantics copied from storage.local:
// - get(keys) returns only the keys that exist; missing keys are just absent
// - set(record) merges into what is already there, it does not replace it
//
// Rust concepts:
// - async-trait: async methods on a trait we can put behind &dyn
// - Mutex: interior mutability for the in-memory store
// =============================================================================

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::StoreError;

/// One read or write: key -> raw JSON value
pub type StoreRecord = Map<String, Value>;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Returns the stored values for `keys`. Keys with no stored value are left out.
    async fn get(&self, keys: &[&str]) -> Result<StoreRecord, StoreError>;

    /// Merges `record` into the store.
    async fn set(&self, record: StoreRecord) -> Result<(), StoreError>;

    /// Deletes `keys` from the store. Missing keys are ignored.
    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError>;
}

// Lets the binary pick a backend at runtime and still hand it to generic code
#[async_trait]
impl<T: SettingsStore + ?Sized> SettingsStore for Box<T> {
    async fn get(&self, keys: &[&str]) -> Result<StoreRecord, StoreError> {
        (**self).get(keys).await
    }

    async fn set(&self, record: StoreRecord) -> Result<(), StoreError> {
        (**self).set(record).await
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        (**self).remove(keys).await
    }
}

/// Store kept in process memory. Used by tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<StoreRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_values(values: StoreRecord) -> Self {
        Self {
            values: Mutex::new(values),
        }
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<StoreRecord, StoreError> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(pick(&values, keys))
    }

    async fn set(&self, record: StoreRecord) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.extend(record);
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        for key in keys {
            values.remove(*key);
        }
        Ok(())
    }
}

/// Store persisted as a single JSON object in a file.
///
/// A file that does not exist yet reads as an empty store; the first `set`
/// creates it (and its parent directory).
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<StoreRecord, StoreError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "settings file missing, treating as empty");
                return Ok(StoreRecord::new());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        if contents.trim().is_empty() {
            return Ok(StoreRecord::new());
        }

        let value: Value = serde_json::from_str(&contents).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        match value {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject {
                path: self.path.clone(),
            }),
        }
    }

    async fn write_all(&self, values: &StoreRecord) -> Result<(), StoreError> {
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(io_error)?;
            }
        }

        let json = serde_json::to_string_pretty(values).map_err(|source| StoreError::Json {
            path: self.path.clone(),
            source,
        })?;

        tokio::fs::write(&self.path, json).await.map_err(io_error)
    }
}

#[async_trait]
impl SettingsStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<StoreRecord, StoreError> {
        let values = self.read_all().await?;
        Ok(pick(&values, keys))
    }

    async fn set(&self, record: StoreRecord) -> Result<(), StoreError> {
        let mut values = self.read_all().await?;
        values.extend(record);
        self.write_all(&values).await?;
        tracing::debug!(path = %self.path.display(), "settings file written");
        Ok(())
    }

    async fn remove(&self, keys: &[&str]) -> Result<(), StoreError> {
        // An unreadable file is overwritten, so a reset can repair it
        let mut values = match self.read_all().await {
            Ok(values) => values,
            Err(e @ (StoreError::Json { .. } | StoreError::NotAnObject { .. })) => {
                tracing::warn!(error = %e, "discarding corrupt settings file");
                StoreRecord::new()
            }
            Err(e) => return Err(e),
        };
        for key in keys {
            values.remove(*key);
        }
        self.write_all(&values).await
    }
}

// Copies the requested keys out of a full record
fn pick(values: &StoreRecord, keys: &[&str]) -> StoreRecord {
    keys.iter()
        .filter_map(|key| values.get(*key).map(|v| (key.to_string(), v.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> StoreRecord {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[tokio::test]
    async fn test_memory_store_get_only_returns_existing_keys() {
        let store = MemoryStore::with_values(record(json!({ "sort": "asc", "other": 1 })));
        let values = store.get(&["sort", "limit"]).await.unwrap();
        assert_eq!(values.len(), 1);
        assert_eq!(values["sort"], "asc");
    }

    #[tokio::test]
    async fn test_memory_store_set_merges() {
        let store = MemoryStore::with_values(record(json!({ "sort": "asc", "mode": "comments" })));
        store.set(record(json!({ "sort": "desc" }))).await.unwrap();

        let values = store.get(&["sort", "mode"]).await.unwrap();
        assert_eq!(values["sort"], "desc");
        assert_eq!(values["mode"], "comments");
    }

    #[tokio::test]
    async fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        let values = store.get(&["limit"]).await.unwrap();
        assert!(values.is_empty());
    }

    #[tokio::test]
    async fn test_file_store_persists_between_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");

        JsonFileStore::new(&path)
            .set(record(json!({ "limit": 50, "backend": "artic_shift" })))
            .await
            .unwrap();
        JsonFileStore::new(&path)
            .set(record(json!({ "limit": 75 })))
            .await
            .unwrap();

        let values = JsonFileStore::new(&path)
            .get(&["limit", "backend"])
            .await
            .unwrap();
        assert_eq!(values["limit"], 75);
        assert_eq!(values["backend"], "artic_shift");
    }

    #[tokio::test]
    async fn test_file_store_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("settings.json"));
        store
            .set(record(json!({ "limit": 50, "sort": "asc" })))
            .await
            .unwrap();
        store.remove(&["limit"]).await.unwrap();

        let values = store.get(&["limit", "sort"]).await.unwrap();
        assert!(!values.contains_key("limit"));
        assert_eq!(values["sort"], "asc");
    }

    #[tokio::test]
    async fn test_file_store_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = JsonFileStore::new(&path).get(&["limit"]).await.unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject { .. }));
    }

    #[tokio::test]
    async fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = JsonFileStore::new(&path).get(&["limit"]).await.unwrap_err();
        assert!(matches!(err, StoreError::Json { .. }));
    }

    #[tokio::test]
    async fn test_file_store_remove_repairs_truncated_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "limit": 5"#).unwrap();

        let store = JsonFileStore::new(&path);
        store.remove(&["limit", "sort"]).await.unwrap();

        assert!(store.get(&["limit", "sort"]).await.unwrap().is_empty());
    }
}
