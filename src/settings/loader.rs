// src/settings/loader.rs
// =============================================================================
// Reading and writing the four settings keys.
//
// Loading never fails. Each key falls back to its default when the stored
// value is:
// - missing
// - "falsy" the way the browser sees it: null, false, 0 or ""
// - the wrong type, or an enum value we don't know
//
// If the store itself can't be read we log it and use all defaults, so a
// broken settings file never stops a redirect.
// =============================================================================

use serde_json::{json, Value};

use super::store::{SettingsStore, StoreRecord};
use super::{SearchMode, Settings, SortOrder};
use crate::error::StoreError;

/// Store keys, in the order the settings surface shows them
pub const SETTINGS_KEYS: [&str; 4] = ["limit", "sort", "mode", "backend"];

/// Reads the current settings, filling every gap from `defaults`.
pub async fn load_settings(store: &dyn SettingsStore, defaults: &Settings) -> Settings {
    let stored = match store.get(&SETTINGS_KEYS).await {
        Ok(stored) => stored,
        Err(e) => {
            tracing::warn!(error = %e, "failed to read settings, using defaults");
            return defaults.clone();
        }
    };

    Settings {
        limit: stored_value(&stored, "limit", parse_limit).unwrap_or(defaults.limit),
        sort: stored_value(&stored, "sort", |v| v.as_str().and_then(SortOrder::from_stored))
            .unwrap_or(defaults.sort),
        mode: stored_value(&stored, "mode", |v| v.as_str().and_then(SearchMode::from_stored))
            .unwrap_or(defaults.mode),
        backend: stored_value(&stored, "backend", |v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| defaults.backend.clone()),
    }
}

/// Writes all four keys in one `set`, like the options page's save button.
pub async fn save_settings(store: &dyn SettingsStore, settings: &Settings) -> Result<(), StoreError> {
    let mut record = StoreRecord::new();
    record.insert("limit".to_string(), json!(settings.limit));
    record.insert("sort".to_string(), json!(settings.sort.as_str()));
    record.insert("mode".to_string(), json!(settings.mode.as_str()));
    record.insert("backend".to_string(), json!(settings.backend));

    store.set(record).await?;
    tracing::info!(
        limit = settings.limit,
        sort = %settings.sort,
        mode = %settings.mode,
        backend = %settings.backend,
        "settings saved"
    );
    Ok(())
}

/// Drops all four keys so the next load is all defaults.
pub async fn reset_settings(store: &dyn SettingsStore) -> Result<(), StoreError> {
    store.remove(&SETTINGS_KEYS).await
}

// Looks up `key` and runs `parse` on it, unless it is missing or falsy.
// A value that is present but doesn't parse is logged and treated as missing.
fn stored_value<T>(stored: &StoreRecord, key: &str, parse: impl Fn(&Value) -> Option<T>) -> Option<T> {
    let value = stored.get(key).filter(|v| is_truthy(v))?;
    let parsed = parse(value);
    if parsed.is_none() {
        tracing::warn!(key, value = %value, "ignoring invalid stored setting");
    }
    parsed
}

// JavaScript truthiness for JSON values
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// Positive whole numbers only. The options form stores a number, but a
// hand-edited file may hold "50".
fn parse_limit(value: &Value) -> Option<u32> {
    let limit = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }?;

    u32::try_from(limit).ok().filter(|limit| *limit > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedirectConfig;
    use crate::settings::MemoryStore;
    use async_trait::async_trait;
    use std::path::PathBuf;

    fn store_with(value: Value) -> MemoryStore {
        match value {
            Value::Object(map) => MemoryStore::with_values(map),
            _ => panic!("test store must be an object"),
        }
    }

    fn defaults() -> Settings {
        RedirectConfig::default().defaults
    }

    // A store whose reads always fail
    struct BrokenStore;

    #[async_trait]
    impl SettingsStore for BrokenStore {
        async fn get(&self, _keys: &[&str]) -> Result<StoreRecord, StoreError> {
            Err(StoreError::NotAnObject {
                path: PathBuf::from("broken.json"),
            })
        }

        async fn set(&self, _record: StoreRecord) -> Result<(), StoreError> {
            Ok(())
        }

        async fn remove(&self, _keys: &[&str]) -> Result<(), StoreError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_empty_store_gives_defaults() {
        let settings = load_settings(&MemoryStore::new(), &defaults()).await;
        assert_eq!(
            settings,
            Settings {
                limit: 100,
                sort: SortOrder::Desc,
                mode: SearchMode::Submissions,
                backend: "artic_shift".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_partial_store_merges_with_defaults() {
        let store = store_with(json!({ "sort": "asc" }));
        let settings = load_settings(&store, &defaults()).await;
        assert_eq!(settings.sort, SortOrder::Asc);
        assert_eq!(settings.limit, 100);
        assert_eq!(settings.mode, SearchMode::Submissions);
        assert_eq!(settings.backend, "artic_shift");
    }

    #[tokio::test]
    async fn test_full_store_is_used_as_is() {
        let store = store_with(json!({
            "limit": 50,
            "sort": "asc",
            "mode": "comments",
            "backend": "other_backend"
        }));
        let settings = load_settings(&store, &defaults()).await;
        assert_eq!(settings.limit, 50);
        assert_eq!(settings.sort, SortOrder::Asc);
        assert_eq!(settings.mode, SearchMode::Comments);
        assert_eq!(settings.backend, "other_backend");
    }

    #[tokio::test]
    async fn test_falsy_values_fall_back() {
        let store = store_with(json!({
            "limit": 0,
            "sort": "",
            "mode": null,
            "backend": false
        }));
        let settings = load_settings(&store, &defaults()).await;
        assert_eq!(settings, defaults());
    }

    #[tokio::test]
    async fn test_invalid_values_fall_back() {
        let store = store_with(json!({
            "limit": -5,
            "sort": "sideways",
            "mode": ["comments"],
            "backend": 42
        }));
        let settings = load_settings(&store, &defaults()).await;
        assert_eq!(settings, defaults());
    }

    #[tokio::test]
    async fn test_numeric_string_limit() {
        let store = store_with(json!({ "limit": "250" }));
        let settings = load_settings(&store, &defaults()).await;
        assert_eq!(settings.limit, 250);
    }

    #[tokio::test]
    async fn test_store_failure_gives_defaults() {
        let settings = load_settings(&BrokenStore, &defaults()).await;
        assert_eq!(settings, defaults());
    }

    #[tokio::test]
    async fn test_injected_defaults_are_used() {
        let custom = Settings {
            limit: 10,
            sort: SortOrder::Asc,
            mode: SearchMode::Comments,
            backend: "fixture".to_string(),
        };
        let settings = load_settings(&MemoryStore::new(), &custom).await;
        assert_eq!(settings, custom);
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let store = MemoryStore::new();
        let saved = Settings {
            limit: 500,
            sort: SortOrder::Asc,
            mode: SearchMode::Comments,
            backend: "artic_shift".to_string(),
        };
        save_settings(&store, &saved).await.unwrap();

        let raw = store.get(&SETTINGS_KEYS).await.unwrap();
        assert_eq!(raw["limit"], 500);
        assert_eq!(raw["sort"], "asc");

        assert_eq!(load_settings(&store, &defaults()).await, saved);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let store = store_with(json!({ "limit": 5, "sort": "asc", "unrelated": true }));
        reset_settings(&store).await.unwrap();

        assert_eq!(load_settings(&store, &defaults()).await, defaults());
        assert_eq!(store.get(&["unrelated"]).await.unwrap()["unrelated"], true);
    }

    #[tokio::test]
    async fn test_reset_repairs_corrupt_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "limit": 5"#).unwrap();
        let store = crate::settings::JsonFileStore::new(&path);

        reset_settings(&store).await.unwrap();

        assert_eq!(load_settings(&store, &defaults()).await, defaults());
        assert!(store.get(&SETTINGS_KEYS).await.unwrap().is_empty());
    }

    #[test]
    fn test_truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!([])));
    }
}
