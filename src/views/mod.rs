//! Per-post view counters over a pluggable key-value namespace
//!
//! Increments are read-then-write. Two overlapping increments of the same
//! slug can lose one update; counts are best-effort.

use serde_json::Map;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use crate::error::StoreError;

/// Prefix of every view counter key
pub const VIEW_KEY_PREFIX: &str = "post-views-";

/// String key-value namespace
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-process store, lost on drop
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store persisted as one JSON object, rewritten on every `set`
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Mutex<Map<String, serde_json::Value>>,
}

impl JsonFileStore {
    /// Open a store, starting empty when the file does not exist yet
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => Map::new(),
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    fn save(&self, entries: &Map<String, serde_json::Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).map(|value| match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), serde_json::Value::String(value.to_string()));
        self.save(&entries)
    }
}

/// Reads and bumps view counts keyed by post slug
#[derive(Clone)]
pub struct ViewCounter {
    store: Arc<dyn KeyValueStore>,
}

impl ViewCounter {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    fn key(slug: &str) -> String {
        format!("{}{}", VIEW_KEY_PREFIX, slug)
    }

    /// Current count; 0 when absent, non-numeric or unreadable
    pub fn get_views(&self, slug: &str) -> u64 {
        match self.store.get(&Self::key(slug)) {
            Ok(Some(value)) => value.trim().parse().unwrap_or(0),
            Ok(None) => 0,
            Err(e) => {
                tracing::warn!("Failed to read views for {}: {}", slug, e);
                0
            }
        }
    }

    /// Write back the current count plus one
    pub fn increment(&self, slug: &str) -> Result<(), StoreError> {
        let current = self.get_views(slug);
        self.store
            .set(&Self::key(slug), &current.saturating_add(1).to_string())
    }

    /// Count a view and return the new total
    pub fn record_view(&self, slug: &str) -> Result<u64, StoreError> {
        self.increment(slug)?;
        Ok(self.get_views(slug))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn memory_counter() -> (Arc<MemoryStore>, ViewCounter) {
        let store = Arc::new(MemoryStore::new());
        (store.clone(), ViewCounter::new(store))
    }

    #[test]
    fn test_absent_is_zero() {
        let (_, counter) = memory_counter();
        assert_eq!(counter.get_views("hello"), 0);
    }

    #[test]
    fn test_sequential_increments() {
        let (_, counter) = memory_counter();
        for _ in 0..7 {
            counter.increment("hello").unwrap();
        }
        assert_eq!(counter.get_views("hello"), 7);
        assert_eq!(counter.get_views("other"), 0);
    }

    #[test]
    fn test_key_layout_and_garbage_value() {
        let (store, counter) = memory_counter();
        counter.increment("a").unwrap();
        assert_eq!(store.get("post-views-a").unwrap(), Some("1".to_string()));

        store.set("post-views-b", "lots").unwrap();
        assert_eq!(counter.get_views("b"), 0);
        assert_eq!(counter.record_view("b").unwrap(), 1);
    }

    #[test]
    fn test_json_file_store_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state/views.json");

        {
            let counter = ViewCounter::new(Arc::new(JsonFileStore::open(&path).unwrap()));
            counter.increment("post1").unwrap();
            counter.increment("post1").unwrap();
        }

        let counter = ViewCounter::new(Arc::new(JsonFileStore::open(&path).unwrap()));
        assert_eq!(counter.get_views("post1"), 2);
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("post-views-post1"));
    }

    #[test]
    fn test_json_file_store_reads_numbers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.json");
        fs::write(&path, r#"{"post-views-x": 41}"#).unwrap();

        let counter = ViewCounter::new(Arc::new(JsonFileStore::open(&path).unwrap()));
        assert_eq!(counter.record_view("x").unwrap(), 42);
    }

    #[test]
    fn test_json_file_store_rejects_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Serialization(_))
        ));
    }
}
