//! Persisted key-value storage for user settings.
//!
//! A flat string-to-string namespace. Holds credentials (`<SERVICE>_API_KEY`),
//! the AI feature toggles and the single pending map selection. Nothing else
//! is persisted: stories live in memory for the session only.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::error::StorySpotError;

/// Key holding the serialized AI feature toggles.
pub const FEATURES_KEY: &str = "storySpotAIFeatures";

/// Key holding the pending, user-confirmed map selection.
pub const SELECTED_LOCATION_KEY: &str = "selectedLocation";

pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorySpotError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorySpotError>;
    fn remove(&self, key: &str) -> Result<(), StorySpotError>;
}

/// Read and deserialize a JSON value. Any failure is logged and reads as absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(key, error = %e, "Stored value is not valid JSON");
            None
        }
    }
}

pub fn save_json<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StorySpotError> {
    let raw = serde_json::to_string(value)
        .map_err(|e| StorySpotError::Storage(format!("serialize {key}: {e}")))?;
    store.set(key, &raw)
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// JSON object on disk. The whole file is rewritten on every mutation.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorySpotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(StorySpotError::Storage(format!(
                    "read {}: {e}",
                    self.path.display()
                )))
            }
        };

        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&raw)
            .map_err(|e| StorySpotError::Storage(format!("parse {}: {e}", self.path.display())))
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorySpotError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| {
                    StorySpotError::Storage(format!("create {}: {e}", parent.display()))
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(entries)
            .map_err(|e| StorySpotError::Storage(e.to_string()))?;
        std::fs::write(&self.path, raw)
            .map_err(|e| StorySpotError::Storage(format!("write {}: {e}", self.path.display())))
    }

    fn guard(&self) -> Result<std::sync::MutexGuard<'_, ()>, StorySpotError> {
        self.lock
            .lock()
            .map_err(|_| StorySpotError::Storage("file store lock poisoned".into()))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorySpotError> {
        let _guard = self.guard()?;
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorySpotError> {
        let _guard = self.guard()?;
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), StorySpotError> {
        let _guard = self.guard()?;
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// In-process store; contents vanish with the process.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorySpotError> {
        self.entries
            .lock()
            .map_err(|_| StorySpotError::Storage("memory store lock poisoned".into()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorySpotError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorySpotError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorySpotError> {
        self.entries()?.remove(key);
        Ok(())
    }
}
