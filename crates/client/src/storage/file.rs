//! File-backed storage, surviving restarts.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::StorageAdapter;

/// Storage adapter persisting to a single JSON file.
///
/// The whole map is rewritten on every mutation; the data is two short
/// strings, so there is nothing to optimize. A missing file means empty
/// storage, and an unreadable one is discarded with a warning rather
/// than poisoning the session.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl JsonFileStorage {
    /// Open (or lazily create) storage at `path`.
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = load(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// The backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, entries: &HashMap<String, String>) {
        let json = match serde_json::to_string_pretty(entries) {
            Ok(json) => json,
            Err(error) => {
                warn!(%error, "failed to serialize session storage");
                return;
            }
        };
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(error) = std::fs::create_dir_all(parent)
        {
            warn!(%error, path = %self.path.display(), "failed to create storage directory");
            return;
        }
        if let Err(error) = std::fs::write(&self.path, json) {
            warn!(%error, path = %self.path.display(), "failed to write session storage");
        }
    }
}

/// Read the map from disk. Missing file means empty; corrupted content
/// is dropped with a warning, matching the "clear potentially corrupted
/// data" behavior on session restore.
fn load(path: &Path) -> HashMap<String, String> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return HashMap::new(),
        Err(error) => {
            warn!(%error, path = %path.display(), "failed to read session storage");
            return HashMap::new();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(entries) => entries,
        Err(error) => {
            warn!(%error, path = %path.display(), "discarding corrupted session storage");
            HashMap::new()
        }
    }
}

impl StorageAdapter for JsonFileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries();
        entries.insert(key.to_owned(), value.to_owned());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries();
        entries.remove(key);
        self.persist(&entries);
    }

    fn clear(&self) {
        let mut entries = self.entries();
        entries.clear();
        self.persist(&entries);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("market-client-{}-{name}.json", std::process::id()))
    }

    #[test]
    fn test_round_trip_across_instances() {
        let path = temp_path("roundtrip");
        let _ = std::fs::remove_file(&path);

        let storage = JsonFileStorage::open(&path);
        storage.set("token", "abc");
        storage.set("user", r#"{"id":"u1"}"#);
        drop(storage);

        let reopened = JsonFileStorage::open(&path);
        assert_eq!(reopened.get("token"), Some("abc".to_string()));
        assert_eq!(reopened.get("user"), Some(r#"{"id":"u1"}"#.to_string()));

        reopened.clear();
        let cleared = JsonFileStorage::open(&path);
        assert_eq!(cleared.get("token"), None);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let path = temp_path("missing");
        let _ = std::fs::remove_file(&path);
        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("token"), None);
    }

    #[test]
    fn test_corrupted_file_is_discarded() {
        let path = temp_path("corrupted");
        std::fs::write(&path, "not json at all").unwrap();
        let storage = JsonFileStorage::open(&path);
        assert_eq!(storage.get("token"), None);
        let _ = std::fs::remove_file(&path);
    }
}
