//! In-memory storage, lost on restart.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use super::StorageAdapter;

/// Storage adapter that keeps everything in memory.
///
/// This is the "nothing survives a reload" variant: sessions live only
/// as long as the process. Also the default choice in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries().insert(key.to_owned(), value.to_owned());
    }

    fn remove(&self, key: &str) {
        self.entries().remove(key);
    }

    fn clear(&self) {
        self.entries().clear();
    }
}
