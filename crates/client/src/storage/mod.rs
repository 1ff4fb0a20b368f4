//! Persisted key-value storage behind a narrow seam.
//!
//! Session state (the bearer token and the serialized identity) survives
//! restarts through a [`StorageAdapter`]. The seam is deliberately small -
//! get/set/remove/clear on string pairs - so store logic can be tested
//! against [`MemoryStorage`] without touching the filesystem.
//!
//! Writes are infallible from the caller's point of view; the file-backed
//! adapter logs failures and keeps the in-memory view, which mirrors how a
//! browser's local storage behaves.

mod file;
mod memory;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;

/// Fixed keys under which session state is persisted.
pub mod keys {
    /// Bearer token, attached to every authenticated request.
    pub const TOKEN: &str = "token";
    /// Serialized [`crate::models::Identity`] JSON.
    pub const IDENTITY: &str = "user";
}

/// Capability to persist string key-value pairs.
pub trait StorageAdapter: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str);

    /// Delete a single key. Deleting an absent key is a no-op.
    fn remove(&self, key: &str);

    /// Delete everything.
    fn clear(&self);
}
