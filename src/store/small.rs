//! Small-value tier - synchronous JSON documents over a string medium
//!
//! The store serializes each value to one JSON document under one key. The
//! medium behind it is injected, so tests run against an in-memory map and
//! a headless context degrades cleanly instead of panicking: every read
//! failure or malformed document becomes the caller-supplied default, every
//! write failure a logged no-op.

use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;

/// Practical per-value ceiling for the string tier. Anything larger
/// belongs in the blob tier.
pub const VALUE_CEILING_BYTES: usize = 2 * 1024 * 1024;

/// A size-limited string keyed/value medium. Implementations report
/// failures; the store above converts them to defaults and no-ops.
pub trait StringMedium: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// One UTF-8 JSON document per key inside a directory
pub struct FileMedium {
    dir: PathBuf,
    ceiling: usize,
}

impl FileMedium {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ceiling: VALUE_CEILING_BYTES,
        }
    }

    /// Override the per-value ceiling (tests use small ceilings)
    pub fn with_ceiling(mut self, ceiling: usize) -> Self {
        self.ceiling = ceiling;
        self
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl StringMedium for FileMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if value.len() > self.ceiling {
            return Err(Error::ValueTooLarge {
                key: key.to_string(),
                size: value.len(),
                limit: self.ceiling,
            });
        }
        fs::create_dir_all(&self.dir)?;
        fs::write(self.key_path(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// In-memory medium, the fake used by tests
#[derive(Default)]
pub struct MemoryMedium {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StringMedium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().unwrap_or_else(|p| p.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.write().unwrap_or_else(|p| p.into_inner());
        entries.remove(key);
        Ok(())
    }
}

/// Medium for execution contexts with no storage at all; every operation
/// reports unavailability and the store degrades to defaults
pub struct NullMedium;

impl StringMedium for NullMedium {
    fn read(&self, _key: &str) -> Result<Option<String>> {
        Err(Error::Unavailable("no storage context".into()))
    }

    fn write(&self, _key: &str, _value: &str) -> Result<()> {
        Err(Error::Unavailable("no storage context".into()))
    }

    fn remove(&self, _key: &str) -> Result<()> {
        Err(Error::Unavailable("no storage context".into()))
    }
}

/// JSON key/value store over an injected string medium
pub struct SmallValueStore {
    medium: Box<dyn StringMedium>,
}

impl SmallValueStore {
    pub fn new(medium: Box<dyn StringMedium>) -> Self {
        Self { medium }
    }

    /// File-backed store rooted at a directory
    pub fn in_directory(dir: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileMedium::new(dir)))
    }

    /// In-memory store (tests, previews)
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryMedium::new()))
    }

    /// Store for a context with no storage; all reads yield defaults
    pub fn unavailable() -> Self {
        Self::new(Box::new(NullMedium))
    }

    /// Read a value, or `None` when nothing usable is stored under the key.
    /// A missing key, an unreadable medium and a malformed document are all
    /// `None`; the latter two are logged.
    pub fn get_opt<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.medium.read(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Reading '{}' failed: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Malformed document under '{}': {}", key, e);
                None
            }
        }
    }

    /// Read a value, falling back to `default` when nothing usable is stored
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get_opt(key).unwrap_or(default)
    }

    /// Write a value as one JSON document. Failures are logged, never
    /// surfaced; the previous document stays intact.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Serializing '{}' failed: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.medium.write(key, &raw) {
            tracing::warn!("Writing '{}' failed: {}", key, e);
        }
    }

    /// Remove a key outright. Failures are logged.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.medium.remove(key) {
            tracing::warn!("Removing '{}' failed: {}", key, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    }

    #[test]
    fn test_get_set_roundtrip() {
        let store = SmallValueStore::in_memory();

        store.set("flag", &true);
        assert!(store.get("flag", false));
        assert_eq!(store.get_opt::<Vec<String>>("missing"), None);
        assert_eq!(store.get("missing", 7u32), 7);
    }

    #[test]
    fn test_malformed_document_degrades_to_default() {
        let medium = MemoryMedium::new();
        medium.write("broken", "{not json").unwrap();

        let store = SmallValueStore::new(Box::new(medium));
        assert_eq!(store.get("broken", 42u32), 42);
        assert_eq!(store.get_opt::<u32>("broken"), None);
    }

    #[test]
    fn test_unavailable_context_degrades() {
        init_tracing();
        let store = SmallValueStore::unavailable();

        store.set("anything", &vec![1, 2, 3]);
        assert_eq!(store.get("anything", Vec::<i32>::new()), Vec::<i32>::new());
        store.remove("anything");
    }

    #[test]
    fn test_file_medium_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        let store = SmallValueStore::in_directory(dir.path());
        store.set("profile", &"hello".to_string());

        let reopened = SmallValueStore::in_directory(dir.path());
        assert_eq!(reopened.get("profile", String::new()), "hello");
    }

    #[test]
    fn test_file_medium_enforces_ceiling() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path()).with_ceiling(16);

        assert!(medium.write("small", "\"ok\"").is_ok());
        let err = medium.write("big", &"x".repeat(64)).unwrap_err();
        assert!(matches!(err, Error::ValueTooLarge { .. }));

        // the store swallows the failure and keeps the old document
        let store = SmallValueStore::new(Box::new(FileMedium::new(dir.path()).with_ceiling(16)));
        store.set("small", &"y".repeat(64));
        assert_eq!(store.get("small", String::new()), "ok");
    }

    #[test]
    fn test_remove() {
        let store = SmallValueStore::in_memory();
        store.set("gone", &1u8);
        store.remove("gone");
        assert_eq!(store.get_opt::<u8>("gone"), None);
    }
}
