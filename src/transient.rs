//! Transient blob registry
//!
//! In-memory, session-scoped references to uploaded media payloads. A
//! reference is a `blob:`-prefixed string valid only for the current
//! process; persisting it as-is would dangle across sessions, which is why
//! the background repository swaps it for the stored sentinel on save and
//! mints a fresh reference on load.

use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Prefix shared by every transient reference
pub const TRANSIENT_PREFIX: &str = "blob:";

const REFERENCE_SUFFIX_LEN: usize = 12;

/// Registry of in-memory payloads addressed by transient references
#[derive(Debug, Default)]
pub struct TransientBlobs {
    entries: RwLock<HashMap<String, Arc<Vec<u8>>>>,
}

impl TransientBlobs {
    pub fn new() -> Self {
        Self::default()
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Vec<u8>>>> {
        self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Vec<u8>>>> {
        self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Register a payload and mint a reference to it
    pub fn insert(&self, bytes: Vec<u8>) -> String {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(REFERENCE_SUFFIX_LEN)
            .map(char::from)
            .collect();
        let reference = format!("{}{}", TRANSIENT_PREFIX, suffix);

        self.write_entries().insert(reference.clone(), Arc::new(bytes));

        reference
    }

    /// Resolve a reference to its payload, if it is still registered
    pub fn resolve(&self, reference: &str) -> Option<Arc<Vec<u8>>> {
        self.read_entries().get(reference).cloned()
    }

    /// Drop a reference and its payload
    pub fn revoke(&self, reference: &str) {
        self.write_entries().remove(reference);
    }

    pub fn len(&self) -> usize {
        self.read_entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Whether a config value is a transient reference rather than a plain
/// color/gradient string
pub fn is_transient_reference(value: &str) -> bool {
    value.starts_with(TRANSIENT_PREFIX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::background::STORED_SENTINEL;

    #[test]
    fn test_insert_resolve_revoke() {
        let blobs = TransientBlobs::new();

        let reference = blobs.insert(vec![1, 2, 3]);
        assert!(reference.starts_with(TRANSIENT_PREFIX));
        assert_eq!(blobs.resolve(&reference).unwrap().as_slice(), &[1, 2, 3]);

        blobs.revoke(&reference);
        assert!(blobs.resolve(&reference).is_none());
        assert!(blobs.is_empty());
    }

    #[test]
    fn test_references_are_unique() {
        let blobs = TransientBlobs::new();
        let a = blobs.insert(vec![0]);
        let b = blobs.insert(vec![0]);
        assert_ne!(a, b);
        assert_eq!(blobs.len(), 2);
    }

    #[test]
    fn test_reference_never_collides_with_sentinel() {
        let blobs = TransientBlobs::new();
        // suffix length alone rules the sentinel out
        for _ in 0..32 {
            assert_ne!(blobs.insert(Vec::new()), STORED_SENTINEL);
        }
    }

    #[test]
    fn test_is_transient_reference() {
        assert!(is_transient_reference("blob:abc123"));
        // the sentinel shares the prefix on purpose: a raw sentinel fed back
        // into save resolves to nothing and the save degrades to a no-op
        assert!(is_transient_reference(STORED_SENTINEL));
        assert!(!is_transient_reference("#101418"));
        assert!(!is_transient_reference("linear-gradient(135deg, #000 0%, #fff 100%)"));
    }
}
