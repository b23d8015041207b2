//! Shortcut repository - write-through CRUD over the small-value tier
//!
//! Collections are treated as immutable values: mutators take the current
//! collection, persist the successor, and return it. `load` distinguishes
//! "nothing stored yet" (`None`) from a stored empty list so callers can
//! decide whether to seed defaults.

use super::keys;
use crate::shortcut::{self, Shortcut, ShortcutPatch};
use crate::store::SmallValueStore;
use chrono::Utc;
use rand::distr::Alphanumeric;
use rand::Rng;
use std::collections::BTreeSet;
use std::sync::Arc;

const ID_SUFFIX_LEN: usize = 9;

/// CRUD operations over the ordered shortcut collection
pub struct ShortcutRepository {
    store: Arc<SmallValueStore>,
}

impl ShortcutRepository {
    pub fn new(store: Arc<SmallValueStore>) -> Self {
        Self { store }
    }

    /// Load the stored collection; `None` means nothing stored yet
    pub fn load(&self) -> Option<Vec<Shortcut>> {
        self.store.get_opt(keys::SHORTCUTS)
    }

    /// Full overwrite persistence
    pub fn save(&self, shortcuts: &[Shortcut]) {
        self.store.set(keys::SHORTCUTS, shortcuts);
    }

    /// Append a shortcut, persist, return the new collection
    pub fn add(&self, shortcuts: &[Shortcut], new_shortcut: Shortcut) -> Vec<Shortcut> {
        let mut updated = shortcuts.to_vec();
        updated.push(new_shortcut);
        self.save(&updated);
        updated
    }

    /// Merge patch fields into the entry matching `id`; other entries pass
    /// through unchanged
    pub fn update(&self, shortcuts: &[Shortcut], id: &str, patch: &ShortcutPatch) -> Vec<Shortcut> {
        let updated: Vec<Shortcut> = shortcuts
            .iter()
            .map(|shortcut| {
                if shortcut.id == id {
                    let mut merged = shortcut.clone();
                    patch.apply_to(&mut merged);
                    merged
                } else {
                    shortcut.clone()
                }
            })
            .collect();
        self.save(&updated);
        updated
    }

    /// Remove the entry matching `id`
    pub fn delete(&self, shortcuts: &[Shortcut], id: &str) -> Vec<Shortcut> {
        let updated: Vec<Shortcut> = shortcuts
            .iter()
            .filter(|shortcut| shortcut.id != id)
            .cloned()
            .collect();
        self.save(&updated);
        updated
    }

    /// Remove every entry in `category`
    pub fn delete_category(&self, shortcuts: &[Shortcut], category: &str) -> Vec<Shortcut> {
        let updated: Vec<Shortcut> = shortcuts
            .iter()
            .filter(|shortcut| shortcut.category != category)
            .cloned()
            .collect();
        self.save(&updated);
        updated
    }

    /// Unique categories, lexicographically ordered
    pub fn list_categories(&self, shortcuts: &[Shortcut]) -> Vec<String> {
        let categories: BTreeSet<&str> =
            shortcuts.iter().map(|s| s.category.as_str()).collect();
        categories.into_iter().map(String::from).collect()
    }

    /// Overwrite with the default seed collection and return it
    pub fn reset(&self) -> Vec<Shortcut> {
        let defaults = shortcut::default_shortcuts();
        self.save(&defaults);
        defaults
    }

    /// Generate a collision-resistant shortcut id: epoch-millis prefix plus
    /// a random alphanumeric suffix
    pub fn generate_id(&self) -> String {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(ID_SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("shortcut_{}_{}", Utc::now().timestamp_millis(), suffix)
    }
}
