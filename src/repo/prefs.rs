//! Preferences repository - focus mode and app-launch choices
//!
//! The focus-mode flag gates visibility of the entertainment category.
//! App-launch preferences record "remember my choice" decisions for app
//! protocol launches, keyed by shortcut id.

use super::keys;
use crate::store::SmallValueStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// A remembered launch decision for one app shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppLaunchPref {
    pub auto_launch: bool,
    /// Epoch milliseconds of the decision
    pub timestamp: i64,
}

/// Focus-mode flag and app-launch preference map
pub struct PrefsRepository {
    store: Arc<SmallValueStore>,
}

impl PrefsRepository {
    pub fn new(store: Arc<SmallValueStore>) -> Self {
        Self { store }
    }

    // ========== Focus Mode ==========

    pub fn load_focus_mode(&self) -> bool {
        self.store.get(keys::FOCUS_MODE, false)
    }

    pub fn save_focus_mode(&self, enabled: bool) {
        self.store.set(keys::FOCUS_MODE, &enabled);
    }

    // ========== App-Launch Preferences ==========

    fn load_app_prefs(&self) -> HashMap<String, AppLaunchPref> {
        self.store.get(keys::APP_PREFS, HashMap::new())
    }

    /// Whether the user chose to auto-launch this app without asking
    pub fn should_auto_launch(&self, app_id: &str) -> bool {
        self.load_app_prefs()
            .get(app_id)
            .is_some_and(|pref| pref.auto_launch)
    }

    /// Record an auto-launch decision, stamped with the current time
    pub fn set_auto_launch(&self, app_id: &str, auto_launch: bool) {
        let mut prefs = self.load_app_prefs();
        prefs.insert(
            app_id.to_string(),
            AppLaunchPref {
                auto_launch,
                timestamp: Utc::now().timestamp_millis(),
            },
        );
        self.store.set(keys::APP_PREFS, &prefs);
    }

    /// Forget the decision for one app
    pub fn clear_preference(&self, app_id: &str) {
        let mut prefs = self.load_app_prefs();
        prefs.remove(app_id);
        self.store.set(keys::APP_PREFS, &prefs);
    }

    /// Forget every launch decision
    pub fn clear_all_preferences(&self) {
        self.store.remove(keys::APP_PREFS);
    }
}
