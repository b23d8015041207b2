//! Backup, lenient import, and reset-to-defaults
//!
//! Export composes one pretty-printed JSON document from the repositories.
//! Import applies recognized fields independently: a field that is absent
//! or of the wrong type is skipped, not a reason to abort, and the caller
//! only learns whether the document parsed at all.

use crate::repo::{keys, PrefsRepository, ProfileRepository, ShortcutRepository};
use crate::shortcut::{self, Shortcut};
use crate::profile::Profile;
use crate::store::SmallValueStore;
use crate::Result;
use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The exported backup document
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    pub shortcuts: Vec<Shortcut>,
    pub profile: Profile,
    pub focus_mode: bool,
    /// ISO-8601 export timestamp
    pub exported_at: String,
}

/// Outcome of checking one import field. Makes the lenient per-field rules
/// inspectable instead of ad-hoc shape tests.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldCheck {
    /// Present and of the expected type; applied as-is
    Valid(Value),
    /// Present but of the wrong type; skipped
    Invalid { reason: &'static str },
    /// Not present; skipped
    Missing,
}

/// Check that `field` holds an array
pub fn check_array(root: &Value, field: &str) -> FieldCheck {
    match root.get(field) {
        None => FieldCheck::Missing,
        Some(value) if value.is_array() => FieldCheck::Valid(value.clone()),
        Some(_) => FieldCheck::Invalid {
            reason: "expected an array",
        },
    }
}

/// Check that `field` holds an object
pub fn check_object(root: &Value, field: &str) -> FieldCheck {
    match root.get(field) {
        None => FieldCheck::Missing,
        Some(value) if value.is_object() => FieldCheck::Valid(value.clone()),
        Some(_) => FieldCheck::Invalid {
            reason: "expected an object",
        },
    }
}

/// Check that `field` holds a boolean
pub fn check_bool(root: &Value, field: &str) -> FieldCheck {
    match root.get(field) {
        None => FieldCheck::Missing,
        Some(value) if value.is_boolean() => FieldCheck::Valid(value.clone()),
        Some(_) => FieldCheck::Invalid {
            reason: "expected a boolean",
        },
    }
}

/// Serializes the repositories into one backup document and restores them
/// from one
pub struct BackupService {
    store: Arc<SmallValueStore>,
    shortcuts: ShortcutRepository,
    profile: ProfileRepository,
    prefs: PrefsRepository,
}

impl BackupService {
    pub fn new(store: Arc<SmallValueStore>) -> Self {
        Self {
            shortcuts: ShortcutRepository::new(store.clone()),
            profile: ProfileRepository::new(store.clone()),
            prefs: PrefsRepository::new(store.clone()),
            store,
        }
    }

    /// Export shortcuts, profile and focus mode as pretty-printed JSON,
    /// seeding defaults where nothing is stored
    pub fn export_all(&self) -> String {
        let document = ExportDocument {
            shortcuts: self
                .shortcuts
                .load()
                .unwrap_or_else(shortcut::default_shortcuts),
            profile: self.profile.load(),
            focus_mode: self.prefs.load_focus_mode(),
            exported_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        match serde_json::to_string_pretty(&document) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("Exporting failed: {}", e);
                String::from("{}")
            }
        }
    }

    /// Restore from a backup document.
    ///
    /// Returns `false` on unparseable JSON or a non-object root, with no
    /// side effects. Otherwise each recognized field is validated and
    /// applied independently; unrecognized or ill-typed fields are skipped.
    /// Returns `true` whenever the document parsed, regardless of how many
    /// fields were applied.
    pub fn import_all(&self, json_text: &str) -> bool {
        let root: Value = match serde_json::from_str(json_text) {
            Ok(root) => root,
            Err(e) => {
                tracing::warn!("Import rejected, not JSON: {}", e);
                return false;
            }
        };
        if !root.is_object() {
            tracing::warn!("Import rejected, root is not an object");
            return false;
        }

        self.apply_field(&root, "shortcuts", keys::SHORTCUTS, check_array);
        self.apply_field(&root, "profile", keys::PROFILE, check_object);
        self.apply_field(&root, "focusMode", keys::FOCUS_MODE, check_bool);

        true
    }

    fn apply_field(
        &self,
        root: &Value,
        field: &str,
        key: &str,
        check: fn(&Value, &str) -> FieldCheck,
    ) {
        match check(root, field) {
            FieldCheck::Valid(value) => self.store.set(key, &value),
            FieldCheck::Invalid { reason } => {
                tracing::warn!("Import field '{}' skipped: {}", field, reason);
            }
            FieldCheck::Missing => {}
        }
    }

    /// Reset shortcuts, profile and focus mode to defaults.
    ///
    /// The background config and app-launch preferences are left as they
    /// are; see DESIGN.md for the reasoning behind this scope.
    pub fn reset_all(&self) {
        self.shortcuts.reset();
        self.profile.reset();
        self.prefs.save_focus_mode(false);
    }

    /// Write the export document into `dir` under the dated file name and
    /// return the path
    pub fn export_to_file(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(export_file_name(Utc::now().date_naive()));
        fs::write(&path, self.export_all())?;
        Ok(path)
    }
}

/// Download file name convention: `dashboard-backup-YYYY-MM-DD.json`
pub fn export_file_name(date: NaiveDate) -> String {
    format!("dashboard-backup-{}.json", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::AvatarConfig;
    use serde_json::json;

    fn service() -> (Arc<SmallValueStore>, BackupService) {
        let store = Arc::new(SmallValueStore::in_memory());
        (store.clone(), BackupService::new(store))
    }

    #[test]
    fn test_export_shape_and_roundtrip() {
        let (_, service) = service();

        let exported = service.export_all();
        let root: Value = serde_json::from_str(&exported).unwrap();
        assert!(root["shortcuts"].is_array());
        assert!(root["profile"].is_object());
        assert_eq!(root["focusMode"], false);
        assert!(root["exportedAt"].as_str().unwrap().contains('T'));

        // an export is importable as-is
        assert!(service.import_all(&exported));
    }

    #[test]
    fn test_export_seeds_defaults_when_empty() {
        let (_, service) = service();
        let root: Value = serde_json::from_str(&service.export_all()).unwrap();
        assert_eq!(root["shortcuts"].as_array().unwrap().len(), 13);
    }

    #[test]
    fn test_import_applies_recognized_fields() {
        let (store, service) = service();

        let document = json!({
            "shortcuts": [],
            "profile": { "name": "Ada", "bio": "", "avatar": { "mode": "url", "url": "/a.png", "mediaType": "image" } },
            "focusMode": true
        });
        assert!(service.import_all(&document.to_string()));

        assert_eq!(
            store.get_opt::<Vec<Shortcut>>(keys::SHORTCUTS),
            Some(Vec::new())
        );
        assert!(store.get(keys::FOCUS_MODE, false));
        assert_eq!(service.profile.load().name, "Ada");
    }

    #[test]
    fn test_import_tolerates_unknown_and_ill_typed_fields() {
        let (store, service) = service();

        let document = json!({
            "shortcuts": [ { "anything": "goes" } ],
            "profile": "not an object",
            "garbageField": 123
        });
        assert!(service.import_all(&document.to_string()));

        // the array was saved as-is, without per-item schema validation
        let raw = store.get_opt::<Value>(keys::SHORTCUTS).unwrap();
        assert_eq!(raw, json!([ { "anything": "goes" } ]));
        // the ill-typed profile was skipped, not applied
        assert_eq!(store.get_opt::<Value>(keys::PROFILE), None);
    }

    #[test]
    fn test_import_rejects_non_json_without_side_effects() {
        let (store, service) = service();

        assert!(!service.import_all("not json"));
        assert!(!service.import_all("[1, 2, 3]"));
        assert!(!service.import_all("\"a string\""));

        assert_eq!(store.get_opt::<Value>(keys::SHORTCUTS), None);
        assert_eq!(store.get_opt::<Value>(keys::PROFILE), None);
        assert_eq!(store.get_opt::<Value>(keys::FOCUS_MODE), None);
    }

    #[test]
    fn test_field_checks() {
        let root = json!({ "a": [1], "o": {}, "b": true, "s": "x" });

        assert!(matches!(check_array(&root, "a"), FieldCheck::Valid(_)));
        assert!(matches!(check_object(&root, "o"), FieldCheck::Valid(_)));
        assert!(matches!(check_bool(&root, "b"), FieldCheck::Valid(_)));

        assert!(matches!(check_array(&root, "s"), FieldCheck::Invalid { .. }));
        assert!(matches!(check_bool(&root, "o"), FieldCheck::Invalid { .. }));
        assert_eq!(check_array(&root, "nope"), FieldCheck::Missing);
    }

    #[test]
    fn test_reset_all_scope() {
        let (store, service) = service();

        service.shortcuts.save(&[]);
        service.profile.save(&crate::profile::Profile {
            name: "Someone".into(),
            bio: String::new(),
            avatar: AvatarConfig::Url {
                url: "/x.png".into(),
                media_type: crate::profile::MediaType::Image,
            },
        });
        service.prefs.save_focus_mode(true);
        service.prefs.set_auto_launch("discord", true);
        store.set(keys::BACKGROUND, &json!({ "type": "color", "value": "#000", "blur": 0, "dim": 0 }));

        service.reset_all();

        assert_eq!(service.shortcuts.load().unwrap().len(), 13);
        assert_eq!(service.profile.load(), Profile::default());
        assert!(!service.prefs.load_focus_mode());
        // background and app-launch preferences are out of reset_all's scope
        assert!(store.get_opt::<Value>(keys::BACKGROUND).is_some());
        assert!(service.prefs.should_auto_launch("discord"));
    }

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 8, 6).unwrap();
        assert_eq!(export_file_name(date), "dashboard-backup-2026-08-06.json");
    }

    #[test]
    fn test_export_to_file() {
        let (_, service) = service();
        let dir = tempfile::tempdir().unwrap();

        let path = service.export_to_file(dir.path()).unwrap();
        assert!(path.file_name().unwrap().to_string_lossy().ends_with(".json"));

        let written = fs::read_to_string(path).unwrap();
        assert!(service.import_all(&written));
    }
}
