//! Profile repository - load/save/reset with legacy-format migration
//!
//! First-generation records stored a bare `avatarUrl` string instead of the
//! structured `avatar` object. `load` detects that shape, upgrades it, and
//! persists the result immediately, so the migration runs at most once per
//! record.

use super::keys;
use crate::profile::{AvatarConfig, MediaType, Profile};
use crate::store::SmallValueStore;
use serde_json::Value;
use std::sync::Arc;

/// Load/save/reset of the single profile record
pub struct ProfileRepository {
    store: Arc<SmallValueStore>,
}

impl ProfileRepository {
    pub fn new(store: Arc<SmallValueStore>) -> Self {
        Self { store }
    }

    /// Load the profile; always returns a usable record, falling back to
    /// defaults on missing or corrupt data
    pub fn load(&self) -> Profile {
        let Some(stored) = self.store.get_opt::<Value>(keys::PROFILE) else {
            return Profile::default();
        };

        if let Some(migrated) = self.migrate_legacy(&stored) {
            self.save(&migrated);
            return migrated;
        }

        match serde_json::from_value(stored) {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!("Stored profile is unusable: {}", e);
                Profile::default()
            }
        }
    }

    /// Detect the first-generation shape: a top-level `avatarUrl` string
    /// and no structured `avatar` object
    fn migrate_legacy(&self, stored: &Value) -> Option<Profile> {
        let avatar_url = stored.get("avatarUrl")?.as_str()?;
        if stored.get("avatar").is_some() {
            return None;
        }

        let defaults = Profile::default();
        Some(Profile {
            name: field_or(stored, "name", defaults.name),
            bio: field_or(stored, "bio", defaults.bio),
            avatar: AvatarConfig::Url {
                url: avatar_url.to_string(),
                media_type: MediaType::Image,
            },
        })
    }

    pub fn save(&self, profile: &Profile) {
        self.store.set(keys::PROFILE, profile);
    }

    /// Overwrite with the default profile and return it
    pub fn reset(&self) -> Profile {
        let defaults = Profile::default();
        self.save(&defaults);
        defaults
    }
}

fn field_or(stored: &Value, field: &str, default: String) -> String {
    stored
        .get(field)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn repo() -> (Arc<SmallValueStore>, ProfileRepository) {
        let store = Arc::new(SmallValueStore::in_memory());
        (store.clone(), ProfileRepository::new(store))
    }

    #[test]
    fn test_load_defaults_when_empty() {
        let (_, repo) = repo();
        assert_eq!(repo.load(), Profile::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let (_, repo) = repo();

        let profile = Profile {
            name: "Ada".into(),
            bio: "Engineer".into(),
            avatar: AvatarConfig::File {
                file_data_url: "data:image/png;base64,AAAA".into(),
                media_type: MediaType::Image,
            },
        };
        repo.save(&profile);

        assert_eq!(repo.load(), profile);
    }

    #[test]
    fn test_legacy_record_migrates_once() {
        let (store, repo) = repo();
        store.set(
            keys::PROFILE,
            &json!({
                "name": "Ada",
                "bio": "Engineer",
                "avatarUrl": "https://example.com/ada.png"
            }),
        );

        let migrated = repo.load();
        assert_eq!(migrated.name, "Ada");
        assert_eq!(
            migrated.avatar,
            AvatarConfig::Url {
                url: "https://example.com/ada.png".into(),
                media_type: MediaType::Image,
            }
        );

        // the migrated record was persisted: the stored document now carries
        // the structured avatar and a second load is a plain deserialize
        let stored = store.get_opt::<Value>(keys::PROFILE).unwrap();
        assert!(stored.get("avatarUrl").is_none());
        assert_eq!(stored["avatar"]["mode"], "url");
        assert_eq!(repo.load(), migrated);
    }

    #[test]
    fn test_legacy_record_with_missing_fields_takes_defaults() {
        let (store, repo) = repo();
        store.set(keys::PROFILE, &json!({ "avatarUrl": "/me.gif" }));

        let migrated = repo.load();
        assert_eq!(migrated.name, Profile::default().name);
        assert_eq!(migrated.bio, Profile::default().bio);
    }

    #[test]
    fn test_structured_record_is_not_remigrated() {
        let (store, repo) = repo();

        // both fields present: the structured avatar wins
        store.set(
            keys::PROFILE,
            &json!({
                "name": "Ada",
                "bio": "",
                "avatarUrl": "https://old.example/a.png",
                "avatar": { "mode": "url", "url": "https://new.example/b.png", "mediaType": "image" }
            }),
        );

        match repo.load().avatar {
            AvatarConfig::Url { url, .. } => assert_eq!(url, "https://new.example/b.png"),
            other => panic!("unexpected avatar: {:?}", other),
        }
    }

    #[test]
    fn test_corrupt_record_falls_back_to_defaults() {
        let (store, repo) = repo();
        store.set(keys::PROFILE, &json!({ "name": 17, "avatar": [] }));

        assert_eq!(repo.load(), Profile::default());
    }

    #[test]
    fn test_reset() {
        let (_, repo) = repo();
        repo.save(&Profile {
            name: "Someone".into(),
            ..Profile::default()
        });

        assert_eq!(repo.reset(), Profile::default());
        assert_eq!(repo.load(), Profile::default());
    }
}
