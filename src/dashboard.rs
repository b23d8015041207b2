//! Dashboard facade - wires the stores, repositories and services together
//!
//! The composition root an application embeds: one small-value store shared
//! by the repositories, one blob store, one transient registry.

use crate::backup::BackupService;
use crate::config;
use crate::repo::{BackgroundRepository, PrefsRepository, ProfileRepository, ShortcutRepository};
use crate::store::{BlobStore, SmallValueStore};
use crate::transient::TransientBlobs;
use crate::Result;
use std::path::Path;
use std::sync::Arc;

/// The assembled persistence core
pub struct Dashboard {
    pub shortcuts: ShortcutRepository,
    pub profile: ProfileRepository,
    pub background: BackgroundRepository,
    pub prefs: PrefsRepository,
    pub backup: BackupService,
    pub transients: Arc<TransientBlobs>,
}

impl Dashboard {
    /// Open the persistence core rooted at a data directory, creating it
    /// if needed
    pub fn open(data_dir: &Path) -> Result<Self> {
        config::ensure_data_dir(data_dir)?;
        let store = Arc::new(SmallValueStore::in_directory(config::kv_dir_in(data_dir)));
        let blobs = Arc::new(BlobStore::open(&config::blob_db_path_in(data_dir))?);
        Ok(Self::assemble(store, blobs))
    }

    /// Fully in-memory core (tests, previews, headless tooling)
    pub fn in_memory() -> Result<Self> {
        let store = Arc::new(SmallValueStore::in_memory());
        let blobs = Arc::new(BlobStore::open_in_memory()?);
        Ok(Self::assemble(store, blobs))
    }

    fn assemble(store: Arc<SmallValueStore>, blobs: Arc<BlobStore>) -> Self {
        let transients = Arc::new(TransientBlobs::new());
        Self {
            shortcuts: ShortcutRepository::new(store.clone()),
            profile: ProfileRepository::new(store.clone()),
            background: BackgroundRepository::new(store.clone(), blobs, transients.clone()),
            prefs: PrefsRepository::new(store.clone()),
            backup: BackupService::new(store),
            transients,
        }
    }
}
