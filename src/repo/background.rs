//! Background repository - dual-tier persistence with blob offloading
//!
//! Small configs (color/gradient) live in both tiers; media payloads are
//! offloaded to the blob tier and the persisted config carries the
//! `blob:stored` sentinel in `value`. Write ordering is payload first,
//! sentinel-substituted config after, so an interruption between the two
//! leaves the sentinel unpersisted rather than pointing at a missing blob.

use super::keys;
use crate::background::{BackgroundConfig, STORED_SENTINEL};
use crate::store::{BlobStore, SmallValueStore};
use crate::transient::{self, TransientBlobs};
use crate::{Error, Result};
use std::sync::Arc;

/// Dual-tier load/save/reset of the background config
pub struct BackgroundRepository {
    store: Arc<SmallValueStore>,
    blobs: Arc<BlobStore>,
    transients: Arc<TransientBlobs>,
}

impl BackgroundRepository {
    pub fn new(
        store: Arc<SmallValueStore>,
        blobs: Arc<BlobStore>,
        transients: Arc<TransientBlobs>,
    ) -> Self {
        Self {
            store,
            blobs,
            transients,
        }
    }

    /// Persist a background config.
    ///
    /// A transient `value` is resolved to its payload and offloaded; a
    /// plain value goes to both tiers directly and evicts any stale
    /// payload. Failures are logged and leave the prior stored value
    /// intact; they are never surfaced to the caller.
    pub async fn save(&self, config: &BackgroundConfig) {
        let result = if transient::is_transient_reference(&config.value) {
            self.offload_transient(config).await
        } else {
            self.persist_plain(config).await
        };

        if let Err(e) = result {
            tracing::error!("Saving background failed: {}", e);
        }
    }

    async fn offload_transient(&self, config: &BackgroundConfig) -> Result<()> {
        let payload = self
            .transients
            .resolve(&config.value)
            .ok_or_else(|| Error::UnresolvedReference(config.value.clone()))?;

        // payload must be durable before any config carries the sentinel
        self.blobs.set_item(keys::BACKGROUND_PAYLOAD, &payload).await?;

        let stored = BackgroundConfig {
            value: STORED_SENTINEL.to_string(),
            ..config.clone()
        };
        self.blobs.set_json(keys::BACKGROUND, &stored).await?;
        self.store.set(keys::BACKGROUND, &stored);
        Ok(())
    }

    async fn persist_plain(&self, config: &BackgroundConfig) -> Result<()> {
        self.store.set(keys::BACKGROUND, config);
        self.blobs.set_json(keys::BACKGROUND, config).await?;
        // switching to a lightweight background must not leave an orphaned
        // payload behind
        self.blobs.delete_item(keys::BACKGROUND_PAYLOAD).await?;
        Ok(())
    }

    /// Load the background config.
    ///
    /// The blob tier is the primary source; the small-value tier covers
    /// installations that predate it. A sentinel `value` is re-materialized
    /// as a fresh transient reference; a missing payload despite the
    /// sentinel falls back to the default config.
    pub async fn load(&self) -> BackgroundConfig {
        match self.try_load().await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Loading background failed: {}", e);
                BackgroundConfig::default()
            }
        }
    }

    async fn try_load(&self) -> Result<BackgroundConfig> {
        let mut config = self.blobs.get_json::<BackgroundConfig>(keys::BACKGROUND).await?;
        if config.is_none() {
            config = self.store.get_opt(keys::BACKGROUND);
        }
        let Some(config) = config else {
            return Ok(BackgroundConfig::default());
        };

        if config.value != STORED_SENTINEL {
            return Ok(config);
        }

        match self.blobs.get_item(keys::BACKGROUND_PAYLOAD).await? {
            Some(payload) => Ok(BackgroundConfig {
                value: self.transients.insert(payload),
                ..config
            }),
            None => {
                tracing::warn!("Background payload missing despite sentinel; using default");
                Ok(BackgroundConfig::default())
            }
        }
    }

    /// Overwrite with the default config and return it
    pub async fn reset(&self) -> BackgroundConfig {
        let defaults = BackgroundConfig::default();
        self.save(&defaults).await;
        defaults
    }
}
