//! # Homeboard - Start-page dashboard persistence core
//!
//! Client-side persistence and data-reconciliation layer for a personalized
//! start-page dashboard.
//!
//! Homeboard provides:
//! - The shortcut / profile / background data model with default seed data
//! - A synchronous JSON key/value tier over pluggable string media
//! - An asynchronous SQLite-backed blob tier for large media payloads
//! - Repositories with write-through persistence and legacy-format migration
//! - Backup, lenient import, and reset-to-defaults on top

pub mod shortcut;
pub mod profile;
pub mod background;
pub mod validate;
pub mod transient;
pub mod store;
pub mod repo;
pub mod backup;
pub mod config;
pub mod dashboard;

// Re-exports for convenient access
pub use shortcut::{Shortcut, ShortcutKind};
pub use profile::{AvatarConfig, MediaType, Profile};
pub use background::{BackgroundConfig, BackgroundKind};
pub use store::{BlobStore, SmallValueStore};
pub use transient::TransientBlobs;
pub use dashboard::Dashboard;

/// Result type alias for homeboard operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for homeboard operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage medium unavailable: {0}")]
    Unavailable(String),

    #[error("Value for key '{key}' is {size} bytes, over the {limit} byte ceiling")]
    ValueTooLarge {
        key: String,
        size: usize,
        limit: usize,
    },

    #[error("Unresolved transient reference: {0}")]
    UnresolvedReference(String),

    #[error("Invalid shortcut: {0}")]
    InvalidShortcut(String),

    #[error("Invalid media: {0}")]
    InvalidMedia(String),
}
