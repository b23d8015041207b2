//! Storage tiers
//!
//! Two persistence tiers with deliberately different contracts:
//! - `small`: synchronous JSON documents over a size-limited string medium
//!   (shortcuts, profile, flags, lightweight background configs)
//! - `blob`: asynchronous SQLite-backed key/value store for opaque binary
//!   payloads the string tier cannot hold (background images and video)

pub mod blob;
pub mod small;

pub use blob::BlobStore;
pub use small::{FileMedium, MemoryMedium, NullMedium, SmallValueStore, StringMedium};
