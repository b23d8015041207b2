//! Blob tier - asynchronous key/value store over SQLite
//!
//! Holds opaque binary payloads (background images and video) plus a JSON
//! mirror of the background config. One table, one transaction per call;
//! a mutex-guarded connection serializes concurrent callers.

use crate::Result;
use rusqlite::{params, Connection, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;
use tokio::sync::Mutex;

/// Schema version stamped into `PRAGMA user_version`
const SCHEMA_VERSION: i64 = 1;

/// SQL to create the entries object store
const CREATE_ENTRIES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS entries (
    key TEXT PRIMARY KEY,
    value BLOB NOT NULL
)
"#;

/// SQLite-backed store for binary payloads
pub struct BlobStore {
    conn: Mutex<Connection>,
}

impl BlobStore {
    /// Open a database file (creates if doesn't exist). Idempotent:
    /// re-opening an existing database keeps its entries and only applies
    /// schema statements when the stamped version is behind.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<()> {
        let version: i64 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
        if version < SCHEMA_VERSION {
            conn.execute(CREATE_ENTRIES_TABLE, [])?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        }
        Ok(())
    }

    /// Insert or replace a payload
    pub async fn set_item(&self, key: &str, value: &[u8]) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO entries (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }

    /// Get a payload; a missing key is `None`, not an error
    pub async fn get_item(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock().await;
        conn.query_row("SELECT value FROM entries WHERE key = ?1", [key], |row| {
            row.get(0)
        })
        .optional()
        .map_err(Into::into)
    }

    /// Delete a payload; deleting a missing key is a no-op
    pub async fn delete_item(&self, key: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute("DELETE FROM entries WHERE key = ?1", [key])?;
        Ok(())
    }

    /// Store a value serialized as a JSON payload
    pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_vec(value)?;
        self.set_item(key, &raw).await
    }

    /// Get a JSON payload deserialized into `T`
    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_item(key).await? {
            Some(raw) => Ok(Some(serde_json::from_slice(&raw)?)),
            None => Ok(None),
        }
    }

    /// Count stored entries
    pub async fn count(&self) -> Result<usize> {
        let conn = self.conn.lock().await;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
