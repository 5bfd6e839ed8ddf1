//! SQLite-backed key-value store.
//!
//! # Invariants
//! - One row per storage key in `kv_entries`.
//! - Save is a single upsert statement; readers see the old or the new blob.

use super::{decode_items, encode_items, StoreResult, TodoStore};
use crate::config::StorageKey;
use crate::db::{open_db, open_db_in_memory};
use crate::model::todo::TodoItem;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

/// `TodoStore` over a migrated SQLite connection.
pub struct SqliteTodoStore {
    conn: Connection,
    key: StorageKey,
}

impl SqliteTodoStore {
    /// Wraps a connection that already went through `open_db*`.
    pub fn new(conn: Connection, key: StorageKey) -> Self {
        Self { conn, key }
    }

    /// Opens the database file at `path` (creating it when missing).
    pub fn open(path: impl AsRef<Path>, key: StorageKey) -> StoreResult<Self> {
        Ok(Self::new(open_db(path)?, key))
    }

    pub fn open_in_memory(key: StorageKey) -> StoreResult<Self> {
        Ok(Self::new(open_db_in_memory()?, key))
    }

    fn read_blob(&self) -> StoreResult<Option<String>> {
        let blob = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [self.key.as_str()],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(blob)
    }
}

impl TodoStore for SqliteTodoStore {
    fn key(&self) -> &StorageKey {
        &self.key
    }

    fn load(&self) -> StoreResult<Vec<TodoItem>> {
        match self.read_blob()? {
            Some(blob) => decode_items(&blob),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[TodoItem]) -> StoreResult<()> {
        let blob = encode_items(items)?;
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![self.key.as_str(), blob],
        )?;
        Ok(())
    }
}
