//! Persistence adapters for the to-do list.
//!
//! # Responsibility
//! - Map one storage key to the serialized list of items.
//! - Recover load failures locally so callers always get a list.
//!
//! # Invariants
//! - `save` overwrites the whole slot; there is no merge and no versioning.
//! - A missing slot loads as an empty list, not as an error.
//! - Log lines carry counts and keys only, never item titles.

use crate::config::StorageKey;
use crate::model::todo::TodoItem;
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

mod memory;
mod sqlite;

pub use memory::MemoryTodoStore;
pub use sqlite::SqliteTodoStore;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error raised by a storage adapter.
#[derive(Debug)]
pub enum StoreError {
    /// SQLite failure while opening, reading or writing the slot.
    Sqlite(rusqlite::Error),
    /// Database file was set up by a newer build.
    UnsupportedSchemaVersion { db_version: u32, supported: u32 },
    /// Stored blob could not be parsed, or items could not be encoded.
    Serialization(serde_json::Error),
    /// Storage refused the operation.
    Unavailable(String),
    /// Persistence worker is gone; the request was never executed.
    WorkerStopped,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                supported,
            } => write!(
                f,
                "storage schema version {db_version} is newer than supported {supported}"
            ),
            Self::Serialization(err) => write!(f, "invalid todo list blob: {err}"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
            Self::WorkerStopped => write!(f, "persistence worker stopped"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Unavailable(_) | Self::WorkerStopped => {
                None
            }
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Key-value persistence contract for the whole list.
pub trait TodoStore: Send {
    /// Slot this store reads and writes.
    fn key(&self) -> &StorageKey;
    /// Reads the list stored under `key`; an absent slot yields an empty list.
    fn load(&self) -> StoreResult<Vec<TodoItem>>;
    /// Serializes `items` and overwrites the slot under `key`.
    fn save(&self, items: &[TodoItem]) -> StoreResult<()>;
}

/// Loads the list, substituting an empty list on any failure.
///
/// # Side effects
/// - Emits `todo_load` events; failures are logged, never returned.
pub fn load_or_empty(store: &dyn TodoStore) -> Vec<TodoItem> {
    let started_at = Instant::now();
    match store.load() {
        Ok(items) => {
            info!(
                "event=todo_load module=store status=ok key={} items={} duration_ms={}",
                store.key(),
                items.len(),
                started_at.elapsed().as_millis()
            );
            items
        }
        Err(err) => {
            error!(
                "event=todo_load module=store status=error key={} error_code=load_failed error={err}",
                store.key()
            );
            Vec::new()
        }
    }
}

pub(crate) fn encode_items(items: &[TodoItem]) -> StoreResult<String> {
    Ok(serde_json::to_string(items)?)
}

pub(crate) fn decode_items(blob: &str) -> StoreResult<Vec<TodoItem>> {
    Ok(serde_json::from_str(blob)?)
}
