//! `kv_entries` table setup.
//!
//! # Invariants
//! - `user_version = 0` means a fresh file: the table is created and the
//!   version stamped in one transaction.
//! - A file stamped by a newer binary is refused, never rewritten.

use crate::store::{StoreError, StoreResult};
use log::info;
use rusqlite::Connection;

/// Layout version written to `PRAGMA user_version`.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_ENTRIES_SQL: &str = include_str!("kv_entries.sql");

/// Makes sure `conn` holds a `kv_entries` table this binary understands.
///
/// # Errors
/// - `StoreError::UnsupportedSchemaVersion` for files from a newer build.
/// - `StoreError::Sqlite` when the table cannot be created.
pub fn ensure_kv_schema(conn: &mut Connection) -> StoreResult<()> {
    match stored_schema_version(conn)? {
        KV_SCHEMA_VERSION => Ok(()),
        0 => {
            let tx = conn.transaction()?;
            tx.execute_batch(KV_ENTRIES_SQL)?;
            tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)?;
            tx.commit()?;
            info!("event=kv_schema module=db status=created version={KV_SCHEMA_VERSION}");
            Ok(())
        }
        newer => Err(StoreError::UnsupportedSchemaVersion {
            db_version: newer,
            supported: KV_SCHEMA_VERSION,
        }),
    }
}

/// Version stamped on the open file; `0` for a file never set up.
pub fn stored_schema_version(conn: &Connection) -> StoreResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}
