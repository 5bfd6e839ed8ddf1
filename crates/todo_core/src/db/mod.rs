//! SQLite bootstrap for the key-value slots behind `SqliteTodoStore`.
//!
//! # Responsibility
//! - Open file or in-memory connections.
//! - Create the `kv_entries` table before a connection is handed out.
//!
//! # Invariants
//! - The table layout is versioned through `PRAGMA user_version`; the list
//!   blob stored in it is not.

mod open;
pub mod schema;

pub use open::{open_db, open_db_in_memory};
