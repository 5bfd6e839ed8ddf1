use rusqlite::Connection;
use todo_core::db::schema::{ensure_kv_schema, stored_schema_version, KV_SCHEMA_VERSION};
use todo_core::db::{open_db, open_db_in_memory};
use todo_core::StoreError;

#[test]
fn open_db_in_memory_creates_kv_table() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(stored_schema_version(&conn).unwrap(), KV_SCHEMA_VERSION);
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_entries'
            );",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn reopening_file_keeps_existing_slots() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO kv_entries (key, value) VALUES ('k', '[]');", [])
        .unwrap();
    drop(conn_first);

    let mut conn_second = open_db(&path).unwrap();
    ensure_kv_schema(&mut conn_second).unwrap();
    let rows: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn fresh_connection_is_stamped_once() {
    let mut conn = Connection::open_in_memory().unwrap();
    assert_eq!(stored_schema_version(&conn).unwrap(), 0);

    ensure_kv_schema(&mut conn).unwrap();
    ensure_kv_schema(&mut conn).unwrap();
    assert_eq!(stored_schema_version(&conn).unwrap(), KV_SCHEMA_VERSION);
}

#[test]
fn file_from_newer_build_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StoreError::UnsupportedSchemaVersion {
            db_version,
            supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(supported, KV_SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}
