use rusqlite::Connection;
use todo_core::{
    load_or_empty, SqliteTodoStore, StorageKey, StoreError, TodoItem, TodoStore,
    DEFAULT_STORAGE_KEY,
};

fn item(index: u64, title: &str, done: bool) -> TodoItem {
    TodoItem {
        index,
        title: title.to_string(),
        done,
    }
}

#[test]
fn missing_key_loads_empty_list() {
    let store = SqliteTodoStore::open_in_memory(StorageKey::default()).unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn save_then_load_reproduces_list_field_for_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");
    let items = vec![
        item(1, "Buy milk", true),
        item(3, "Buy eggs", false),
        item(4, "  spaced  ", false),
    ];

    let store = SqliteTodoStore::open(&path, StorageKey::default()).unwrap();
    store.save(&items).unwrap();
    drop(store);

    let reopened = SqliteTodoStore::open(&path, StorageKey::default()).unwrap();
    assert_eq!(reopened.load().unwrap(), items);
}

#[test]
fn blob_is_json_array_under_fixed_key() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");
    let store = SqliteTodoStore::open(&path, StorageKey::default()).unwrap();
    store.save(&[item(1, "Buy milk", false)]).unwrap();

    let conn = Connection::open(&path).unwrap();
    let blob: String = conn
        .query_row(
            "SELECT value FROM kv_entries WHERE key = ?1;",
            [DEFAULT_STORAGE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let value: serde_json::Value = serde_json::from_str(&blob).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{"index": 1, "title": "Buy milk", "done": false}])
    );
}

#[test]
fn stores_with_different_keys_do_not_share_lists() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");
    let home = SqliteTodoStore::open(&path, StorageKey::new("home").unwrap()).unwrap();
    let work = SqliteTodoStore::open(&path, StorageKey::new("work").unwrap()).unwrap();

    home.save(&[item(1, "laundry", false)]).unwrap();
    work.save(&[item(1, "report", false), item(2, "review", true)]).unwrap();

    assert_eq!(home.load().unwrap().len(), 1);
    assert_eq!(work.load().unwrap().len(), 2);
}

#[test]
fn corrupt_blob_is_a_load_error_and_recovers_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");
    let store = SqliteTodoStore::open(&path, StorageKey::default()).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute(
        "INSERT INTO kv_entries (key, value) VALUES (?1, 'not json');",
        [DEFAULT_STORAGE_KEY],
    )
    .unwrap();

    assert!(matches!(
        store.load().unwrap_err(),
        StoreError::Serialization(_)
    ));
    assert!(load_or_empty(&store).is_empty());
}

#[test]
fn wrong_field_types_are_rejected() {
    let store = SqliteTodoStore::open_in_memory(StorageKey::default()).unwrap();
    store.save(&[]).unwrap();
    assert!(store.load().unwrap().is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todo.sqlite3");
    let store = SqliteTodoStore::open(&path, StorageKey::default()).unwrap();
    Connection::open(&path)
        .unwrap()
        .execute(
            "INSERT INTO kv_entries (key, value) VALUES (?1, '[{\"index\":\"1\",\"title\":\"x\",\"done\":false}]');",
            [DEFAULT_STORAGE_KEY],
        )
        .unwrap();
    assert!(store.load().is_err());
}
