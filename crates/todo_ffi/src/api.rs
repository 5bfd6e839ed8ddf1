//! FFI use-case API for the to-do list screen.
//!
//! # Responsibility
//! - Expose list operations to Dart via FRB as plain functions.
//! - Own the process-wide `ListController` behind a mutex.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - The controller is opened lazily at the default path when the host did
//!   not call `todo_open` first.

use log::{info, warn};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};
use todo_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    ListController, TodoConfig, TodoItem,
};

const TODO_DB_FILE_NAME: &str = "todo.sqlite3";
const TODO_DB_PATH_ENV: &str = "TODO_DB_PATH";

static CONTROLLER: Mutex<Option<ListController>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItemView {
    pub index: u64,
    pub title: String,
    pub done: bool,
    /// Stable list key for the UI (`todo_<index>`).
    pub key: String,
}

/// Result envelope for list mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    /// Whether the operation changed the list.
    pub ok: bool,
    /// Index of the affected item.
    pub index: Option<u64>,
    /// Human-readable message for diagnostics.
    pub message: String,
}

impl TodoActionResponse {
    fn success(message: impl Into<String>, index: u64) -> Self {
        Self {
            ok: true,
            index: Some(index),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            index: None,
            message: message.into(),
        }
    }
}

/// Opens (or reopens) the list stored in `db_dir`.
///
/// Pending saves of a previously opened list are flushed first.
///
/// # FFI contract
/// - `db_dir` must be an absolute directory path; it is created if missing.
/// - Returns `ok=false` with a message on invalid input.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_open(db_dir: String) -> TodoActionResponse {
    let dir = PathBuf::from(db_dir.trim());
    if dir.as_os_str().is_empty() || !dir.is_absolute() {
        return TodoActionResponse::failure(format!(
            "todo_open failed: db_dir must be an absolute path, got `{db_dir}`"
        ));
    }
    if let Err(err) = std::fs::create_dir_all(&dir) {
        return TodoActionResponse::failure(format!("todo_open failed: {err}"));
    }

    let mut guard = CONTROLLER.lock();
    // Drop the old controller first so its queue drains before reopening.
    guard.take();
    match open_controller(&dir.join(TODO_DB_FILE_NAME)) {
        Ok(controller) => {
            let current = controller.current_index();
            *guard = Some(controller);
            TodoActionResponse::success("List opened.", current)
        }
        Err(message) => TodoActionResponse::failure(message),
    }
}

/// Adds an item; empty titles are rejected.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(title: String) -> TodoActionResponse {
    with_controller(|controller| match controller.add(&title) {
        Some(index) => TodoActionResponse::success("Item added.", index),
        None => TodoActionResponse::failure("Title is empty."),
    })
    .unwrap_or_else(|message| TodoActionResponse::failure(format!("todo_add failed: {message}")))
}

/// Flips the completion flag of the item with `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(index: u64) -> TodoActionResponse {
    with_controller(|controller| match controller.toggle(index) {
        Some(true) => TodoActionResponse::success("Item done.", index),
        Some(false) => TodoActionResponse::success("Item reopened.", index),
        None => TodoActionResponse::failure(format!("No item with index {index}.")),
    })
    .unwrap_or_else(|message| {
        TodoActionResponse::failure(format!("todo_toggle failed: {message}"))
    })
}

/// Deletes the item with `index`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_delete(index: u64) -> TodoActionResponse {
    with_controller(|controller| match controller.delete(index) {
        Some(_) => TodoActionResponse::success("Item deleted.", index),
        None => TodoActionResponse::failure(format!("No item with index {index}.")),
    })
    .unwrap_or_else(|message| {
        TodoActionResponse::failure(format!("todo_delete failed: {message}"))
    })
}

/// Replaces the pending input text.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_set_input(text: String) {
    let _ = with_controller(|controller| controller.set_input_text(text));
}

/// Adds the pending input text as an item.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_submit_input() -> TodoActionResponse {
    with_controller(|controller| match controller.submit_input() {
        Some(index) => TodoActionResponse::success("Item added.", index),
        None => TodoActionResponse::failure("Title is empty."),
    })
    .unwrap_or_else(|message| {
        TodoActionResponse::failure(format!("todo_submit_input failed: {message}"))
    })
}

/// Replaces the filter text applied by `todo_visible_items`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_set_filter(text: String) {
    let _ = with_controller(|controller| controller.set_filter(text));
}

/// Rows to render under the current filter, in list order.
///
/// Returns an empty list when no controller could be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_visible_items() -> Vec<TodoItemView> {
    with_controller(|controller| {
        controller
            .visible_items()
            .into_iter()
            .map(to_item_view)
            .collect()
    })
    .unwrap_or_default()
}

fn with_controller<T>(f: impl FnOnce(&mut ListController) -> T) -> Result<T, String> {
    let mut guard = CONTROLLER.lock();
    if guard.is_none() {
        *guard = Some(open_controller(&resolve_default_db_path())?);
    }
    match guard.as_mut() {
        Some(controller) => Ok(f(controller)),
        None => Err("list is not open".to_string()),
    }
}

fn open_controller(db_path: &Path) -> Result<ListController, String> {
    match ListController::open_file(db_path, &TodoConfig::default()) {
        Ok(controller) => {
            info!(
                "event=ffi_open module=ffi status=ok items={}",
                controller.items().len()
            );
            Ok(controller)
        }
        Err(err) => {
            warn!("event=ffi_open module=ffi status=error error={err}");
            Err(err.to_string())
        }
    }
}

fn resolve_default_db_path() -> PathBuf {
    if let Ok(raw) = std::env::var(TODO_DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    std::env::temp_dir().join(TODO_DB_FILE_NAME)
}

fn to_item_view(item: TodoItem) -> TodoItemView {
    TodoItemView {
        key: format!("todo_{}", item.index),
        index: item.index,
        title: item.title,
        done: item.done,
    }
}
