//! Core logic for the to-do list screen.
//! The UI binds to `ListController`; storage sits behind `TodoStore`.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use config::{ConfigError, StorageKey, TodoConfig, DEFAULT_STORAGE_KEY};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::todo::{ListState, TodoIndex, TodoItem};
pub use service::list_controller::ListController;
pub use service::save_queue::{PersistenceWorker, SaveTicket};
pub use store::{
    load_or_empty, MemoryTodoStore, SqliteTodoStore, StoreError, StoreResult, TodoStore,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
