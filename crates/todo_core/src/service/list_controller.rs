//! To-do list controller.
//!
//! # Responsibility
//! - Own list state, the index counter, pending input and filter text.
//! - Apply add/toggle/delete synchronously, then queue a full-list save.
//! - Produce the filtered render sequence.
//!
//! # Invariants
//! - Memory is the source of truth; storage is a best-effort mirror.
//! - Toggle and delete address items by `index`, never by position.
//! - Unknown indices and empty titles are no-ops: no save, no error.
//! - `set_filter` and `set_input_text` never touch storage.

use crate::config::TodoConfig;
use crate::model::todo::{ListState, TodoIndex, TodoItem};
use crate::service::save_queue::{PersistenceWorker, SaveTicket};
use crate::store::{MemoryTodoStore, SqliteTodoStore, StoreResult, TodoStore};
use log::{debug, error, info, warn};
use std::path::Path;

/// In-memory owner of the to-do list, mirrored to a `TodoStore`.
pub struct ListController {
    state: ListState,
    worker: PersistenceWorker,
    last_save: Option<SaveTicket>,
}

impl ListController {
    /// Starts the persistence worker over `store` and loads the saved list.
    ///
    /// A missing or unreadable list starts the controller empty.
    ///
    /// # Errors
    /// - Returns an error only when the worker thread cannot be started.
    pub fn open<S>(store: S, config: &TodoConfig) -> StoreResult<Self>
    where
        S: TodoStore + 'static,
    {
        let worker = PersistenceWorker::spawn(store, config)?;
        let state = ListState::from_items(worker.load());
        info!(
            "event=controller_open module=list_controller status=ok key={} items={} current_index={}",
            worker.key(),
            state.items.len(),
            state.current_index
        );
        Ok(Self {
            state,
            worker,
            last_save: None,
        })
    }

    /// Opens the controller over a SQLite file at `path`.
    ///
    /// When the database cannot be opened the controller keeps working on
    /// an in-memory slot for the rest of the process.
    pub fn open_file(path: impl AsRef<Path>, config: &TodoConfig) -> StoreResult<Self> {
        match SqliteTodoStore::open(path, config.storage_key.clone()) {
            Ok(store) => Self::open(store, config),
            Err(err) => {
                error!(
                    "event=controller_open module=list_controller status=degraded key={} error_code=storage_open_failed error={err}",
                    config.storage_key
                );
                Self::open(MemoryTodoStore::new(config.storage_key.clone()), config)
            }
        }
    }

    /// Appends an item titled `title` and returns its index.
    ///
    /// Returns `None` without saving when `title` is exactly `""` or no
    /// index is left to assign.
    pub fn add(&mut self, title: &str) -> Option<TodoIndex> {
        if !title.is_empty() && self.state.next_index().is_none() {
            warn!(
                "event=todo_add module=list_controller status=error error_code=index_exhausted current_index={}",
                self.state.current_index
            );
            return None;
        }
        let index = self.state.push_item(title)?;
        debug!("event=todo_add module=list_controller status=ok index={index}");
        self.queue_save();
        Some(index)
    }

    /// Flips the completion flag of the item with `index`.
    ///
    /// Returns the new flag, or `None` when no item has that index.
    pub fn toggle(&mut self, index: TodoIndex) -> Option<bool> {
        let done = self.state.toggle_item(index)?;
        debug!("event=todo_toggle module=list_controller status=ok index={index} done={done}");
        self.queue_save();
        Some(done)
    }

    /// Removes the item with `index` and returns it.
    pub fn delete(&mut self, index: TodoIndex) -> Option<TodoItem> {
        let removed = self.state.remove_item(index)?;
        debug!("event=todo_delete module=list_controller status=ok index={index}");
        self.queue_save();
        Some(removed)
    }

    /// Replaces the filter text; storage is not touched.
    pub fn set_filter(&mut self, text: impl Into<String>) {
        self.state.filter_text = text.into();
    }

    /// Current filter text.
    pub fn filter_text(&self) -> &str {
        &self.state.filter_text
    }

    /// Replaces the pending text of the input widget.
    pub fn set_input_text(&mut self, text: impl Into<String>) {
        self.state.input_text = text.into();
    }

    /// Current pending input text.
    pub fn input_text(&self) -> &str {
        &self.state.input_text
    }

    /// Adds the pending input text as a new item.
    pub fn submit_input(&mut self) -> Option<TodoIndex> {
        let title = self.state.input_text.clone();
        self.add(&title)
    }

    /// Items to render: all items, or those whose title contains the filter.
    pub fn visible_items(&self) -> Vec<TodoItem> {
        self.state.visible_items()
    }

    /// All items in list order, ignoring the filter.
    pub fn items(&self) -> &[TodoItem] {
        &self.state.items
    }

    /// Item with `index`, if present.
    pub fn get(&self, index: TodoIndex) -> Option<&TodoItem> {
        self.state.items.iter().find(|item| item.index == index)
    }

    /// Index assigned to the most recently added item.
    pub fn current_index(&self) -> TodoIndex {
        self.state.current_index
    }

    /// Takes the ticket of the most recent save, if one was queued since
    /// the last call. Earlier tickets are dropped as mutations happen.
    pub fn take_last_save(&mut self) -> Option<SaveTicket> {
        self.last_save.take()
    }

    /// Blocks until every save queued so far has finished.
    pub fn flush(&self) {
        self.worker.flush();
    }

    fn queue_save(&mut self) {
        let ticket = self.worker.save(self.state.items.clone());
        self.last_save = Some(ticket);
    }
}
