//! To-do item and list state.
//!
//! # Responsibility
//! - Define the `{index, title, done}` record shared with storage.
//! - Hold list state and apply in-memory mutations.
//!
//! # Invariants
//! - Items keep insertion order; insertion order is render order.
//! - Every item in `items` has `index <= current_index`.
//! - `input_text` and `filter_text` are never persisted.

use serde::{Deserialize, Serialize};

/// Stable identifier of one to-do item.
pub type TodoIndex = u64;

/// One to-do entry.
///
/// Serialized field names match the stored blob format:
/// `{"index": 1, "title": "Buy milk", "done": false}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    /// Assigned as `current_index + 1` when the item is created.
    pub index: TodoIndex,
    /// Free text entered by the user. Never empty for created items.
    pub title: String,
    /// Completion flag.
    pub done: bool,
}

impl TodoItem {
    /// Creates an open (not done) item.
    pub fn new(index: TodoIndex, title: impl Into<String>) -> Self {
        Self {
            index,
            title: title.into(),
            done: false,
        }
    }

    /// Returns whether `filter` is contained in the title.
    ///
    /// Case-sensitive substring match. An empty filter matches every item.
    pub fn matches_filter(&self, filter: &str) -> bool {
        self.title.contains(filter)
    }
}

/// In-memory list state owned by `ListController`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListState {
    pub items: Vec<TodoItem>,
    pub current_index: TodoIndex,
    pub input_text: String,
    pub filter_text: String,
}

impl ListState {
    /// Builds state from a loaded item list.
    ///
    /// The counter resumes at `max(len, max index)` so freshly assigned
    /// indices never collide with a loaded one, even after deletions.
    pub fn from_items(items: Vec<TodoItem>) -> Self {
        let max_index = items.iter().map(|item| item.index).max().unwrap_or(0);
        let current_index = max_index.max(items.len() as TodoIndex);
        Self {
            items,
            current_index,
            input_text: String::new(),
            filter_text: String::new(),
        }
    }

    /// Appends a new item. Returns `None` when `title` is empty or the
    /// counter is exhausted.
    ///
    /// Only the exact empty string is rejected; whitespace titles are kept.
    /// Clears `input_text` on success.
    pub fn push_item(&mut self, title: &str) -> Option<TodoIndex> {
        if title.is_empty() {
            return None;
        }
        let index = self.next_index()?;
        self.current_index = index;
        self.items.push(TodoItem::new(index, title));
        self.input_text.clear();
        Some(index)
    }

    /// Index the next added item would get, or `None` once the counter
    /// reached `TodoIndex::MAX`.
    pub fn next_index(&self) -> Option<TodoIndex> {
        self.current_index.checked_add(1)
    }

    /// Flips `done` of the first item with `index`. Returns the new flag.
    pub fn toggle_item(&mut self, index: TodoIndex) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.index == index)?;
        item.done = !item.done;
        Some(item.done)
    }

    /// Removes exactly one item with `index`.
    pub fn remove_item(&mut self, index: TodoIndex) -> Option<TodoItem> {
        let position = self.items.iter().position(|item| item.index == index)?;
        Some(self.items.remove(position))
    }

    /// Returns the items visible under the current filter, in list order.
    pub fn visible_items(&self) -> Vec<TodoItem> {
        if self.filter_text.is_empty() {
            return self.items.clone();
        }
        self.items
            .iter()
            .filter(|item| item.matches_filter(&self.filter_text))
            .cloned()
            .collect()
    }
}
