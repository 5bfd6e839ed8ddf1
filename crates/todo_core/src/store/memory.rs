//! In-process key-value store.
//!
//! Clones share the same slots, so a test can keep one handle while the
//! persistence worker owns another.

use super::{decode_items, encode_items, StoreError, StoreResult, TodoStore};
use crate::config::StorageKey;
use crate::model::todo::TodoItem;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

#[derive(Debug, Default)]
struct Slots {
    values: Mutex<HashMap<String, String>>,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

/// Memory-backed `TodoStore`.
#[derive(Debug, Clone)]
pub struct MemoryTodoStore {
    key: StorageKey,
    slots: Arc<Slots>,
}

impl MemoryTodoStore {
    pub fn new(key: StorageKey) -> Self {
        Self {
            key,
            slots: Arc::new(Slots::default()),
        }
    }

    /// Returns a store over the same slots under another key.
    pub fn with_key(&self, key: StorageKey) -> Self {
        Self {
            key,
            slots: Arc::clone(&self.slots),
        }
    }

    /// Raw blob currently stored under this store's key.
    pub fn raw(&self) -> Option<String> {
        self.slots.values.lock().get(self.key.as_str()).cloned()
    }

    /// Replaces the raw blob, bypassing serialization.
    pub fn put_raw(&self, blob: impl Into<String>) {
        self.slots
            .values
            .lock()
            .insert(self.key.as_str().to_string(), blob.into());
    }

    /// Makes subsequent saves fail with `StoreError::Unavailable`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.slots.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful saves across all handles.
    pub fn write_count(&self) -> usize {
        self.slots.writes.load(Ordering::SeqCst)
    }
}

impl TodoStore for MemoryTodoStore {
    fn key(&self) -> &StorageKey {
        &self.key
    }

    fn load(&self) -> StoreResult<Vec<TodoItem>> {
        match self.raw() {
            Some(blob) => decode_items(&blob),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, items: &[TodoItem]) -> StoreResult<()> {
        if self.slots.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("writes disabled".to_string()));
        }
        let blob = encode_items(items)?;
        self.put_raw(blob);
        self.slots.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryTodoStore;
    use crate::config::StorageKey;
    use crate::model::todo::TodoItem;
    use crate::store::{StoreError, TodoStore};

    #[test]
    fn missing_slot_loads_empty() {
        let store = MemoryTodoStore::new(StorageKey::default());
        assert!(store.load().unwrap().is_empty());
        assert!(store.raw().is_none());
    }

    #[test]
    fn keys_are_isolated_across_shared_slots() {
        let store = MemoryTodoStore::new(StorageKey::default());
        let other = store.with_key(StorageKey::new("other").unwrap());
        store.save(&[TodoItem::new(1, "a")]).unwrap();
        assert!(other.load().unwrap().is_empty());
        assert_eq!(other.write_count(), 1);
    }

    #[test]
    fn failing_writes_keep_previous_blob() {
        let store = MemoryTodoStore::new(StorageKey::default());
        store.save(&[TodoItem::new(1, "a")]).unwrap();
        store.set_fail_writes(true);
        let err = store.save(&[]).unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.load().unwrap().len(), 1);
    }
}
