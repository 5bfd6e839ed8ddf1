//! Domain model for the to-do list screen.
//!
//! # Responsibility
//! - Define the item record persisted to local storage.
//! - Define the in-memory list state owned by the controller.
//!
//! # Invariants
//! - Every item is identified by its `index`, assigned once at creation.
//! - `ListState::current_index` never decreases.

pub mod todo;
