//! Core use-case services.
//!
//! # Responsibility
//! - Own list state and its mutation operations (`list_controller`).
//! - Run storage access on a dedicated worker thread (`save_queue`).
//!
//! # Invariants
//! - UI and FFI callers never touch a `TodoStore` directly.

pub mod list_controller;
pub mod save_queue;
