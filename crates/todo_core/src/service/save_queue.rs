//! Persistence worker: a dedicated thread owning the `TodoStore`.
//!
//! # Responsibility
//! - Serialize every load/save against storage on one thread.
//! - Hand back a `SaveTicket` per save so callers may await or ignore it.
//!
//! # Invariants
//! - Commands run in FIFO order, so saves complete in mutation order.
//! - Queueing never blocks the caller; only `load` and `flush` wait.
//! - Each save carries a full snapshot; the last completed save wins.
//! - Save failures are logged here; nothing is retried or rolled back.
//! - Dropping the worker drains queued commands before the thread exits.

use crate::config::{StorageKey, TodoConfig};
use crate::model::todo::TodoItem;
use crate::store::{load_or_empty, StoreError, StoreResult, TodoStore};
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use log::{debug, error, warn};
use std::thread::{self, JoinHandle};
use std::time::Instant;

enum Command {
    Load {
        reply: Sender<Vec<TodoItem>>,
    },
    Save {
        ticket: u64,
        items: Vec<TodoItem>,
        reply: Sender<StoreResult<()>>,
    },
    Flush {
        reply: Sender<()>,
    },
    Shutdown,
}

/// Completion handle for one queued save.
///
/// Dropping the ticket keeps fire-and-forget semantics: the save still runs.
#[derive(Debug)]
pub struct SaveTicket {
    id: u64,
    result: Receiver<StoreResult<()>>,
}

impl SaveTicket {
    /// Sequence number of the save, starting at 1 per worker.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Blocks until the save finished and returns its outcome.
    pub fn wait(self) -> StoreResult<()> {
        self.result.recv().unwrap_or(Err(StoreError::WorkerStopped))
    }
}

/// Single-thread command queue in front of a `TodoStore`.
pub struct PersistenceWorker {
    sender: Sender<Command>,
    handle: Option<JoinHandle<()>>,
    key: StorageKey,
    next_ticket: u64,
}

impl PersistenceWorker {
    /// Moves `store` onto a new worker thread.
    ///
    /// # Errors
    /// - Returns `StoreError::Unavailable` when the thread cannot be spawned.
    pub fn spawn<S>(store: S, config: &TodoConfig) -> StoreResult<Self>
    where
        S: TodoStore + 'static,
    {
        let key = store.key().clone();
        let (sender, receiver) = unbounded();
        let handle = thread::Builder::new()
            .name(config.worker_name.clone())
            .spawn(move || worker_loop(store, receiver))
            .map_err(|err| StoreError::Unavailable(format!("spawn persistence worker: {err}")))?;

        Ok(Self {
            sender,
            handle: Some(handle),
            key,
            next_ticket: 0,
        })
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Loads the stored list, blocking until the worker answers.
    ///
    /// Queued saves run first. Failures yield an empty list.
    pub fn load(&self) -> Vec<TodoItem> {
        let (reply, response) = bounded(1);
        if self.sender.send(Command::Load { reply }).is_err() {
            error!(
                "event=todo_load module=save_queue status=error key={} error_code=worker_stopped",
                self.key
            );
            return Vec::new();
        }
        response.recv().unwrap_or_default()
    }

    /// Queues a save of `items` and returns its completion ticket.
    pub fn save(&mut self, items: Vec<TodoItem>) -> SaveTicket {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let (reply, result) = bounded(1);
        let count = items.len();

        if self
            .sender
            .send(Command::Save {
                ticket,
                items,
                reply,
            })
            .is_err()
        {
            error!(
                "event=todo_save module=save_queue status=error key={} ticket={ticket} items={count} error_code=worker_stopped",
                self.key
            );
        } else {
            debug!(
                "event=todo_save module=save_queue status=queued key={} ticket={ticket} items={count}",
                self.key
            );
        }

        SaveTicket { id: ticket, result }
    }

    /// Blocks until every command queued so far has run.
    pub fn flush(&self) {
        let (reply, done) = bounded(1);
        if self.sender.send(Command::Flush { reply }).is_ok() {
            let _ = done.recv();
        }
    }
}

impl Drop for PersistenceWorker {
    fn drop(&mut self) {
        let _ = self.sender.send(Command::Shutdown);
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!(
                    "event=worker_stop module=save_queue status=error key={} error_code=worker_panicked",
                    self.key
                );
            }
        }
    }
}

fn worker_loop<S: TodoStore>(store: S, commands: Receiver<Command>) {
    for command in commands.iter() {
        match command {
            Command::Load { reply } => {
                let _ = reply.send(load_or_empty(&store));
            }
            Command::Save {
                ticket,
                items,
                reply,
            } => {
                let result = run_save(&store, ticket, &items);
                // Receiver may be gone; that is the fire-and-forget path.
                let _ = reply.send(result);
            }
            Command::Flush { reply } => {
                let _ = reply.send(());
            }
            Command::Shutdown => break,
        }
    }
}

fn run_save<S: TodoStore>(store: &S, ticket: u64, items: &[TodoItem]) -> StoreResult<()> {
    let started_at = Instant::now();
    let result = store.save(items);
    match &result {
        Ok(()) => debug!(
            "event=todo_save module=save_queue status=ok key={} ticket={ticket} items={} duration_ms={}",
            store.key(),
            items.len(),
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=todo_save module=save_queue status=error key={} ticket={ticket} items={} error_code=save_failed error={err}",
            store.key(),
            items.len()
        ),
    }
    result
}
