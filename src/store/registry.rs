// src/store/registry.rs

//! Process registry: durable task-id → process-handle mapping.

use serde::{Deserialize, Serialize};

use crate::store::{JsonStore, StoreError};

/// Collection holding one handle document per launched task.
const COLLECTION: &str = "process";

/// Persisted record linking a task identifier to an OS process id.
///
/// Staleness contract: `pid` referred to a real process at write time. The
/// OS may recycle pids after that process exits, so a positive liveness
/// probe against this handle means "a process with this id currently
/// exists", nothing stronger. Callers needing a hard identity guarantee
/// must extend the handle with a start-time or generation token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessHandle {
    pub id: String,
    pub pid: u32,
}

/// Read/write access to the process-handle collection.
///
/// The store exclusively owns the persisted state; there is no in-memory
/// cache, so launcher and monitor can live in different processes.
#[derive(Debug, Clone)]
pub struct ProcessRegistry {
    store: JsonStore,
}

impl ProcessRegistry {
    pub fn new(store: JsonStore) -> Self {
        ProcessRegistry { store }
    }

    /// Durably record a handle. Last write wins on task-id reuse.
    pub async fn put(&self, handle: &ProcessHandle) -> Result<(), StoreError> {
        self.store.put(COLLECTION, &handle.id, handle).await
    }

    /// Look up the handle for a task, `None` when it was never launched.
    pub async fn get(&self, task_id: &str) -> Result<Option<ProcessHandle>, StoreError> {
        self.store.get(COLLECTION, task_id).await
    }

    /// Remove a handle, e.g. after cleaning up a finished task.
    pub async fn delete(&self, task_id: &str) -> Result<bool, StoreError> {
        self.store.delete(COLLECTION, task_id).await
    }
}
