// src/exec/monitor.rs

//! Pull-based task status: one lookup, one probe, one read.

use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::exec::probe::{Liveness, probe};
use crate::exec::sink::read_sink;
use crate::store::{ProcessRegistry, StoreError};

/// Composite status of a task as observed right now.
///
/// Every variant is a definitive answer, not an error: it describes the
/// task's state, not a fault in this system. Callers poll by calling
/// [`Monitor::monitor`] again at whatever cadence they choose.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MonitorResult {
    /// No handle exists for this task id; it was never launched (or was
    /// cleaned up).
    NotFound,
    /// A handle exists but does not carry a usable positive pid.
    InvalidHandle,
    /// The recorded process was probed, but the sink file does not exist
    /// yet (worker not flushed, or path configuration drifted).
    OutputMissing { pid: u32 },
    /// A process with the recorded pid exists; `output` is the current
    /// sink snapshot.
    Running { pid: u32, output: String },
    /// No process with the recorded pid exists; `output` is the final
    /// sink snapshot and is stable across repeated calls.
    Finished { pid: u32, output: String },
}

/// Read-only observer for launched tasks.
#[derive(Debug)]
pub struct Monitor {
    working_dir: PathBuf,
    registry: ProcessRegistry,
}

impl Monitor {
    pub fn new(working_dir: impl Into<PathBuf>, registry: ProcessRegistry) -> Self {
        Monitor {
            working_dir: working_dir.into(),
            registry,
        }
    }

    /// Report liveness and current output for `task_id`.
    ///
    /// Liveness and output presence are independent checks: a live worker
    /// with no sink file reports `OutputMissing`, never a guess. The only
    /// `Err` here is a registry backend failure; task-shaped absence is
    /// always an `Ok` variant.
    pub async fn monitor(&self, task_id: &str) -> Result<MonitorResult, StoreError> {
        let handle = match self.registry.get(task_id).await {
            Ok(Some(handle)) => handle,
            Ok(None) => {
                debug!(task_id, "no registry handle for task");
                return Ok(MonitorResult::NotFound);
            }
            // A handle document that no longer deserializes is a malformed
            // handle, not a system fault.
            Err(StoreError::InvalidDocument { .. }) => return Ok(MonitorResult::InvalidHandle),
            Err(e) => return Err(e),
        };

        if handle.pid == 0 {
            return Ok(MonitorResult::InvalidHandle);
        }

        let liveness = probe(handle.pid);
        debug!(task_id, pid = handle.pid, ?liveness, "probed worker");

        let Some(output) = read_sink(&self.working_dir, task_id).await else {
            return Ok(MonitorResult::OutputMissing { pid: handle.pid });
        };

        Ok(match liveness {
            Liveness::Running => MonitorResult::Running {
                pid: handle.pid,
                output,
            },
            Liveness::Finished => MonitorResult::Finished {
                pid: handle.pid,
                output,
            },
        })
    }
}
