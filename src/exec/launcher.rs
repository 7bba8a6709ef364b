// src/exec/launcher.rs

//! Detached worker launch.

use std::fs::File;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{info, warn};

use crate::exec::sink::sink_path;
use crate::store::{ProcessHandle, ProcessRegistry, StoreError};

/// Failures of [`Launcher::launch`], every one a definitive answer.
#[derive(Error, Debug)]
pub enum LaunchError {
    /// Caller misuse (empty task id, empty or unparsable command line).
    /// Nothing was spawned and nothing was written.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The OS could not create the worker process (command not found,
    /// resource limits, unwritable sink file).
    #[error("failed to spawn worker process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// The worker was spawned but its handle could not be persisted. The
    /// worker is **not** killed; it keeps running untracked under `pid`,
    /// and its output stays observable at the sink path derived from the
    /// task id.
    #[error("worker spawned with pid {pid} but registry write failed: {source}")]
    RegistryWriteFailed {
        pid: u32,
        #[source]
        source: StoreError,
    },
}

/// Launches detached worker processes and records their handles.
///
/// The working directory is injected at construction; the sink path for a
/// task is a pure function of that directory and the task id.
#[derive(Debug)]
pub struct Launcher {
    working_dir: PathBuf,
    registry: ProcessRegistry,
}

impl Launcher {
    pub fn new(working_dir: impl Into<PathBuf>, registry: ProcessRegistry) -> Self {
        Launcher {
            working_dir: working_dir.into(),
            registry,
        }
    }

    /// Spawn `command_line` as a detached process for `task_id` and
    /// durably record its handle before returning.
    ///
    /// The command line is split into an argument vector and exec'd
    /// directly; no shell is involved. Combined stdout/stderr go to the
    /// task's sink file with truncate-create semantics, so relaunching a
    /// task id discards the previous run's output. The worker is placed
    /// in its own process group and is never waited on by the caller's
    /// control flow, so it survives the launching process's exit.
    pub async fn launch(
        &self,
        task_id: &str,
        command_line: &str,
    ) -> Result<ProcessHandle, LaunchError> {
        if task_id.trim().is_empty() {
            return Err(LaunchError::InvalidArgument(
                "task id must not be empty".to_string(),
            ));
        }
        if command_line.trim().is_empty() {
            return Err(LaunchError::InvalidArgument(
                "command line must not be empty".to_string(),
            ));
        }
        let argv = shlex::split(command_line).ok_or_else(|| {
            LaunchError::InvalidArgument(format!("unparsable command line: {command_line}"))
        })?;
        let Some((program, args)) = argv.split_first() else {
            return Err(LaunchError::InvalidArgument(
                "command line contains no program".to_string(),
            ));
        };

        let sink = sink_path(&self.working_dir, task_id);
        let stdout = File::create(&sink).map_err(LaunchError::SpawnFailed)?;
        let stderr = stdout.try_clone().map_err(LaunchError::SpawnFailed)?;

        let mut cmd = Command::new(program);
        cmd.args(args)
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(stdout)
            .stderr(stderr);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            // New process group: the worker is not torn down with our
            // session and outlives us.
            cmd.process_group(0);
        }

        let mut child = cmd.spawn().map_err(LaunchError::SpawnFailed)?;
        let pid = child.id();

        // Reap the child in the background if we are still alive when it
        // exits; if we exit first, the detached group keeps it running and
        // init reaps it. Either way we never signal it.
        std::thread::spawn(move || {
            let _ = child.wait();
        });

        info!(
            task_id,
            pid,
            cmd = %command_line,
            sink = %sink.display(),
            "launched detached worker"
        );

        let handle = ProcessHandle {
            id: task_id.to_string(),
            pid,
        };
        if let Err(source) = self.registry.put(&handle).await {
            warn!(
                task_id,
                pid,
                error = %source,
                "registry write failed after spawn; worker keeps running untracked"
            );
            return Err(LaunchError::RegistryWriteFailed { pid, source });
        }

        Ok(handle)
    }
}
