// src/exec/mod.rs

//! Task execution and monitoring.
//!
//! This module owns the protocol for handing a task off to a detached OS
//! process and observing it afterwards:
//!
//! - [`sink`] derives the per-task output log path and reads snapshots.
//! - [`probe`] checks OS-level liveness of a recorded pid.
//! - [`launcher`] spawns the detached worker and persists its handle.
//! - [`monitor`] combines handle lookup, liveness and output into one
//!   pull-based status answer.
//!
//! There is no queue, no poller, and no cancellation here: a worker is
//! launched once, survives the launching process, and is only ever
//! observed. Waiting for completion means calling `monitor` again.

pub mod launcher;
pub mod monitor;
pub mod probe;
pub mod sink;

pub use launcher::{LaunchError, Launcher};
pub use monitor::{Monitor, MonitorResult};
pub use probe::{Liveness, probe};
pub use sink::{read_sink, sink_path};
