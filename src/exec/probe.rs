// src/exec/probe.rs

//! Zero-effect OS liveness probe.

/// Transient liveness verdict for a recorded pid. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Liveness {
    Running,
    Finished,
}

/// Probe whether a process with this pid currently exists.
///
/// Signal 0 performs error checking only; the target process is not
/// disturbed. Any failure (no such process, or a process we may not
/// signal) reads as `Finished`: under this probe a foreign-owned live
/// process is indistinguishable from a dead one, and launcher and monitor
/// are expected to run under the same principal.
#[cfg(unix)]
pub fn probe(pid: u32) -> Liveness {
    let alive = unsafe { libc::kill(pid as libc::pid_t, 0) } == 0;
    if alive { Liveness::Running } else { Liveness::Finished }
}

#[cfg(not(unix))]
pub fn probe(_pid: u32) -> Liveness {
    Liveness::Finished
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn own_process_probes_as_running() {
        assert_eq!(probe(std::process::id()), Liveness::Running);
    }

    #[test]
    fn reaped_child_probes_as_finished() {
        let mut child = std::process::Command::new("true")
            .spawn()
            .expect("spawn true");
        let pid = child.id();
        child.wait().expect("wait for child");

        // The child has been reaped, so its pid no longer names a process
        // (short of an immediate pid-reuse race).
        assert_eq!(probe(pid), Liveness::Finished);
    }
}
