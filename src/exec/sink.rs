// src/exec/sink.rs

//! Output sink: the per-task log file the worker writes into.

use std::path::{Path, PathBuf};

use tracing::warn;

/// Deterministic sink path for a task: `<working_dir>/gemini_output-<id>.log`.
///
/// Launcher and monitor must agree on this function; it is the only join
/// between a task identifier and the filesystem.
pub fn sink_path(working_dir: &Path, task_id: &str) -> PathBuf {
    working_dir.join(format!("gemini_output-{task_id}.log"))
}

/// Read the full current contents of a task's sink.
///
/// Returns `None` when the sink file does not exist. A sink that exists
/// but cannot be read reads as empty output rather than an error. Bytes
/// are opaque; they are decoded lossily for display.
pub async fn read_sink(working_dir: &Path, task_id: &str) -> Option<String> {
    let path = sink_path(working_dir, task_id);
    match tokio::fs::read(&path).await {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "sink exists but could not be read");
            Some(String::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn path_is_deterministic_and_keyed_by_task_id() {
        let a = sink_path(Path::new("/work"), "t1");
        let b = sink_path(Path::new("/work"), "t1");
        let c = sink_path(Path::new("/work"), "t2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, PathBuf::from("/work/gemini_output-t1.log"));
    }

    #[tokio::test]
    async fn missing_sink_reads_as_none() {
        let dir = tempdir().unwrap();
        assert_eq!(read_sink(dir.path(), "nope").await, None);
    }

    #[tokio::test]
    async fn existing_sink_reads_full_contents() {
        let dir = tempdir().unwrap();
        std::fs::write(sink_path(dir.path(), "t1"), b"hello\nworld\n").unwrap();

        assert_eq!(
            read_sink(dir.path(), "t1").await.as_deref(),
            Some("hello\nworld\n")
        );
    }

    #[tokio::test]
    async fn non_utf8_bytes_are_decoded_lossily() {
        let dir = tempdir().unwrap();
        std::fs::write(sink_path(dir.path(), "t1"), [0x68, 0x69, 0xff]).unwrap();

        let out = read_sink(dir.path(), "t1").await.unwrap();
        assert!(out.starts_with("hi"));
    }
}
