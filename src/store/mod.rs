// src/store/mod.rs

//! Durable document storage.
//!
//! [`JsonStore`] is a small file-backed document store: one JSON file per
//! document, grouped into per-collection directories under a data root.
//! It gives the rest of the crate get/put/delete-by-key semantics with
//! document-level atomicity (writes go through a temp file + rename) and
//! nothing stronger.
//!
//! - [`tickets`] holds the ticket schema and its CRUD operations.
//! - [`registry`] maps task identifiers to process handles.

pub mod registry;
pub mod tickets;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::trace;

pub use registry::{ProcessHandle, ProcessRegistry};
pub use tickets::{Ticket, TicketStatus, TicketStore, TicketUpdate};

/// Errors from the document store backend.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid document at {path}: {source}")]
    InvalidDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// File-backed JSON document store.
///
/// A document with id `x` in collection `c` lives at `<root>/c/x.json`.
#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        JsonStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn doc_path(&self, collection: &str, id: &str) -> PathBuf {
        self.root.join(collection).join(format!("{id}.json"))
    }

    /// Write a document, replacing any previous version.
    ///
    /// The write goes to a temp file in the collection directory first and
    /// is renamed into place, so a crash never leaves a torn document.
    pub async fn put<T: Serialize>(
        &self,
        collection: &str,
        id: &str,
        doc: &T,
    ) -> Result<(), StoreError> {
        let path = self.doc_path(collection, id);
        let dir = self.root.join(collection);
        tokio::fs::create_dir_all(&dir).await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })?;

        let bytes = serde_json::to_vec_pretty(doc).map_err(|source| StoreError::InvalidDocument {
            path: path.clone(),
            source,
        })?;

        let tmp = dir.join(format!(".{id}.json.tmp"));
        tokio::fs::write(&tmp, &bytes).await.map_err(|source| StoreError::Io {
            path: tmp.clone(),
            source,
        })?;
        tokio::fs::rename(&tmp, &path).await.map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        trace!(collection, id, path = %path.display(), "document written");
        Ok(())
    }

    /// Read a document, returning `None` when it does not exist.
    pub async fn get<T: DeserializeOwned>(
        &self,
        collection: &str,
        id: &str,
    ) -> Result<Option<T>, StoreError> {
        let path = self.doc_path(collection, id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(StoreError::Io { path, source }),
        };

        let doc = serde_json::from_slice(&bytes)
            .map_err(|source| StoreError::InvalidDocument { path, source })?;
        Ok(Some(doc))
    }

    /// Delete a document. Returns `true` if a document was removed.
    pub async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let path = self.doc_path(collection, id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    /// List the ids of all documents in a collection.
    ///
    /// A collection that was never written to lists as empty.
    pub async fn list_ids(&self, collection: &str) -> Result<Vec<String>, StoreError> {
        let dir = self.root.join(collection);
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(StoreError::Io { path: dir, source }),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(|source| StoreError::Io {
            path: dir.clone(),
            source,
        })? {
            let name = entry.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(id) = name.strip_suffix(".json") {
                if !id.starts_with('.') {
                    ids.push(id.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::tempdir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        name: String,
        count: u32,
    }

    #[tokio::test]
    async fn put_get_roundtrip() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let doc = Doc {
            name: "a".into(),
            count: 3,
        };
        store.put("things", "one", &doc).await.unwrap();

        let read: Option<Doc> = store.get("things", "one").await.unwrap();
        assert_eq!(read, Some(doc));
    }

    #[tokio::test]
    async fn get_missing_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        let read: Option<Doc> = store.get("things", "nope").await.unwrap();
        assert!(read.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        store
            .put("things", "one", &Doc { name: "a".into(), count: 1 })
            .await
            .unwrap();

        assert!(store.delete("things", "one").await.unwrap());
        assert!(!store.delete("things", "one").await.unwrap());
    }

    #[tokio::test]
    async fn list_ids_skips_temp_files_and_sorts() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        store
            .put("things", "b", &Doc { name: "b".into(), count: 1 })
            .await
            .unwrap();
        store
            .put("things", "a", &Doc { name: "a".into(), count: 1 })
            .await
            .unwrap();
        std::fs::write(dir.path().join("things").join(".c.json.tmp"), b"{}").unwrap();

        let ids = store.list_ids("things").await.unwrap();
        assert_eq!(ids, vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn garbage_document_is_an_invalid_document_error() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        std::fs::create_dir_all(dir.path().join("things")).unwrap();
        std::fs::write(dir.path().join("things").join("bad.json"), b"not json").unwrap();

        let err = store.get::<Doc>("things", "bad").await.unwrap_err();
        match err {
            StoreError::InvalidDocument { .. } => {}
            other => panic!("expected InvalidDocument, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_collection_lists_as_empty() {
        let dir = tempdir().unwrap();
        let store = JsonStore::new(dir.path());

        assert!(store.list_ids("nothing").await.unwrap().is_empty());
    }
}
