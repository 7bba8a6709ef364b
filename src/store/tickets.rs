// src/store/tickets.rs

//! Ticket schema and CRUD, a thin layer over the document store.
//!
//! Documents are validated on read: a ticket file that no longer matches
//! the schema is treated as absent rather than failing the whole query,
//! so one corrupt document cannot take down `list`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use crate::store::{JsonStore, StoreError};

const COLLECTION: &str = "tickets";

/// Lifecycle state of a ticket, driven by the dispatch layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    Pending,
    Running,
}

/// A task ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub title: String,
    pub description: String,
    pub execution_plan: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: TicketStatus,
}

/// Partial update applied by [`TicketStore::update`]. `None` fields are
/// left untouched.
#[derive(Debug, Clone, Default)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub execution_plan: Option<String>,
    pub status: Option<TicketStatus>,
}

/// CRUD over the ticket collection.
#[derive(Debug, Clone)]
pub struct TicketStore {
    store: JsonStore,
}

impl TicketStore {
    pub fn new(store: JsonStore) -> Self {
        TicketStore { store }
    }

    /// Create a ticket with a generated id and return the id.
    pub async fn create(
        &self,
        title: String,
        description: String,
        execution_plan: String,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().simple().to_string();
        let ticket = Ticket {
            title,
            description,
            execution_plan,
            created_at: Utc::now(),
            status: TicketStatus::Pending,
        };
        self.store.put(COLLECTION, &id, &ticket).await?;
        Ok(id)
    }

    /// Read a ticket; schema-invalid documents read as absent.
    pub async fn get(&self, id: &str) -> Result<Option<Ticket>, StoreError> {
        match self.store.get(COLLECTION, id).await {
            Ok(ticket) => Ok(ticket),
            Err(StoreError::InvalidDocument { path, source }) => {
                warn!(id, path = %path.display(), error = %source, "skipping invalid ticket document");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// List all valid tickets with their ids, sorted by id.
    pub async fn list(&self) -> Result<Vec<(String, Ticket)>, StoreError> {
        let ids = self.store.list_ids(COLLECTION).await?;
        let mut tickets = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(ticket) = self.get(&id).await? {
                tickets.push((id, ticket));
            }
        }
        Ok(tickets)
    }

    /// Apply a partial update. Returns `false` when the ticket does not
    /// exist (definitive answer, nothing is created).
    pub async fn update(&self, id: &str, update: TicketUpdate) -> Result<bool, StoreError> {
        let Some(mut ticket) = self.get(id).await? else {
            return Ok(false);
        };

        if let Some(title) = update.title {
            ticket.title = title;
        }
        if let Some(description) = update.description {
            ticket.description = description;
        }
        if let Some(execution_plan) = update.execution_plan {
            ticket.execution_plan = execution_plan;
        }
        if let Some(status) = update.status {
            ticket.status = status;
        }

        self.store.put(COLLECTION, id, &ticket).await?;
        Ok(true)
    }

    /// Delete a ticket. Returns `true` if one was removed.
    pub async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        self.store.delete(COLLECTION, id).await
    }
}
