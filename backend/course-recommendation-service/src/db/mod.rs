//! Read access to the interaction and catalog collections.
//!
//! Every call returns a full snapshot of one collection. Callers treat the
//! result as immutable for the rest of the request.

mod firestore;
mod memory;
mod snapshot;

pub use firestore::{FirestoreStore, FirestoreValue};
pub use memory::InMemoryStore;
pub use snapshot::{SnapshotFile, SnapshotStore};

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Course, SearchEvent, ViewEvent};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("store returned HTTP {status} for {collection}: {body}")]
    Status {
        collection: String,
        status: u16,
        body: String,
    },

    #[error("malformed record in {collection}: {reason}")]
    Malformed { collection: String, reason: String },

    #[error("snapshot error: {0}")]
    Snapshot(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Unavailable(err.to_string())
    }
}

/// Search and view history.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InteractionStore: Send + Sync {
    async fn fetch_search_events(&self) -> Result<Vec<SearchEvent>, StoreError>;
    async fn fetch_view_events(&self) -> Result<Vec<ViewEvent>, StoreError>;
}

/// Course catalog.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn fetch_courses(&self) -> Result<Vec<Course>, StoreError>;
}
