use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use super::{CatalogStore, InMemoryStore, InteractionStore, StoreError};
use crate::models::{Course, SearchEvent, ViewEvent};

/// On-disk layout read by [`SnapshotStore::load`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotFile {
    #[serde(default)]
    pub searches: Vec<SearchEvent>,
    #[serde(default)]
    pub views: Vec<ViewEvent>,
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// Store backed by a JSON file read once at startup.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    inner: InMemoryStore,
}

impl SnapshotStore {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::Snapshot(format!("{}: {}", path.display(), e)))?;
        let file: SnapshotFile = serde_json::from_str(&raw)
            .map_err(|e| StoreError::Snapshot(format!("{}: {}", path.display(), e)))?;

        info!(
            path = %path.display(),
            searches = file.searches.len(),
            views = file.views.len(),
            courses = file.courses.len(),
            "Loaded store snapshot"
        );

        Ok(Self::from(file))
    }
}

impl From<SnapshotFile> for SnapshotStore {
    fn from(file: SnapshotFile) -> Self {
        Self {
            inner: InMemoryStore::new(file.searches, file.views, file.courses),
        }
    }
}

#[async_trait]
impl InteractionStore for SnapshotStore {
    async fn fetch_search_events(&self) -> Result<Vec<SearchEvent>, StoreError> {
        self.inner.fetch_search_events().await
    }

    async fn fetch_view_events(&self) -> Result<Vec<ViewEvent>, StoreError> {
        self.inner.fetch_view_events().await
    }
}

#[async_trait]
impl CatalogStore for SnapshotStore {
    async fn fetch_courses(&self) -> Result<Vec<Course>, StoreError> {
        self.inner.fetch_courses().await
    }
}
