use async_trait::async_trait;

use super::{CatalogStore, InteractionStore, StoreError};
use crate::models::{Course, SearchEvent, ViewEvent};

/// Fixed in-process snapshot.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    searches: Vec<SearchEvent>,
    views: Vec<ViewEvent>,
    courses: Vec<Course>,
}

impl InMemoryStore {
    pub fn new(searches: Vec<SearchEvent>, views: Vec<ViewEvent>, courses: Vec<Course>) -> Self {
        Self {
            searches,
            views,
            courses,
        }
    }

    pub fn with_searches(mut self, searches: Vec<SearchEvent>) -> Self {
        self.searches = searches;
        self
    }

    pub fn with_views(mut self, views: Vec<ViewEvent>) -> Self {
        self.views = views;
        self
    }

    pub fn with_courses(mut self, courses: Vec<Course>) -> Self {
        self.courses = courses;
        self
    }
}

#[async_trait]
impl InteractionStore for InMemoryStore {
    async fn fetch_search_events(&self) -> Result<Vec<SearchEvent>, StoreError> {
        Ok(self.searches.clone())
    }

    async fn fetch_view_events(&self) -> Result<Vec<ViewEvent>, StoreError> {
        Ok(self.views.clone())
    }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
    async fn fetch_courses(&self) -> Result<Vec<Course>, StoreError> {
        Ok(self.courses.clone())
    }
}
