mod catalog;
mod similarity;

pub use catalog::search_courses;
pub use similarity::SimilarityEngine;

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

use crate::db::{CatalogStore, InteractionStore, StoreError};
use crate::error::Result;
use crate::metrics;
use crate::models::Course;

async fn timed<T, F>(collection: &str, fetch: F) -> std::result::Result<T, StoreError>
where
    F: Future<Output = std::result::Result<T, StoreError>>,
{
    let start = Instant::now();
    let result = fetch.await;
    metrics::record_store_fetch(collection, start.elapsed());
    result
}

/// Reads the interaction snapshot and runs the [`SimilarityEngine`] over it.
#[derive(Clone)]
pub struct RecommendationService {
    store: Arc<dyn InteractionStore>,
    engine: SimilarityEngine,
}

impl RecommendationService {
    pub fn new(store: Arc<dyn InteractionStore>, engine: SimilarityEngine) -> Self {
        Self { store, engine }
    }

    pub async fn get_recommendations(
        &self,
        user_id: &str,
        num_recommendations: i64,
    ) -> Result<Vec<String>> {
        let outcome = self.recommend(user_id, num_recommendations).await;
        metrics::record_recommendations(outcome.as_ref().ok().map(Vec::len));
        outcome
    }

    async fn recommend(&self, user_id: &str, num_recommendations: i64) -> Result<Vec<String>> {
        let (searches, views) = tokio::try_join!(
            timed("searches", self.store.fetch_search_events()),
            timed("views", self.store.fetch_view_events()),
        )?;

        debug!(
            user_id = %user_id,
            searches = searches.len(),
            views = views.len(),
            "Loaded interaction snapshot"
        );

        let recommendations = self
            .engine
            .recommend(&searches, &views, user_id, num_recommendations)?;

        info!(
            user_id = %user_id,
            requested = num_recommendations,
            returned = recommendations.len(),
            "Recommendations computed"
        );

        Ok(recommendations)
    }
}

/// Case-insensitive search over the course catalog.
#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Course>> {
        let outcome: Result<Vec<Course>> = timed("courses", self.store.fetch_courses())
            .await
            .map(|courses| search_courses(&courses, query))
            .map_err(Into::into);
        metrics::record_search(outcome.as_ref().ok().map(Vec::len));

        if let Ok(found) = &outcome {
            debug!(query = %query, results = found.len(), "Catalog search finished");
        }
        outcome
    }
}
