//! Recommends courses viewed by users whose search text resembles the target
//! user's.
//!
//! Every search event is one TF-IDF row. The target user's queries are joined
//! into a single document and scored against all rows by cosine similarity.
//! The top-ranked row is skipped (normally the user's own best match) and the
//! next `similar_user_window` rows name the similar users. Their viewed
//! courses, minus anything the target already viewed, are the result.

use std::collections::HashSet;

use crate::config::RecommendationConfig;
use crate::error::{AppError, Result};
use crate::models::{SearchEvent, ViewEvent};
use crate::text::{cosine_similarity, TfidfVectorizer};

#[derive(Debug, Clone, Copy)]
pub struct SimilarityEngine {
    window: usize,
    skip: usize,
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new(&RecommendationConfig::default())
    }
}

impl SimilarityEngine {
    pub fn new(config: &RecommendationConfig) -> Self {
        Self {
            window: config.similar_user_window,
            skip: config.similar_user_skip,
        }
    }

    /// Ordered, duplicate-free course ids, at most `num_recommendations` long.
    ///
    /// Fails when the user has searches but no search text yields a single
    /// vocabulary term (stop words and one-letter words only).
    pub fn recommend(
        &self,
        search_events: &[SearchEvent],
        view_events: &[ViewEvent],
        user_id: &str,
        num_recommendations: i64,
    ) -> Result<Vec<String>> {
        if num_recommendations <= 0 {
            return Ok(Vec::new());
        }
        let limit = usize::try_from(num_recommendations).unwrap_or(usize::MAX);

        let similar_users = self.similar_users(search_events, user_id)?;
        if similar_users.is_empty() {
            return Ok(Vec::new());
        }

        let viewed: HashSet<&str> = view_events
            .iter()
            .filter(|v| v.user_id == user_id)
            .map(|v| v.course_id.as_str())
            .collect();

        let mut seen = HashSet::new();
        Ok(view_events
            .iter()
            .filter(|v| similar_users.contains(&v.user_id.as_str()))
            .map(|v| v.course_id.as_str())
            .filter(|course_id| seen.insert(*course_id))
            .filter(|course_id| !viewed.contains(course_id))
            .take(limit)
            .map(str::to_string)
            .collect())
    }

    /// Similar users in rank order, deduplicated.
    pub fn similar_users<'a>(
        &self,
        search_events: &'a [SearchEvent],
        user_id: &str,
    ) -> Result<Vec<&'a str>> {
        let user_queries: Vec<&str> = search_events
            .iter()
            .filter(|s| s.user_id == user_id)
            .map(|s| s.query.as_str())
            .collect();
        if user_queries.is_empty() {
            return Ok(Vec::new());
        }

        let documents: Vec<&str> = search_events.iter().map(|s| s.query.as_str()).collect();
        let (vectorizer, rows) = TfidfVectorizer::fit_transform(&documents);
        if vectorizer.is_empty() {
            return Err(AppError::Internal(
                "empty vocabulary; search history contains only stop words".to_string(),
            ));
        }

        let user_vector = vectorizer.transform(&user_queries.join(" "));
        let scores: Vec<f64> = rows
            .iter()
            .map(|row| cosine_similarity(&user_vector, row))
            .collect();

        // Equal scores: the target's own rows first, then row order.
        let is_other = |i: usize| search_events[i].user_id != user_id;
        let mut ranked: Vec<usize> = (0..rows.len()).collect();
        ranked.sort_by(|&a, &b| {
            scores[b]
                .total_cmp(&scores[a])
                .then_with(|| is_other(a).cmp(&is_other(b)))
                .then(a.cmp(&b))
        });

        let mut users = Vec::new();
        for index in ranked.into_iter().skip(self.skip).take(self.window) {
            let candidate = search_events[index].user_id.as_str();
            if !users.contains(&candidate) {
                users.push(candidate);
            }
        }
        Ok(users)
    }
}
