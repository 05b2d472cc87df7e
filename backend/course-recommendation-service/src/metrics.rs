//! Prometheus metrics for recommendation and search requests

use once_cell::sync::Lazy;
use prometheus::{
    register_histogram_vec, register_int_counter_vec, HistogramVec, IntCounterVec,
};
use std::time::Duration;

/// Recommendation requests by outcome (hit/empty/error)
static RECOMMENDATIONS_SERVED_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "course_recommendations_served_total",
        "Recommendation requests by outcome",
        &["outcome"]
    )
    .expect("failed to register course_recommendations_served_total")
});

/// Catalog searches by outcome (hit/empty/error)
static SEARCH_RESULTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "course_search_results_total",
        "Catalog searches by outcome",
        &["outcome"]
    )
    .expect("failed to register course_search_results_total")
});

static STORE_FETCH_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "course_store_fetch_duration_seconds",
        "Time spent reading a full collection snapshot",
        &["collection"],
        vec![0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]
    )
    .expect("failed to register course_store_fetch_duration_seconds")
});

fn outcome(result_len: Option<usize>) -> &'static str {
    match result_len {
        None => "error",
        Some(0) => "empty",
        Some(_) => "hit",
    }
}

/// `None` records a failed request.
pub fn record_recommendations(result_len: Option<usize>) {
    RECOMMENDATIONS_SERVED_TOTAL
        .with_label_values(&[outcome(result_len)])
        .inc();
}

/// `None` records a failed request.
pub fn record_search(result_len: Option<usize>) {
    SEARCH_RESULTS_TOTAL
        .with_label_values(&[outcome(result_len)])
        .inc();
}

pub fn record_store_fetch(collection: &str, duration: Duration) {
    STORE_FETCH_DURATION_SECONDS
        .with_label_values(&[collection])
        .observe(duration.as_secs_f64());
}
