use actix_web::{http::StatusCode, test, App};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use course_recommendation_service::db::{
    CatalogStore, InMemoryStore, InteractionStore, StoreError,
};
use course_recommendation_service::models::{Course, SearchEvent, ViewEvent};
use course_recommendation_service::{
    configure_routes, CatalogService, RecommendationService, SimilarityEngine,
};

/// Store whose backend is permanently unreachable.
struct DownStore;

#[async_trait]
impl InteractionStore for DownStore {
    async fn fetch_search_events(&self) -> Result<Vec<SearchEvent>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }

    async fn fetch_view_events(&self) -> Result<Vec<ViewEvent>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

#[async_trait]
impl CatalogStore for DownStore {
    async fn fetch_courses(&self) -> Result<Vec<Course>, StoreError> {
        Err(StoreError::Unavailable("connection refused".into()))
    }
}

fn seeded_store() -> Arc<InMemoryStore> {
    let mut rust = Course::new("rust-101", "Intro to Rust", "Ownership and borrowing");
    rust.extra.insert("level".into(), json!("beginner"));

    Arc::new(
        InMemoryStore::default()
            .with_searches(vec![
                SearchEvent::new("u1", "machine learning"),
                SearchEvent::new("u2", "machine learning basics"),
                SearchEvent::new("u3", "cooking recipes"),
            ])
            .with_views(vec![
                ViewEvent::new("u2", "C100"),
                ViewEvent::new("u3", "C200"),
                ViewEvent::new("u1", "C300"),
            ])
            .with_courses(vec![
                rust,
                Course::new("py-201", "Python for Data", "Pandas and NumPy"),
                Course::new("sys-301", "Systems Programming", "Low-level RUST and C"),
            ]),
    )
}

macro_rules! init_app {
    ($interactions:expr, $catalog:expr) => {{
        let recommendations = Arc::new(RecommendationService::new(
            $interactions,
            SimilarityEngine::default(),
        ));
        let catalog = Arc::new(CatalogService::new($catalog));
        test::init_service(
            App::new().configure(move |cfg| configure_routes(cfg, recommendations, catalog, 5)),
        )
        .await
    }};
}

#[actix_web::test]
async fn recommendations_for_known_user() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(json!({"userId": "u1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"status": "success", "recommendations": ["C100", "C200"]})
    );
}

#[actix_web::test]
async fn recommendations_respect_requested_count() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(json!({"userId": "u1", "numRecommendations": 1}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["recommendations"], json!(["C100"]));

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(json!({"userId": "u1", "numRecommendations": 0}))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["recommendations"], json!([]));
}

#[actix_web::test]
async fn unknown_user_gets_empty_list() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(json!({"userId": "nobody"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!({"status": "success", "recommendations": []}));
}

#[actix_web::test]
async fn missing_or_empty_user_id_is_rejected() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    for payload in [json!({}), json!({"userId": ""}), json!({"numRecommendations": 3})] {
        let req = test::TestRequest::post()
            .uri("/api/recommendations")
            .set_json(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({"status": "error", "message": "User ID is required"}));
    }
}

#[actix_web::test]
async fn malformed_body_is_rejected() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[actix_web::test]
async fn store_failure_is_internal_error() {
    let app = init_app!(Arc::new(DownStore), Arc::new(DownStore));

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(json!({"userId": "u1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("connection refused"));

    let req = test::TestRequest::get()
        .uri("/api/courses/search?query=rust")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[actix_web::test]
async fn stop_word_only_history_is_internal_error() {
    let store = Arc::new(
        InMemoryStore::default()
            .with_searches(vec![
                SearchEvent::new("u1", "the and"),
                SearchEvent::new("u2", "of the"),
            ])
            .with_views(vec![ViewEvent::new("u2", "C1")]),
    );
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::post()
        .uri("/api/recommendations")
        .set_json(json!({"userId": "u1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "error");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("empty vocabulary"));
}

#[actix_web::test]
async fn search_returns_raw_course_documents() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::get()
        .uri("/api/courses/search?query=RUST")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body,
        json!([
            {"title": "Intro to Rust", "description": "Ownership and borrowing", "level": "beginner"},
            {"title": "Systems Programming", "description": "Low-level RUST and C"}
        ])
    );
}

#[actix_web::test]
async fn search_without_query_returns_whole_catalog() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::get()
        .uri("/api/courses/search")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(
        titles,
        vec!["Intro to Rust", "Python for Data", "Systems Programming"]
    );
}

#[actix_web::test]
async fn search_accepts_path_segment() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::get()
        .uri("/api/courses/search/numpy")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["title"], "Python for Data");

    // The query parameter takes precedence.
    let req = test::TestRequest::get()
        .uri("/api/courses/search/numpy?query=systems")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body[0]["title"], "Systems Programming");
}

#[actix_web::test]
async fn malformed_query_string_is_rejected() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    for uri in [
        "/api/courses/search?query=rust&query=go",
        "/api/courses/search/rust?query=rust&query=go",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "error");
        assert!(body["message"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query string"));
    }
}

#[actix_web::test]
async fn health_check() {
    let store = seeded_store();
    let app = init_app!(store.clone(), store);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}
