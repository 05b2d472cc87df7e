//! Catalog search handlers

use actix_middleware::get_correlation_id;
use actix_web::{get, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::Result;
use crate::models::SearchQuery;
use crate::services::CatalogService;

pub struct SearchHandlerState {
    pub service: Arc<CatalogService>,
}

/// GET /api/courses/search?query=
#[get("/api/courses/search")]
pub async fn search_courses(
    req: HttpRequest,
    query: web::Query<SearchQuery>,
    state: web::Data<SearchHandlerState>,
) -> Result<HttpResponse> {
    let query = query.into_inner().query.unwrap_or_default();
    run_search(&req, &query, &state).await
}

/// GET /api/courses/search/{query}
/// The `query` parameter wins over the path segment when both are given.
#[get("/api/courses/search/{query}")]
pub async fn search_courses_by_path(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<SearchQuery>,
    state: web::Data<SearchHandlerState>,
) -> Result<HttpResponse> {
    let query = query
        .into_inner()
        .query
        .unwrap_or_else(|| path.into_inner());
    run_search(&req, &query, &state).await
}

async fn run_search(
    req: &HttpRequest,
    query: &str,
    state: &SearchHandlerState,
) -> Result<HttpResponse> {
    debug!(
        correlation_id = %get_correlation_id(req),
        "Searching courses for: {:?}",
        query
    );

    match state.service.search(query).await {
        Ok(courses) => Ok(HttpResponse::Ok().json(courses)),
        Err(err) => {
            error!(
                correlation_id = %get_correlation_id(req),
                "Course search failed: {:?}",
                err
            );
            Err(err)
        }
    }
}
