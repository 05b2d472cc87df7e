pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod services;
pub mod text;

pub use config::Config;
pub use error::{AppError, Result};
pub use services::{CatalogService, RecommendationService, SimilarityEngine};

use actix_web::web;
use std::sync::Arc;

use crate::handlers::{RecommendationHandlerState, SearchHandlerState};

/// Registers the API routes and their shared state.
///
/// JSON body and query-string errors render through [`error::json_error_handler`]
/// and [`error::query_error_handler`] so they carry the same `{status, message}`
/// envelope as every other failure.
pub fn configure_routes(
    cfg: &mut web::ServiceConfig,
    recommendations: Arc<RecommendationService>,
    catalog: Arc<CatalogService>,
    default_num_recommendations: i64,
) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .app_data(web::Data::new(RecommendationHandlerState {
            service: recommendations,
            default_num_recommendations,
        }))
        .app_data(web::Data::new(SearchHandlerState { service: catalog }))
        .service(handlers::health)
        .service(handlers::get_recommendations)
        .service(handlers::search_courses)
        .service(handlers::search_courses_by_path);
}
