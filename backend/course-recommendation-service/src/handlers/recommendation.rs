//! Recommendation API Handlers
//!
//! HTTP endpoint for search-history based course recommendations

use actix_middleware::get_correlation_id;
use actix_web::{post, web, HttpRequest, HttpResponse};
use std::sync::Arc;
use tracing::{debug, error};

use crate::error::{AppError, Result};
use crate::models::{RecommendRequest, RecommendResponse};
use crate::services::RecommendationService;

/// Handler state for recommendation service
pub struct RecommendationHandlerState {
    pub service: Arc<RecommendationService>,
    /// Used when the body omits `numRecommendations`
    pub default_num_recommendations: i64,
}

/// POST /api/recommendations
/// Courses viewed by users with similar search histories
#[post("/api/recommendations")]
pub async fn get_recommendations(
    req: HttpRequest,
    body: web::Json<RecommendRequest>,
    state: web::Data<RecommendationHandlerState>,
) -> Result<HttpResponse> {
    let body = body.into_inner();
    let user_id = body
        .user_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::MissingField("User ID is required".to_string()))?;
    let num_recommendations = body
        .num_recommendations
        .unwrap_or(state.default_num_recommendations);

    debug!(
        correlation_id = %get_correlation_id(&req),
        "Getting recommendations for user: {}, limit: {}",
        user_id,
        num_recommendations
    );

    match state
        .service
        .get_recommendations(&user_id, num_recommendations)
        .await
    {
        Ok(recommendations) => {
            Ok(HttpResponse::Ok().json(RecommendResponse::success(recommendations)))
        }
        Err(err) => {
            error!(
                correlation_id = %get_correlation_id(&req),
                "Failed to get recommendations: {:?}",
                err
            );
            Err(err)
        }
    }
}
