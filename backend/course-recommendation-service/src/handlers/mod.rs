pub mod recommendation;
pub mod search;

pub use recommendation::{get_recommendations, RecommendationHandlerState};
pub use search::{search_courses, search_courses_by_path, SearchHandlerState};

use actix_web::{get, HttpResponse};

#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}
