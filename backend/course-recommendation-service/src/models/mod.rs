use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One search a user issued
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEvent {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SearchEvent {
    pub fn new(user_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            query: query.into(),
            timestamp: None,
        }
    }
}

/// One course page a user opened
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewEvent {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub course_id: String,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl ViewEvent {
    pub fn new(user_id: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            course_id: course_id.into(),
            timestamp: None,
        }
    }
}

/// Catalog entry.
///
/// Serialises as the raw course document: `title`, `description` and every
/// other stored field. The document id stays internal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    #[serde(skip_serializing, default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Course {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            extra: Map::new(),
        }
    }
}

/// Body of `POST /api/recommendations`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub num_recommendations: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub status: String,
    pub recommendations: Vec<String>,
}

impl RecommendResponse {
    pub fn success(recommendations: Vec<String>) -> Self {
        Self {
            status: error_types::STATUS_SUCCESS.to_string(),
            recommendations,
        }
    }
}

/// Query string of `GET /api/courses/search`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recommend_request_camel_case() {
        let req: RecommendRequest =
            serde_json::from_str(r#"{"userId": "u1", "numRecommendations": 3}"#).unwrap();
        assert_eq!(req.user_id.as_deref(), Some("u1"));
        assert_eq!(req.num_recommendations, Some(3));

        let req: RecommendRequest = serde_json::from_str("{}").unwrap();
        assert!(req.user_id.is_none());
        assert!(req.num_recommendations.is_none());
    }

    #[test]
    fn test_course_serializes_raw_document() {
        let mut course = Course::new("c1", "Intro to Rust", "Ownership and borrowing");
        course
            .extra
            .insert("level".to_string(), Value::String("beginner".to_string()));

        let json = serde_json::to_value(&course).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "Intro to Rust",
                "description": "Ownership and borrowing",
                "level": "beginner"
            })
        );
    }

    #[test]
    fn test_success_response_shape() {
        let json = serde_json::to_value(RecommendResponse::success(vec!["C1".into()])).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "success", "recommendations": ["C1"]})
        );
    }
}
