use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use error_types::{error_codes, ErrorResponse};
use thiserror::Error;

use crate::db::StoreError;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    /// A required body field is absent or empty
    #[error("{0}")]
    MissingField(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::BadRequest(msg) => {
                ErrorResponse::client(msg.clone(), error_codes::INVALID_REQUEST)
            }
            AppError::MissingField(msg) => {
                ErrorResponse::client(msg.clone(), error_codes::MISSING_FIELD)
            }
            AppError::Store(StoreError::Malformed { .. }) => {
                ErrorResponse::server(self.to_string(), error_codes::MALFORMED_RECORD)
            }
            AppError::Store(_) => {
                ErrorResponse::server(self.to_string(), error_codes::STORE_UNAVAILABLE)
            }
            AppError::Internal(_) => {
                ErrorResponse::server(self.to_string(), error_codes::INTERNAL_SERVER_ERROR)
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = self.to_error_response();

        if self.status_code().is_server_error() {
            tracing::error!(
                error_type = body.error_type,
                code = body.code,
                "Request failed: {}",
                body.message
            );
        }

        HttpResponse::build(self.status_code()).json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

/// Renders actix JSON extractor failures with the shared error envelope.
pub fn json_error_handler(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}

/// Query-string counterpart of [`json_error_handler`].
pub fn query_error_handler(
    err: actix_web::error::QueryPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid query string: {}", err)).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::MessageBody;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::BadRequest("User ID is required".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Store(StoreError::Unavailable("connection refused".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_bad_request_body_keeps_message_verbatim() {
        let resp = AppError::MissingField("User ID is required".into()).error_response();
        let bytes = resp.into_body().try_into_bytes().unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"status": "error", "message": "User ID is required"})
        );
    }
}
