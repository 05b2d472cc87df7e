//! Shared error envelope for HTTP services.
//!
//! Every failed request is answered with the same JSON body:
//!
//! ```json
//! { "status": "error", "message": "User ID is required" }
//! ```
//!
//! The `error_type` and `code` attached to an [`ErrorResponse`] are not part of
//! the wire body; services log them so operators can group failures.

use serde::{Deserialize, Serialize};

/// Value of the `status` field for failed requests.
pub const STATUS_ERROR: &str = "error";

/// Value of the `status` field for successful wrapped responses.
pub const STATUS_SUCCESS: &str = "success";

/// Stable machine-readable codes for logs and metrics.
pub mod error_codes {
    pub const MISSING_FIELD: &str = "MISSING_FIELD";
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    pub const MALFORMED_RECORD: &str = "MALFORMED_RECORD";
    pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";
}

/// Coarse error categories.
pub mod error_types {
    pub const CLIENT_ERROR: &str = "client_error";
    pub const SERVER_ERROR: &str = "server_error";
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    #[serde(skip)]
    pub error_type: &'static str,
    #[serde(skip)]
    pub code: &'static str,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>, error_type: &'static str, code: &'static str) -> Self {
        Self {
            status: STATUS_ERROR.to_string(),
            message: message.into(),
            error_type,
            code,
        }
    }

    pub fn client(message: impl Into<String>, code: &'static str) -> Self {
        Self::new(message, error_types::CLIENT_ERROR, code)
    }

    pub fn server(message: impl Into<String>, code: &'static str) -> Self {
        Self::new(message, error_types::SERVER_ERROR, code)
    }
}
