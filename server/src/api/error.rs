//! API Error Mapping
//!
//! Every failure leaves a handler as `{ "error": message }` with the status
//! matching its domain category.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::DomainError;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Error returned by HTTP handlers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    /// Map and log a domain error raised while performing `operation`.
    ///
    /// Store failures get a generic message so internals stay in the log.
    pub fn from_domain(operation: &'static str, error: DomainError) -> Self {
        let (status, message) = match &error {
            DomainError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            DomainError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            DomainError::StoreUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database connection not available".to_string(),
            ),
            DomainError::Store(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to {}", operation),
            ),
        };

        if status.is_server_error() {
            tracing::error!(operation, error = %error, "Request failed");
        } else {
            tracing::warn!(operation, error = %error, "Request rejected");
        }

        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
