//! API error types and JSON error response formatting.
//!
//! Every failing endpoint answers with the same `{error, message, details?}`
//! body; the status code comes from the variant.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use learnhub_chat::ChatError;
use learnhub_core::error::LearnHubError;
use learnhub_courses::CourseError;
use serde::Serialize;

/// JSON error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code (e.g., "bad_request", "not_found").
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug)]
pub enum ApiError {
    /// 400 - missing or malformed input.
    BadRequest(String),
    /// 400 - input failed validation; `details` describes the limit hit.
    InvalidInput {
        message: String,
        details: serde_json::Value,
    },
    /// 404
    NotFound(String),
    /// 500
    Internal(String),
    /// 503 - the feature is switched off in config.
    ServiceUnavailable(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::InvalidInput { message, details } => {
                (StatusCode::BAD_REQUEST, "invalid_input", message, Some(details))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "Internal API error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg, None)
            }
            ApiError::ServiceUnavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "service_unavailable", msg, None)
            }
        };

        let body = ErrorBody {
            error: error_code.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ChatError> for ApiError {
    fn from(err: ChatError) -> Self {
        match &err {
            ChatError::SessionNotFound(_) => ApiError::NotFound(err.to_string()),
            ChatError::EmptyMessage => ApiError::BadRequest(err.to_string()),
            ChatError::MessageTooLong(max) => ApiError::InvalidInput {
                message: err.to_string(),
                details: serde_json::json!({ "max_length": *max }),
            },
            ChatError::Disabled => ApiError::ServiceUnavailable(err.to_string()),
            ChatError::Remote(_) | ChatError::VoiceError(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<CourseError> for ApiError {
    fn from(err: CourseError) -> Self {
        match &err {
            CourseError::NotFound(_) => ApiError::NotFound(err.to_string()),
            CourseError::InvalidFilter(_) => ApiError::BadRequest(err.to_string()),
        }
    }
}

impl From<LearnHubError> for ApiError {
    fn from(err: LearnHubError) -> Self {
        match &err {
            LearnHubError::Config(msg) => ApiError::BadRequest(msg.clone()),
            LearnHubError::NotFound(msg) => ApiError::NotFound(msg.clone()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

// Extractor rejections keep axum's message but use the JSON error body.

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
