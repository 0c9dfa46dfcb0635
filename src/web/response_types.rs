//! # Web API Error Types
//!
//! Maps the lifecycle error taxonomy onto HTTP responses. The error body is
//! the flat `{"error": "<message>"}` shape this API has always spoken - kept
//! deliberately minimal so existing callers keep working.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::lifecycle::LifecycleError;

/// Web API errors with HTTP status code mappings
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    BadRequest { message: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Internal { message: String },

    #[error("Service temporarily unavailable")]
    ServiceUnavailable,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Lifecycle failures carry the policy; this is the single place they turn
/// into status codes.
impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::Validation(message) => ApiError::BadRequest { message },
            LifecycleError::NotFound(schema) => ApiError::NotFound {
                message: format!("no registered instance for schema {schema}"),
            },
            LifecycleError::AlreadyExists(_)
            | LifecycleError::Provisioning(_)
            | LifecycleError::Database(_) => ApiError::Internal {
                message: err.to_string(),
            },
        }
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => ApiError::ServiceUnavailable,
            _ => ApiError::internal(err.to_string()),
        }
    }
}

/// Result type alias for web API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_error_status_mapping() {
        let api: ApiError = LifecycleError::Validation("schema identifier is required".into()).into();
        assert!(matches!(api, ApiError::BadRequest { .. }));

        let api: ApiError = LifecycleError::NotFound("instance_1".into()).into();
        assert!(matches!(api, ApiError::NotFound { .. }));

        let api: ApiError = LifecycleError::AlreadyExists("instance_1".into()).into();
        assert!(matches!(api, ApiError::Internal { .. }));
    }
}
