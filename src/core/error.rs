//! Typed error handling for the api-foundation crate
//!
//! The taxonomy is deliberately small:
//!
//! - [`ApiError::InvalidArgument`]: bad pagination or entity input
//! - [`ApiError::UnknownColumn`]: a requested column the entity does not have
//! - [`ApiError::Repository`]: opaque domain error bubbled from the store
//! - [`ApiError::Internal`]: genuinely unexpected faults
//!
//! Every domain-level failure maps to HTTP 400 with the error message as
//! payload; only internal faults surface as 500. Relation-load misses are
//! not errors at all (lenient-include policy, see `core::transform`).

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;

/// The main error type for api-foundation operations
#[derive(Debug)]
pub enum ApiError {
    /// Bad pagination parameters or a missing entity input
    InvalidArgument(String),

    /// A column selection the entity type does not expose
    UnknownColumn { entity_type: String, column: String },

    /// Opaque domain error bubbled up from the repository collaborator
    Repository(String),

    /// Internal faults (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            ApiError::UnknownColumn {
                entity_type,
                column,
            } => {
                write!(f, "Unknown column '{}' for {}", column, entity_type)
            }
            ApiError::Repository(msg) => write!(f, "{}", msg),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ApiError::UnknownColumn { .. } => StatusCode::BAD_REQUEST,
            ApiError::Repository(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::InvalidArgument(_) => "INVALID_ARGUMENT",
            ApiError::UnknownColumn { .. } => "UNKNOWN_COLUMN",
            ApiError::Repository(_) => "REPOSITORY_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    /// Get additional details for the error
    fn details(&self) -> Option<serde_json::Value> {
        match self {
            ApiError::UnknownColumn {
                entity_type,
                column,
            } => Some(serde_json::json!({
                "entity_type": entity_type,
                "column": column,
            })),
            _ => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidArgument(format!("invalid JSON: {}", err))
    }
}

/// Repository implementations report failures as `anyhow::Error`; at the
/// HTTP boundary those become domain errors (400), never 500.
impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<ApiError>() {
            Ok(api_err) => api_err,
            Err(err) => ApiError::Repository(err.to_string()),
        }
    }
}

/// A specialized Result type for api-foundation operations
pub type ApiResult<T> = Result<T, ApiError>;
