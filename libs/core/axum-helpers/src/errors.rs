//! Structured error responses with stable error codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Standard error messages and codes shared across the API surface
pub mod messages {
    pub const VALIDATION_FAILED: &str = "Request validation failed";
    pub const NOT_FOUND_RESOURCE: &str = "Requested resource was not found";
    pub const UNAUTHORIZED: &str = "Authentication required";
    pub const FORBIDDEN: &str = "Access forbidden";
    pub const INTERNAL_ERROR: &str = "An internal error occurred";

    // Integer codes for observability; client errors sit in the 1000s
    pub const CODE_VALIDATION: i32 = 1001;
    pub const CODE_NOT_FOUND: i32 = 1004;
    pub const CODE_INTERNAL: i32 = 1005;
    pub const CODE_UNAUTHORIZED: i32 = 1006;
    pub const CODE_FORBIDDEN: i32 = 1007;
    pub const CODE_CONFLICT: i32 = 1008;
}

/// Standard error response body.
///
/// Every error surface returns this shape:
/// - `error`: machine-readable identifier (e.g. `"CONFLICT"`)
/// - `message`: human-readable description
/// - `details`: optional structured payload (e.g. field-level validation errors)
/// - `code`: integer code for logging and monitoring
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<i32>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>, code: i32) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
            code: Some(code),
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Fallback handler for unmatched routes
pub async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new(
            "NOT_FOUND",
            messages::NOT_FOUND_RESOURCE,
            messages::CODE_NOT_FOUND,
        )),
    )
        .into_response()
}
