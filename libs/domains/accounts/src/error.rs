use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::errors::{messages, ErrorResponse};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access forbidden")]
    Forbidden,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        let (status, error, message, code) = match &self {
            AccountError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("User {} not found", id),
                messages::CODE_NOT_FOUND,
            ),
            AccountError::DuplicateEmail(email) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("User with email '{}' already exists", email),
                messages::CODE_CONFLICT,
            ),
            AccountError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".to_string(),
                messages::CODE_UNAUTHORIZED,
            ),
            AccountError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                messages::UNAUTHORIZED.to_string(),
                messages::CODE_UNAUTHORIZED,
            ),
            AccountError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                messages::FORBIDDEN.to_string(),
                messages::CODE_FORBIDDEN,
            ),
            AccountError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    messages::INTERNAL_ERROR.to_string(),
                    messages::CODE_INTERNAL,
                )
            }
            AccountError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    messages::INTERNAL_ERROR.to_string(),
                    messages::CODE_INTERNAL,
                )
            }
        };

        (status, Json(ErrorResponse::new(error, message, code))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_and_forbidden_map_to_distinct_statuses() {
        let unauth = AccountError::Unauthenticated.into_response();
        let forbidden = AccountError::Forbidden.into_response();

        assert_eq!(unauth.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
    }

    #[test]
    fn conflict_maps_to_409() {
        let response = AccountError::DuplicateEmail("a@b.com".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn internal_failures_hide_details_from_clients() {
        let response = AccountError::Internal("connection reset".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
