use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_helpers::errors::{messages, ErrorResponse};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access forbidden")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let (status, error, message, code) = match &self {
            CatalogError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("Product {} not found", id),
                messages::CODE_NOT_FOUND,
            ),
            CatalogError::Validation(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                msg.clone(),
                messages::CODE_VALIDATION,
            ),
            CatalogError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                messages::UNAUTHORIZED.to_string(),
                messages::CODE_UNAUTHORIZED,
            ),
            CatalogError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                messages::FORBIDDEN.to_string(),
                messages::CODE_FORBIDDEN,
            ),
            CatalogError::Internal(msg) => {
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
    fn statuses_follow_the_error_taxonomy() {
        assert_eq!(
            CatalogError::NotFound(Uuid::now_v7()).into_response().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            CatalogError::Validation("query required".to_string())
                .into_response()
                .status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            CatalogError::Unauthenticated.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            CatalogError::Forbidden.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            CatalogError::Internal("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
