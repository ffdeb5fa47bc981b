//! Error types and HTTP error shaping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::repository::RepositoryError;

/// Message returned with every 404 product lookup
pub const PRODUCT_NOT_FOUND: &str = "No se ha encontrado el producto";

/// Generic message returned with every 500; details stay in the logs
pub const INTERNAL_ERROR: &str = "Error al procesar la solicitud";

/// Result type for startup and framework operations
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for request handlers
pub type HandlerResult<T> = std::result::Result<T, ApiError>;

/// Errors that stop the service before or while it is serving
#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Database error: {0}")]
    Database(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Request-scoped failures rendered to API clients
///
/// Validation failures never reach this type; they are rejected by the
/// extractors in [`crate::validation`] before a handler runs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested product does not exist.
    #[error("{}", PRODUCT_NOT_FOUND)]
    ProductNotFound,

    /// The store failed. Clients get a generic message; the cause is logged.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::ProductNotFound => (StatusCode::NOT_FOUND, PRODUCT_NOT_FOUND),
            Self::Repository(err) => {
                tracing::error!(
                    operation = %err.operation,
                    kind = %err.kind,
                    "Repository failure: {}",
                    err.message
                );
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR)
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::RepositoryOperation;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_product_not_found_response() {
        let response = ApiError::ProductNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "No se ha encontrado el producto" }));
    }

    #[tokio::test]
    async fn test_repository_error_hides_details() {
        let err = RepositoryError::database_error(
            RepositoryOperation::FindAll,
            "relation \"products\" does not exist",
        );
        let response = ApiError::from(err).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body, json!({ "error": "Error al procesar la solicitud" }));
    }

    #[test]
    fn test_display_matches_contract_message() {
        assert_eq!(
            ApiError::ProductNotFound.to_string(),
            "No se ha encontrado el producto"
        );
    }
}
