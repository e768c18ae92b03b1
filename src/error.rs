//! Error types for Bookshelf server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Main application error type.
///
/// The inner strings are diagnostic details for the logs only; clients
/// always receive one of the four fixed envelopes.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// Collapse a persistence failure into `Unprocessable`.
    ///
    /// Database errors keep their variant so the cause is still logged.
    pub fn into_unprocessable(self) -> Self {
        match self {
            AppError::Database(_) | AppError::Unprocessable(_) => self,
            other => AppError::Unprocessable(other.to_string()),
        }
    }

    /// HTTP status and fixed message sent to the client
    pub fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "resource not found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad request"),
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
            AppError::Unprocessable(_) | AppError::Database(_) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable")
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    /// HTTP status code
    pub error: u16,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            other => tracing::debug!("Request rejected: {}", other),
        }

        let (status, message) = self.status_and_message();
        let body = Json(ErrorResponse {
            success: false,
            error: status.as_u16(),
            message: message.to_string(),
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
