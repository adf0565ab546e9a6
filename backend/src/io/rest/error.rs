//! Translation of domain errors into HTTP responses.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use shared::ErrorResponse;
use thiserror::Error;
use tracing::{error, warn};

use crate::domain::DomainError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::MalformedBody(message) => {
                warn!("Rejected request body: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(format!("Malformed request body: {message}")),
                )
            }
            ApiError::Domain(DomainError::InvalidArgument(message)) => {
                warn!("Invalid request: {}", message);
                (StatusCode::BAD_REQUEST, ErrorResponse::new(message))
            }
            ApiError::Domain(DomainError::NotFound(message)) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(message))
            }
            ApiError::Domain(DomainError::Internal { message, details }) => {
                error!("Internal error: {} ({:?})", message, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse { error: message, details },
                )
            }
            ApiError::Domain(DomainError::Storage(e)) => {
                error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
