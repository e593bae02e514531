use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::utils::{error_codes, error_to_api_response};

/// Failure of the underlying persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Error kinds surfaced by the group and post services.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("storage fault: {0}")]
    Storage(#[from] StoreError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Storage(StoreError::Database(e))
    }
}

#[derive(Debug)]
pub enum AppError {
    Service(ServiceError),
    Unauthenticated,
    DomainNotAllowed,
    RateLimited(u64),
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        AppError::Service(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, msg) = match self {
            AppError::Service(ServiceError::Validation(msg)) => {
                (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR, msg)
            }
            AppError::Service(ServiceError::NotFound(msg)) => {
                (StatusCode::NOT_FOUND, error_codes::NOT_FOUND, msg)
            }
            AppError::Service(ServiceError::Conflict(msg)) => {
                (StatusCode::CONFLICT, error_codes::CONFLICT, msg)
            }
            AppError::Service(ServiceError::Unauthorized(msg)) => {
                (StatusCode::FORBIDDEN, error_codes::PERMISSION_DENIED, msg)
            }
            AppError::Service(ServiceError::Storage(e)) => {
                tracing::error!("storage fault: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::Unauthenticated => (
                StatusCode::UNAUTHORIZED,
                error_codes::AUTH_FAILED,
                "Missing or invalid credentials".to_string(),
            ),
            AppError::DomainNotAllowed => (
                StatusCode::FORBIDDEN,
                error_codes::PERMISSION_DENIED,
                "Access restricted to college accounts".to_string(),
            ),
            AppError::Internal(msg) => {
                tracing::error!("internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    error_codes::INTERNAL_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::RateLimited(window) => (
                StatusCode::TOO_MANY_REQUESTS,
                error_codes::RATE_LIMIT,
                format!("Too many requests, retry in {} seconds", window),
            ),
        };

        (status, error_to_api_response::<()>(code, msg)).into_response()
    }
}
