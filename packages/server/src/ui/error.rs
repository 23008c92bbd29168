//! Error responses and server start-up errors.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    domain::{RepositoryError, ValueObjectError},
    infrastructure::dto::http::MessageResponseDto,
    usecase::{AuthError, ConnectError, SendMessageError},
};

/// Error returned by HTTP handlers, rendered as `{ "message": ... }`
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        } else {
            tracing::debug!(status = %status, error = %self, "Request rejected");
        }
        let body = MessageResponseDto {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<ValueObjectError> for ApiError {
    fn from(error: ValueObjectError) -> Self {
        ApiError::BadRequest(error.to_string())
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        match error {
            RepositoryError::UserAlreadyExists(_) => ApiError::Conflict(error.to_string()),
            RepositoryError::UserNotFound(_) => ApiError::NotFound(error.to_string()),
            RepositoryError::SessionNotFound => ApiError::Unauthorized(error.to_string()),
            RepositoryError::MessageCapacityExceeded { .. } | RepositoryError::Unavailable(_) => {
                ApiError::Unavailable(error.to_string())
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidInput(e) => e.into(),
            AuthError::EmailTaken(_) => ApiError::Conflict("Email already exists".to_string()),
            AuthError::UnknownEmail => ApiError::BadRequest("Invalid credentials".to_string()),
            AuthError::InvalidSession => {
                ApiError::Unauthorized("Unauthorized - invalid or expired session".to_string())
            }
            AuthError::Repository(e) => e.into(),
        }
    }
}

impl From<SendMessageError> for ApiError {
    fn from(error: SendMessageError) -> Self {
        match error {
            SendMessageError::Validation(e) => e.into(),
            SendMessageError::Persistence(e) => ApiError::Unavailable(e.to_string()),
        }
    }
}

impl From<ConnectError> for ApiError {
    fn from(error: ConnectError) -> Self {
        ApiError::Unauthorized(error.to_string())
    }
}

/// Errors that stop the server from starting or serving
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid CORS origin: {0}")]
    InvalidCorsOrigin(String),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}
