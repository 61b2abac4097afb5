use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Every failure a handler can produce. `IntoResponse` below is the only
/// place that picks status codes.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("malformatted id")]
    InvalidIdentifier(String),
    #[error("unknown endpoint")]
    UnknownEndpoint,
    #[error("internal server error")]
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => Self::Validation(msg),
            ServiceError::NotFound(msg) => Self::NotFound(msg),
            ServiceError::InvalidIdentifier(raw) => Self::InvalidIdentifier(raw),
            ServiceError::Db(msg) => Self::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// An id segment that cannot even be decoded is as malformed as a bad UUID.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidIdentifier(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidIdentifier(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::UnknownEndpoint => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::InvalidIdentifier(raw) => warn!(id = %raw, "malformatted id"),
            Self::Internal(detail) => error!(error = %detail, "request failed"),
            _ => {}
        }
        let status = self.status();
        (status, Json(serde_json::json!({"error": self.to_string()}))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("person store unavailable: {0}")]
    Store(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
