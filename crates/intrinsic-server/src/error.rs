//! Error types for the intrinsic service and CLI.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use intrinsic_core::{ErrorKind, SourceError, ValidationError};
use serde::Serialize;
use thiserror::Error;

/// Request-boundary errors. Every variant renders as `{"error": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing ticker")]
    MissingTicker,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    InvalidInput(ValidationError),

    #[error("{}", .0.message())]
    Source(SourceError),

    #[error(transparent)]
    Valuation(ValidationError),
}

/// JSON body of every failed request.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingTicker | Self::InvalidRequest(_) | Self::InvalidInput(_) => ErrorKind::Data,
            Self::Source(error) => error.kind(),
            Self::Valuation(error) => error.kind(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingTicker | Self::InvalidRequest(_) | Self::InvalidInput(_) => {
                StatusCode::BAD_REQUEST
            }
            _ => match self.kind() {
                ErrorKind::Data => StatusCode::BAD_REQUEST,
                ErrorKind::Provider => StatusCode::BAD_GATEWAY,
                ErrorKind::Config => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

impl From<SourceError> for ApiError {
    fn from(error: SourceError) -> Self {
        Self::Source(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self.kind() {
            ErrorKind::Config => tracing::error!(status = status.as_u16(), error = %self, "request failed"),
            _ => tracing::warn!(
                status = status.as_u16(),
                kind = %self.kind(),
                error = %self,
                "request failed"
            ),
        }
        (status, Json(self.body())).into_response()
    }
}

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{}", .0.message())]
    Config(SourceError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Server(#[from] anyhow::Error),
}

impl From<SourceError> for CliError {
    fn from(error: SourceError) -> Self {
        Self::Config(error)
    }
}

impl CliError {
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 4,
            Self::Api(error) => match error.kind() {
                ErrorKind::Data => 2,
                ErrorKind::Provider => 3,
                ErrorKind::Config => 4,
            },
            Self::Serialization(_) => 5,
            Self::Server(_) => 10,
        }
    }
}
