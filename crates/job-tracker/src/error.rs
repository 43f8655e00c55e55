use crate::applications::repository::RepositoryError;
use crate::applications::service::ApplicationServiceError;
use crate::applications::validation::{FieldError, ValidationErrors};
use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;

const VALIDATION_MESSAGE: &str = "One or more validation errors occurred.";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred.";

/// Every failure that can reach the HTTP boundary or the process entry point.
///
/// [`IntoResponse`] on this type is the only place failures become status codes.
#[derive(Debug)]
pub enum AppError {
    Validation(ValidationErrors),
    InvalidArgument(String),
    NotFound(String),
    Repository(RepositoryError),
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
}

/// JSON body written for every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub details: Option<Vec<FieldError>>,
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Repository(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing body. Unclassified failures never expose their internal message.
    pub fn body(&self) -> ErrorBody {
        let status = self.status_code().as_u16();
        match self {
            AppError::Validation(errors) => ErrorBody {
                status,
                error: VALIDATION_MESSAGE.to_string(),
                details: Some(errors.errors().to_vec()),
            },
            AppError::InvalidArgument(message) | AppError::NotFound(message) => ErrorBody {
                status,
                error: message.clone(),
                details: None,
            },
            _ => ErrorBody {
                status,
                error: UNEXPECTED_MESSAGE.to_string(),
                details: None,
            },
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(err) => write!(f, "validation failed: {}", err),
            AppError::InvalidArgument(message) => write!(f, "invalid argument: {}", message),
            AppError::NotFound(message) => write!(f, "not found: {}", message),
            AppError::Repository(err) => write!(f, "repository error: {}", err),
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Validation(err) => Some(err),
            AppError::Repository(err) => Some(err),
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::InvalidArgument(_) | AppError::NotFound(_) => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "unhandled failure while processing request");
        } else {
            tracing::debug!(error = %self, %status, "request rejected");
        }

        (status, Json(self.body())).into_response()
    }
}

impl From<ApplicationServiceError> for AppError {
    fn from(value: ApplicationServiceError) -> Self {
        match value {
            ApplicationServiceError::InvalidArgument(message) => Self::InvalidArgument(message),
            ApplicationServiceError::NotFound(message) => Self::NotFound(message),
            ApplicationServiceError::Repository(err) => Self::Repository(err),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Repository(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}
