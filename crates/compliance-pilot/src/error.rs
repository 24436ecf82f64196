use crate::assistant::{AssistantError, RepositoryError, ResponseTableError, SessionError};
use crate::config::ConfigError;
use crate::roles::{DirectoryError, UnknownRole};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    RoleDirectory(DirectoryError),
    ResponseTable(ResponseTableError),
    Role(UnknownRole),
    Assistant(AssistantError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::RoleDirectory(err) => write!(f, "role directory error: {}", err),
            AppError::ResponseTable(err) => write!(f, "response table error: {}", err),
            AppError::Role(err) => write!(f, "{}", err),
            AppError::Assistant(err) => write!(f, "assistant error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::RoleDirectory(err) => Some(err),
            AppError::ResponseTable(err) => Some(err),
            AppError::Role(err) => Some(err),
            AppError::Assistant(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Role(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Assistant(AssistantError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Assistant(
                AssistantError::Repository(RepositoryError::Conflict)
                | AssistantError::Session(SessionError::ReplyPending),
            ) => StatusCode::CONFLICT,
            AppError::Assistant(_)
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::RoleDirectory(_)
            | AppError::ResponseTable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
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

impl From<DirectoryError> for AppError {
    fn from(value: DirectoryError) -> Self {
        Self::RoleDirectory(value)
    }
}

impl From<ResponseTableError> for AppError {
    fn from(value: ResponseTableError) -> Self {
        Self::ResponseTable(value)
    }
}

impl From<UnknownRole> for AppError {
    fn from(value: UnknownRole) -> Self {
        Self::Role(value)
    }
}

impl From<AssistantError> for AppError {
    fn from(value: AssistantError) -> Self {
        Self::Assistant(value)
    }
}
