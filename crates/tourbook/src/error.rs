use crate::catalog::CatalogImportError;
use crate::config::ConfigError;
use crate::site::RegistryError;
use crate::store::SourceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Failures while starting or running the service.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Registry(RegistryError),
    Import(CatalogImportError),
    Source(SourceError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Registry(err) => write!(f, "content registry error: {}", err),
            AppError::Import(err) => write!(f, "catalog import error: {}", err),
            AppError::Source(err) => write!(f, "data source error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Registry(err) => Some(err),
            AppError::Import(err) => Some(err),
            AppError::Source(err) => Some(err),
        }
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

impl From<RegistryError> for AppError {
    fn from(value: RegistryError) -> Self {
        Self::Registry(value)
    }
}

impl From<CatalogImportError> for AppError {
    fn from(value: CatalogImportError) -> Self {
        Self::Import(value)
    }
}

impl From<SourceError> for AppError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

/// Request-level failures surfaced by route handlers.
#[derive(Debug)]
pub enum SiteError {
    NotFound { what: &'static str, key: String },
    Validation(String),
    Upstream(SourceError),
}

impl SiteError {
    pub fn not_found(what: &'static str, key: impl Into<String>) -> Self {
        Self::NotFound {
            what,
            key: key.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            SiteError::NotFound { .. } => StatusCode::NOT_FOUND,
            SiteError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            SiteError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl fmt::Display for SiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteError::NotFound { what, key } if key.is_empty() => write!(f, "{what} not found"),
            SiteError::NotFound { what, key } => write!(f, "{what} '{key}' not found"),
            SiteError::Validation(message) => f.write_str(message),
            SiteError::Upstream(err) => write!(f, "upstream failure: {err}"),
        }
    }
}

impl std::error::Error for SiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SiteError::Upstream(err) => Some(err),
            SiteError::NotFound { .. } | SiteError::Validation(_) => None,
        }
    }
}

impl From<SourceError> for SiteError {
    fn from(value: SourceError) -> Self {
        Self::Upstream(value)
    }
}

impl IntoResponse for SiteError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
