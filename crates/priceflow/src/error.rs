use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::pricing::{ArtifactError, FeatureError};
use crate::telemetry::TelemetryError;
use crate::trend::DatasetError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

/// Bootstrap-level failure. Everything here is fatal: the process reports
/// the error and exits rather than serving in a degraded state.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Artifacts(ArtifactError),
    Dataset(DatasetError),
    Catalog(CatalogError),
    Pricing(FeatureError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Artifacts(err) => write!(f, "artifact error: {}", err),
            AppError::Dataset(err) => write!(f, "stock dataset error: {}", err),
            AppError::Catalog(err) => write!(f, "catalog error: {}", err),
            AppError::Pricing(err) => write!(f, "pricing error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Artifacts(err) => Some(err),
            AppError::Dataset(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Pricing(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Pricing(FeatureError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Artifacts(_)
            | AppError::Dataset(_)
            | AppError::Catalog(_)
            | AppError::Pricing(FeatureError::Schema(_)) => StatusCode::INTERNAL_SERVER_ERROR,
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

impl From<ArtifactError> for AppError {
    fn from(value: ArtifactError) -> Self {
        Self::Artifacts(value)
    }
}

impl From<DatasetError> for AppError {
    fn from(value: DatasetError) -> Self {
        Self::Dataset(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<FeatureError> for AppError {
    fn from(value: FeatureError) -> Self {
        Self::Pricing(value)
    }
}
