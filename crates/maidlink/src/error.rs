use thiserror::Error;

use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::profiles::bulk::BulkUploadError;
use crate::workflows::roster::RosterImportError;

/// Top-level failure for binaries built on this crate. Everything the
/// server and CLI can fail with converts into it via `?`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("server error: {0}")]
    Server(#[from] axum::Error),
    #[error("roster import error: {0}")]
    Roster(#[from] RosterImportError),
    #[error("bulk upload error: {0}")]
    Upload(#[from] BulkUploadError),
}
