//! Error types for the CLI runtime.

use std::io;
use std::sync::Arc;

use tabula_client::ClientError;
use tabula_config::ConnectionParseError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error("invalid server address: {0}")]
    Server(#[from] ConnectionParseError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("request failed: {0}")]
    Client(#[from] ClientError),
    #[error("failed to serialise table: {0}")]
    SerialiseTable(serde_json::Error),
    #[error("failed to write output: {0}")]
    WriteOutput(io::Error),
}
