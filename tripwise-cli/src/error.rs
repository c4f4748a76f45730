//! Error types emitted by the Tripwise CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;
use tripwise_core::{MatrixError, ScheduleError};
use tripwise_data::ProviderBuildError;

/// Errors emitted by the Tripwise CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        field: &'static str,
        path: Utf8PathBuf,
    },
    /// A referenced input file could not be read.
    #[error("failed to read {field} at {path:?}: {source}")]
    ReadSource {
        field: &'static str,
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The trip request JSON could not be decoded.
    #[error("failed to parse schedule request JSON at {path:?}: {source}")]
    ParseRequest {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The matrix file is not a JSON array of integer rows.
    #[error("failed to parse travel time matrix JSON at {path:?}: {source}")]
    ParseMatrix {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// The matrix file decoded but is not a square matrix.
    #[error("travel time matrix at {path:?} is malformed: {source}")]
    InvalidMatrix {
        path: Utf8PathBuf,
        #[source]
        source: MatrixError,
    },
    /// Constructing the routing service client failed.
    #[error("failed to build travel time provider for {base_url:?}: {source}")]
    BuildTravelTimeProvider {
        base_url: String,
        #[source]
        source: ProviderBuildError,
    },
    /// Planning the schedule failed.
    #[error("scheduling failed: {0}")]
    Schedule(#[from] ScheduleError),
    /// Serialising the schedule failed.
    #[error("failed to serialise schedule: {0}")]
    SerialiseSchedule(#[source] serde_json::Error),
    /// Writing the schedule to stdout failed.
    #[error("failed to write schedule output: {0}")]
    WriteOutput(#[source] std::io::Error),
    /// Writing the schedule to a file failed.
    #[error("failed to write schedule to {path:?}: {source}")]
    WriteOutputFile {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
}
