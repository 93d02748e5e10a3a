//! Data types for still capture.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while producing a capture.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} failed: {status}")]
    ProcessExit { program: String, status: ExitStatus },

    #[error("Failed to write capture output: {0}")]
    SinkWrite(#[source] std::io::Error),

    #[error("Failed to create {}: {source}", .path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Capture task failed: {0}")]
    Join(String),
}

/// A failed materialization.
///
/// `path` is set when the destination file was created before the failure; the
/// file is left on disk in whatever state the capture process produced.
#[derive(Debug, Error)]
#[error("{source}")]
pub struct MaterializeError {
    pub path: Option<PathBuf>,
    #[source]
    pub source: CaptureError,
}

impl MaterializeError {
    pub(crate) fn without_path(source: CaptureError) -> Self {
        Self { path: None, source }
    }
}

/// Best-effort failures from alias maintenance and pruning.
#[derive(Debug, Error)]
pub enum RetentionError {
    #[error("Failed to update {}: {source}", .alias.display())]
    Alias {
        alias: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to list {}: {source}", .directory.display())]
    Prune {
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Running counters kept by the capture service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaptureStatus {
    pub captures_ok: u64,
    pub captures_failed: u64,
    /// Path of the most recent successful capture.
    pub last_capture: Option<PathBuf>,
}
