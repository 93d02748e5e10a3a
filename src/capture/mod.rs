//! Still capture for stillcam.
//!
//! This module provides:
//! - Command construction for the capture utility (local or over ssh)
//! - Timestamped capture files in the working directory
//! - The `last.jpg` alias and count-based pruning
//! - A shared service that runs captures off the async runtime

pub mod command;
pub mod dependencies;
pub mod file;
pub mod options;
pub mod retention;
pub mod types;

mod manager;
mod pipeline;

pub use dependencies::{CaptureInvoker, ProcessInvoker};
pub use manager::CaptureService;
pub use options::{CaptureOptions, DrcMode, ExposureMode};
pub use types::{CaptureError, CaptureStatus, MaterializeError, RetentionError};
