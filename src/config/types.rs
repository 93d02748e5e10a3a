//! Configuration type definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address; a leading `:` (e.g. `:9001`) binds every interface
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Prefix prepended to links in the gallery page (e.g. `/camera/`)
    #[serde(default)]
    pub prefix: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            prefix: String::new(),
        }
    }
}

impl ServerConfig {
    /// Listen address in a form accepted by `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        if self.listen.starts_with(':') {
            format!("0.0.0.0{}", self.listen)
        } else {
            self.listen.clone()
        }
    }
}

/// Where captures are kept and how many.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Working directory holding `img-*.jpg` captures and the `last.jpg` alias
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Number of most recent captures kept (minimum 1)
    #[serde(default = "default_retention")]
    pub retention: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            retention: default_retention(),
        }
    }
}

/// Capture utility invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Still capture binary, run locally or on the remote host
    #[serde(default = "default_binary")]
    pub binary: String,

    /// Remote shell used when `remote` is set
    #[serde(default = "default_ssh_binary")]
    pub ssh_binary: String,

    /// `user@host` of the camera host; empty runs the capture locally
    #[serde(default)]
    pub remote: String,

    /// JPEG quality (valid range: 1 - 100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Delay before the shot in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u32,

    /// Run at most one capture at a time
    #[serde(default = "default_serialize")]
    pub serialize: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            binary: default_binary(),
            ssh_binary: default_ssh_binary(),
            remote: String::new(),
            quality: default_quality(),
            delay_ms: default_delay_ms(),
            serialize: default_serialize(),
        }
    }
}

impl CameraConfig {
    /// The remote target, if one is configured.
    pub fn remote_target(&self) -> Option<&str> {
        let remote = self.remote.trim();
        (!remote.is_empty()).then_some(remote)
    }
}

fn default_listen() -> String {
    ":9001".to_string()
}

fn default_directory() -> PathBuf {
    PathBuf::from("/var/www")
}

fn default_retention() -> usize {
    crate::capture::retention::DEFAULT_RETENTION
}

pub(super) fn default_binary() -> String {
    "raspistill".to_string()
}

pub(super) fn default_ssh_binary() -> String {
    "ssh".to_string()
}

fn default_quality() -> u8 {
    80
}

fn default_delay_ms() -> u32 {
    1
}

fn default_serialize() -> bool {
    true
}
