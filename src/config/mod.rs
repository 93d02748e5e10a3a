//! Configuration file support for stillcam.
//!
//! Settings are read once at startup from `~/.config/stillcam/config.toml` (or
//! the file given with `--config`), then command line flags are applied on top.
//! The resulting [`Config`] is never modified afterwards.
//!
//! If no config file exists, defaults are used.

pub mod types;

pub use types::{CameraConfig, ServerConfig, StorageConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration, deserialized from TOML.
///
/// # Example TOML
/// ```toml
/// [server]
/// listen = ":9001"
/// prefix = "/camera/"
///
/// [storage]
/// directory = "/var/www/camera"
/// retention = 1000
///
/// [camera]
/// remote = "pi@192.168.1.103"
/// quality = 80
/// serialize = true
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub storage: StorageConfig,

    #[serde(default)]
    pub camera: CameraConfig,
}

/// Values given on the command line; `None` keeps the file value.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub prefix: Option<String>,
    pub directory: Option<PathBuf>,
    pub remote: Option<String>,
}

impl Config {
    /// Clamps values to acceptable ranges, logging a warning for each fix.
    fn validate_and_clamp(&mut self) {
        if !(1..=100).contains(&self.camera.quality) {
            log::warn!(
                "Invalid quality {}, clamping to 1-100 range",
                self.camera.quality
            );
            self.camera.quality = self.camera.quality.clamp(1, 100);
        }

        if self.storage.retention == 0 {
            log::warn!("Invalid retention 0, keeping at least 1 capture");
            self.storage.retention = 1;
        }

        if self.camera.binary.trim().is_empty() {
            log::warn!("Empty camera binary, falling back to 'raspistill'");
            self.camera.binary = types::default_binary();
        }

        if self.camera.ssh_binary.trim().is_empty() {
            log::warn!("Empty ssh binary, falling back to 'ssh'");
            self.camera.ssh_binary = types::default_ssh_binary();
        }
    }

    /// Returns the default configuration file path.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("stillcam");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from `path`, or from the default location.
    ///
    /// A missing file at the default location yields defaults; a missing file
    /// that was named explicitly is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::get_config_path() {
                Ok(path) if path.exists() => path,
                Ok(path) => {
                    info!("Config file not found, using defaults");
                    debug!("Expected config at: {}", path.display());
                    return Ok(Self::default());
                }
                Err(e) => {
                    info!("{e}, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let config_str = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Applies command line values on top of the loaded file.
    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if let Some(prefix) = overrides.prefix {
            self.server.prefix = prefix;
        }
        if let Some(directory) = overrides.directory {
            self.storage.directory = directory;
        }
        if let Some(remote) = overrides.remote {
            self.camera.remote = remote;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_document_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.server.listen, ":9001");
        assert_eq!(config.server.prefix, "");
        assert_eq!(config.storage.directory, PathBuf::from("/var/www"));
        assert_eq!(config.storage.retention, 1000);
        assert_eq!(config.camera.binary, "raspistill");
        assert_eq!(config.camera.quality, 80);
        assert!(config.camera.serialize);
        assert!(config.camera.remote_target().is_none());
    }

    #[test]
    fn partial_sections_fill_in_defaults() {
        let config = Config::from_toml(
            r#"
            [camera]
            remote = "pi@camera.local"

            [storage]
            retention = 20
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.remote_target(), Some("pi@camera.local"));
        assert_eq!(config.camera.ssh_binary, "ssh");
        assert_eq!(config.storage.retention, 20);
        assert_eq!(config.storage.directory, PathBuf::from("/var/www"));
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [storage]
            retention = 0

            [camera]
            quality = 0
            binary = ""
            "#,
        )
        .unwrap();
        assert_eq!(config.storage.retention, 1);
        assert_eq!(config.camera.quality, 1);
        assert_eq!(config.camera.binary, "raspistill");

        let config = Config::from_toml("[camera]\nquality = 250\n").unwrap();
        assert_eq!(config.camera.quality, 100);
    }

    #[test]
    fn invalid_toml_is_rejected() {
        assert!(Config::from_toml("[camera\nquality = 1").is_err());
        assert!(Config::from_toml("[camera]\nquality = \"high\"").is_err());
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::from_toml("[server]\nprefix = \"/old/\"\n").unwrap();
        config.apply_overrides(ConfigOverrides {
            listen: Some("127.0.0.1:8080".into()),
            prefix: None,
            directory: Some(PathBuf::from("/tmp/cam")),
            remote: Some("pi@host".into()),
        });
        assert_eq!(config.server.listen, "127.0.0.1:8080");
        assert_eq!(config.server.prefix, "/old/");
        assert_eq!(config.storage.directory, PathBuf::from("/tmp/cam"));
        assert_eq!(config.camera.remote, "pi@host");
    }

    #[test]
    fn bind_address_expands_port_only_form() {
        let mut server = ServerConfig::default();
        assert_eq!(server.bind_address(), "0.0.0.0:9001");
        server.listen = "localhost:80".into();
        assert_eq!(server.bind_address(), "localhost:80");
    }

    #[test]
    fn load_reads_explicit_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[server]\nlisten = \":9100\"\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.server.listen, ":9100");
    }

    #[test]
    fn load_fails_for_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let err = Config::load(Some(&temp.path().join("absent.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
