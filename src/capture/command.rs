//! Command line construction for the still capture utility.

use std::fmt;
use std::process::Command;

use super::options::CaptureOptions;
use crate::config::CameraConfig;

/// A fully resolved program invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl CaptureCommand {
    /// Build the invocation for `options`.
    ///
    /// The capture binary writes a JPEG to stdout. When `camera.remote` is set
    /// the whole local command is run through the ssh binary on that host, with
    /// the argument order unchanged.
    pub fn build(camera: &CameraConfig, options: &CaptureOptions) -> Self {
        let local_args = vec![
            "-ex".to_string(),
            options.exposure.as_str().to_string(),
            "-drc".to_string(),
            options.drc.as_str().to_string(),
            "-q".to_string(),
            camera.quality.to_string(),
            "-w".to_string(),
            options.width().to_string(),
            "-h".to_string(),
            options.height().to_string(),
            "-e".to_string(),
            "jpg".to_string(),
            "--nopreview".to_string(),
            "-t".to_string(),
            camera.delay_ms.to_string(),
            "-o".to_string(),
            "-".to_string(),
        ];

        match camera.remote_target() {
            Some(remote) => {
                let mut args = Vec::with_capacity(local_args.len() + 2);
                args.push(remote.to_string());
                args.push(camera.binary.clone());
                args.extend(local_args);
                Self {
                    program: camera.ssh_binary.clone(),
                    args,
                }
            }
            None => Self {
                program: camera.binary.clone(),
                args: local_args,
            },
        }
    }

    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

impl fmt::Display for CaptureCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
