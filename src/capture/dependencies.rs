use std::io::{self, BufWriter, Write};
use std::process::Stdio;

use crate::capture::{command::CaptureCommand, options::CaptureOptions, types::CaptureError};
use crate::config::CameraConfig;

/// Abstraction over how image bytes are produced. Mocked in tests.
pub trait CaptureInvoker: Send + Sync {
    /// Run one capture, writing the JPEG bytes into `sink`.
    fn invoke(&self, options: &CaptureOptions, sink: &mut dyn Write) -> Result<(), CaptureError>;
}

/// Runs the capture utility as a child process, locally or through ssh.
#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    camera: CameraConfig,
}

impl ProcessInvoker {
    pub fn new(camera: CameraConfig) -> Self {
        Self { camera }
    }
}

impl CaptureInvoker for ProcessInvoker {
    fn invoke(&self, options: &CaptureOptions, sink: &mut dyn Write) -> Result<(), CaptureError> {
        let command = CaptureCommand::build(&self.camera, options);
        log::info!("Calling {}", command);

        let mut child = command
            .to_command()
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| CaptureError::Spawn {
                program: command.program.clone(),
                source,
            })?;

        let mut writer = BufWriter::new(sink);
        let copied = match child.stdout.take() {
            Some(mut stdout) => io::copy(&mut stdout, &mut writer),
            None => Ok(0),
        };
        let copied = match copied {
            Ok(copied) => copied,
            Err(source) => {
                // The pipe is no longer drained; stop the child before reaping it.
                if let Err(e) = child.kill() {
                    log::debug!("Failed to kill {}: {}", command.program, e);
                }
                let _ = child.wait();
                let _ = writer.into_parts();
                return Err(CaptureError::SinkWrite(source));
            }
        };

        let status = child.wait().map_err(|source| CaptureError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        if !status.success() {
            // Unflushed output of a failed capture is discarded.
            let _ = writer.into_parts();
            return Err(CaptureError::ProcessExit {
                program: command.program,
                status,
            });
        }

        writer.flush().map_err(CaptureError::SinkWrite)?;
        log::debug!("{} produced {} bytes", command.program, copied);

        Ok(())
    }
}
