use std::{fmt, path::PathBuf};

use crate::capture::{
    dependencies::CaptureInvoker,
    file::materialize,
    options::CaptureOptions,
    retention,
    types::MaterializeError,
};

#[derive(Clone)]
pub(crate) struct CaptureRequest {
    pub(crate) directory: PathBuf,
    pub(crate) options: CaptureOptions,
}

impl fmt::Debug for CaptureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaptureRequest")
            .field("directory", &self.directory.display())
            .field("drc", &self.options.drc.as_str())
            .field("exposure", &self.options.exposure.as_str())
            .field("width", &self.options.width())
            .field("height", &self.options.height())
            .finish()
    }
}

/// Materialize one capture and repoint the alias at it.
///
/// Alias failures are logged; they never fail a capture that was written.
pub(crate) fn perform_capture(
    request: &CaptureRequest,
    invoker: &dyn CaptureInvoker,
) -> Result<PathBuf, MaterializeError> {
    log::info!("Starting capture: {:?}", request);

    let path = materialize(&request.directory, &request.options, invoker)?;

    if let Err(e) = retention::promote(&path) {
        log::warn!("Capture saved but alias not updated: {}", e);
    }

    Ok(path)
}
