use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::{sync::Mutex, task};

use crate::capture::{
    dependencies::{CaptureInvoker, ProcessInvoker},
    options::CaptureOptions,
    pipeline::{CaptureRequest, perform_capture},
    types::{CaptureError, CaptureStatus, MaterializeError},
};
use crate::config::Config;

/// Shared entry point for captures, cloned into every request handler.
///
/// The capture process blocks, so the pipeline runs on Tokio's blocking pool.
/// With `serialize` enabled a single-slot gate keeps captures from overlapping
/// on the camera.
#[derive(Clone)]
pub struct CaptureService {
    invoker: Arc<dyn CaptureInvoker>,
    directory: PathBuf,
    gate: Option<Arc<Mutex<()>>>,
    status: Arc<Mutex<CaptureStatus>>,
}

impl CaptureService {
    /// Create a service that runs the configured capture binary.
    pub fn new(config: &Config) -> Self {
        Self::with_invoker(
            config.storage.directory.clone(),
            config.camera.serialize,
            Arc::new(ProcessInvoker::new(config.camera.clone())),
        )
    }

    /// Create a service with a custom invoker (useful for testing).
    pub fn with_invoker(
        directory: PathBuf,
        serialize: bool,
        invoker: Arc<dyn CaptureInvoker>,
    ) -> Self {
        Self {
            invoker,
            directory,
            gate: serialize.then(|| Arc::new(Mutex::new(()))),
            status: Arc::new(Mutex::new(CaptureStatus::default())),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Run one capture and return the path of the new file.
    ///
    /// On failure the error carries the path of the partially written file, if
    /// one was created. The gate slot is held by the blocking task until the
    /// capture finishes, even if the caller stops waiting.
    pub async fn capture(&self, options: CaptureOptions) -> Result<PathBuf, MaterializeError> {
        let slot = match &self.gate {
            Some(gate) => Some(Arc::clone(gate).lock_owned().await),
            None => None,
        };

        let request = CaptureRequest {
            directory: self.directory.clone(),
            options,
        };
        let invoker = Arc::clone(&self.invoker);
        let status = Arc::clone(&self.status);

        task::spawn_blocking(move || {
            let result = perform_capture(&request, invoker.as_ref());
            record(&mut status.blocking_lock(), &result);
            drop(slot);
            result
        })
        .await
        .unwrap_or_else(|e| {
            log::error!("Capture task failed: {}", e);
            Err(MaterializeError::without_path(CaptureError::Join(
                e.to_string(),
            )))
        })
    }

    /// Snapshot of the capture counters.
    pub async fn status(&self) -> CaptureStatus {
        self.status.lock().await.clone()
    }
}

fn record(status: &mut CaptureStatus, result: &Result<PathBuf, MaterializeError>) {
    match result {
        Ok(path) => {
            status.captures_ok += 1;
            status.last_capture = Some(path.clone());
        }
        Err(e) => {
            log::error!("Capture failed: {}", e);
            status.captures_failed += 1;
        }
    }
    log::debug!(
        "Capture totals: {} ok, {} failed",
        status.captures_ok,
        status.captures_failed
    );
}
