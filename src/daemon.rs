use std::future::Future;
use std::thread;

use anyhow::{Context, Result};
use log::{info, warn};
use signal_hook::consts::signal::{SIGINT, SIGTERM};
use signal_hook::iterator::Signals;
use tokio::sync::oneshot;

/// Future that resolves on the first SIGINT or SIGTERM.
///
/// Signals are read on a dedicated thread which lives until process exit.
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    let mut signals =
        Signals::new([SIGTERM, SIGINT]).context("Failed to register signal handler")?;
    let (tx, rx) = oneshot::channel::<()>();

    thread::Builder::new()
        .name("stillcam-signals".into())
        .spawn(move || {
            if let Some(sig) = signals.forever().next() {
                info!(
                    "Received {} - initiating graceful shutdown",
                    if sig == SIGTERM { "SIGTERM" } else { "SIGINT" }
                );
                if tx.send(()).is_err() {
                    warn!("Server already stopped");
                }
            }
        })
        .context("Failed to spawn signal thread")?;

    Ok(async move {
        let _ = rx.await;
    })
}
