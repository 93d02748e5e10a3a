//! HTTP surface: axum server for the capture page and stored images.
//!
//! - `GET <path>.jpg`: the named file from the working directory
//! - `GET <any other path>?command=capture&...`: capture, then the gallery page
//! - `GET <any other path>?command=<other>`: the gallery page only

pub mod page;
pub mod request;

use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, Request, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use log::{info, warn};
use tokio::task;
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::capture::{CaptureService, retention};
use crate::config::Config;
use request::Command;

/// Shared state for request handlers.
pub struct AppState {
    pub config: Arc<Config>,
    pub service: CaptureService,
}

/// Build the router. Every path goes through one handler, as only the
/// `.jpg` suffix and the query string select behaviour.
pub fn router(state: AppState) -> Router {
    Router::new().fallback(handle).with_state(Arc::new(state))
}

/// Bind the configured address and serve until `shutdown` resolves.
pub async fn serve<F>(config: Arc<Config>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let service = CaptureService::new(&config);
    let address = config.server.bind_address();

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    info!(
        "Listening on http://{}, saving captures to {}",
        listener.local_addr().context("Listener has no address")?,
        config.storage.directory.display()
    );
    if let Some(remote) = config.camera.remote_target() {
        info!("Capturing on remote host {}", remote);
    }

    axum::serve(listener, router(AppState { config, service }))
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn handle(State(state): State<Arc<AppState>>, req: Request) -> Response {
    info!("{} {}", req.method(), req.uri());

    let segment = req.uri().path().rsplit('/').next().unwrap_or_default();
    if let Some(name) = image_name(segment) {
        return match name {
            Ok(name) => serve_image(&state, &name, req).await,
            Err(()) => StatusCode::NOT_FOUND.into_response(),
        };
    }

    let params = Query::<Vec<(String, String)>>::try_from_uri(req.uri())
        .map(|Query(pairs)| request::first_values(pairs))
        .unwrap_or_default();

    let message = match request::resolve(&params) {
        Ok(Command::Capture(options)) => match state.service.capture(options).await {
            Ok(path) => format!("Image has been saved to {}", path.display()),
            Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
        },
        Ok(Command::Unknown(command)) => format!("unknown command {command}"),
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };

    let listing = list_captures(&state).await;
    let body = page::render(
        &state.config.server.prefix,
        &message,
        listing.as_deref().map_err(String::as_str),
    );
    Html(body).into_response()
}

/// Decode the last path segment and decide whether it names an image.
///
/// `None` means the request is a page request. `Err` marks a `.jpg` name that
/// cannot be served from the working directory.
fn image_name(segment: &str) -> Option<Result<String, ()>> {
    let Some(name) = decode_segment(segment) else {
        return segment.ends_with(".jpg").then_some(Err(()));
    };
    if !name.ends_with(".jpg") {
        return None;
    }
    if name == ".jpg" || name.contains('/') || name.contains('\\') {
        return Some(Err(()));
    }
    Some(Ok(name))
}

fn decode_segment(segment: &str) -> Option<String> {
    let url = url::Url::parse(&format!("file:///{segment}")).ok()?;
    let path = url.to_file_path().ok()?;
    path.to_str()?.strip_prefix('/').map(str::to_string)
}

async fn serve_image(state: &AppState, name: &str, req: Request) -> Response {
    let path = state.service.directory().join(name);
    match ServeFile::new(path).oneshot(req).await {
        Ok(response) => response.into_response(),
        Err(never) => match never {},
    }
}

/// List the kept captures, pruning anything beyond the retention window.
async fn list_captures(state: &AppState) -> Result<Vec<String>, String> {
    let directory = state.service.directory().to_path_buf();
    let keep = state.config.storage.retention;

    match task::spawn_blocking(move || retention::prune(&directory, keep)).await {
        Ok(Ok(names)) => Ok(names),
        Ok(Err(e)) => {
            warn!("{}", e);
            Err(e.to_string())
        }
        Err(e) => {
            warn!("Listing task failed: {}", e);
            Err(e.to_string())
        }
    }
}
