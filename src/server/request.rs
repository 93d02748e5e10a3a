//! Query parameter resolution.

use std::collections::HashMap;

use thiserror::Error;

use crate::capture::{CaptureOptions, DrcMode, ExposureMode};

/// What a page request asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Capture(CaptureOptions),
    /// Any command other than `capture`; renders the page without side effects.
    Unknown(String),
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

/// Resolve query parameters into a [`Command`].
///
/// Missing or empty parameters take their defaults (`command=capture`,
/// `drc=low`, `ex=auto`, `width=1024`, `height=768`). Dimensions that do not
/// parse are treated as 0 and corrected by [`CaptureOptions::new`].
pub fn resolve(params: &HashMap<String, String>) -> Result<Command, RequestError> {
    let command = param(params, "command", "capture");
    if command != "capture" {
        return Ok(Command::Unknown(command.to_string()));
    }

    let drc = param(params, "drc", "low")
        .parse::<DrcMode>()
        .map_err(|reason| RequestError::InvalidParameter { name: "drc", reason })?;
    let exposure = param(params, "ex", "auto")
        .parse::<ExposureMode>()
        .map_err(|reason| RequestError::InvalidParameter { name: "ex", reason })?;
    let width = param(params, "width", "1024").parse::<i64>().unwrap_or(0);
    let height = param(params, "height", "768").parse::<i64>().unwrap_or(0);

    Ok(Command::Capture(CaptureOptions::new(
        drc, exposure, width, height,
    )))
}

/// Collapse repeated query keys, keeping the first value of each.
pub fn first_values(pairs: Vec<(String, String)>) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for (key, value) in pairs {
        params.entry(key).or_insert(value);
    }
    params
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str, default: &'a str) -> &'a str {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .unwrap_or(default)
}
