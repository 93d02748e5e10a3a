//! "Latest capture" alias and count-based pruning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::file::is_capture_name;
use super::types::RetentionError;

/// Name of the alias that always refers to the newest successful capture.
pub const ALIAS_NAME: &str = "last.jpg";
/// Default number of captures kept by [`prune`].
pub const DEFAULT_RETENTION: usize = 1000;

/// Path of the alias that lives next to `capture`.
pub fn alias_path(capture: &Path) -> PathBuf {
    capture
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join(ALIAS_NAME)
}

/// Point the alias at `capture`, replacing any previous alias.
///
/// The old alias is removed before the new one is created, so readers may
/// briefly see no alias at all.
pub fn promote(capture: &Path) -> Result<(), RetentionError> {
    let alias = alias_path(capture);

    match fs::remove_file(&alias) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(RetentionError::Alias { alias, source }),
    }

    create_alias(capture, &alias).map_err(|source| RetentionError::Alias {
        alias: alias.clone(),
        source,
    })?;

    log::debug!("{} -> {}", alias.display(), capture.display());
    Ok(())
}

#[cfg(unix)]
fn create_alias(capture: &Path, alias: &Path) -> io::Result<()> {
    // Link by file name so the alias resolves however the directory was given.
    let target = capture.file_name().map(Path::new).unwrap_or(capture);
    std::os::unix::fs::symlink(target, alias)
}

#[cfg(not(unix))]
fn create_alias(capture: &Path, alias: &Path) -> io::Result<()> {
    fs::copy(capture, alias).map(|_| ())
}

/// Delete every capture ranked after the `keep` newest ones.
///
/// Captures are ranked by name, newest first; the timestamped names make that
/// the capture order. Returns the names that remain, newest first. A capture
/// that cannot be removed is logged and skipped.
pub fn prune(directory: &Path, keep: usize) -> Result<Vec<String>, RetentionError> {
    let list_error = |source: io::Error| RetentionError::Prune {
        directory: directory.to_path_buf(),
        source,
    };

    let mut names = Vec::new();
    for entry in fs::read_dir(directory).map_err(list_error)? {
        let entry = entry.map_err(list_error)?;
        if let Ok(name) = entry.file_name().into_string()
            && is_capture_name(&name)
        {
            names.push(name);
        }
    }

    names.sort_unstable_by(|a, b| b.cmp(a));
    let excess = names.split_off(keep.min(names.len()));

    let mut removed = 0usize;
    for name in &excess {
        let path = directory.join(name);
        match fs::remove_file(&path) {
            Ok(()) => removed += 1,
            Err(e) => log::warn!("Failed to remove old capture {}: {}", path.display(), e),
        }
    }
    if removed > 0 {
        log::info!(
            "Pruned {} capture(s) beyond the newest {} in {}",
            removed,
            keep,
            directory.display()
        );
    }

    Ok(names)
}
