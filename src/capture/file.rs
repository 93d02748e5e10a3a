//! Capture file creation.

use super::dependencies::CaptureInvoker;
use super::options::CaptureOptions;
use super::types::{CaptureError, MaterializeError};
use chrono::Local;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// File name prefix shared by every capture.
pub const CAPTURE_PREFIX: &str = "img-";
/// File name suffix shared by every capture.
pub const CAPTURE_SUFFIX: &str = ".jpg";
/// Chrono template for the timestamp part of a capture name.
pub const FILENAME_TEMPLATE: &str = "img-%Y%m%d_%H%M%S";

/// Generate a filename based on the template and current time.
///
/// # Arguments
/// * `template` - Template string with chrono format specifiers
/// * `format` - File extension (e.g., "jpg")
pub fn generate_filename(template: &str, format: &str) -> String {
    let now = Local::now();
    let filename = now.format(template).to_string();
    format!("{}.{}", filename, format)
}

/// Whether `name` looks like a capture produced by [`materialize`].
pub fn is_capture_name(name: &str) -> bool {
    name.len() > CAPTURE_PREFIX.len() + CAPTURE_SUFFIX.len()
        && name.starts_with(CAPTURE_PREFIX)
        && name.ends_with(CAPTURE_SUFFIX)
}

/// Ensure the working directory exists, creating it if necessary.
///
/// Returns the canonicalized path when it can be resolved.
pub fn ensure_directory_exists(directory: &Path) -> io::Result<PathBuf> {
    if !directory.exists() {
        log::info!("Creating capture directory: {}", directory.display());
        fs::create_dir_all(directory)?;
    }

    let canonical = directory
        .canonicalize()
        .unwrap_or_else(|_| directory.to_path_buf());

    Ok(canonical)
}

/// Create a timestamped capture file in `directory` and fill it through `invoker`.
///
/// Two captures within the same second share a name; the later one truncates
/// the earlier file.
pub fn materialize(
    directory: &Path,
    options: &CaptureOptions,
    invoker: &dyn CaptureInvoker,
) -> Result<PathBuf, MaterializeError> {
    let path = directory.join(generate_filename(FILENAME_TEMPLATE, "jpg"));

    let mut file = File::create(&path).map_err(|source| {
        MaterializeError::without_path(CaptureError::FileCreate {
            path: path.clone(),
            source,
        })
    })?;

    log::debug!(
        "Writing {}x{} capture to {}",
        options.width(),
        options.height(),
        path.display()
    );

    let result = invoker
        .invoke(options, &mut file)
        .and_then(|()| file.sync_all().map_err(CaptureError::SinkWrite));
    drop(file);

    match result {
        Ok(()) => {
            if let Ok(meta) = fs::metadata(&path) {
                log::info!("Capture saved: {} ({} bytes)", path.display(), meta.len());
            }
            Ok(path)
        }
        Err(source) => Err(MaterializeError {
            path: Some(path),
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    struct FixedInvoker {
        bytes: &'static [u8],
        fail: bool,
    }

    impl CaptureInvoker for FixedInvoker {
        fn invoke(
            &self,
            _options: &CaptureOptions,
            sink: &mut dyn Write,
        ) -> Result<(), CaptureError> {
            sink.write_all(self.bytes).map_err(CaptureError::SinkWrite)?;
            if self.fail {
                Err(CaptureError::Join("camera went away".into()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_generate_filename() {
        let filename = generate_filename(FILENAME_TEMPLATE, "jpg");
        assert!(is_capture_name(&filename), "{filename}");
        // img-YYYYMMDD_HHMMSS.jpg
        assert_eq!(filename.len(), "img-20240101_120000.jpg".len());
        assert_eq!(&filename[12..13], "_");
    }

    #[test]
    fn capture_name_filter() {
        assert!(is_capture_name("img-20240101_120000.jpg"));
        assert!(!is_capture_name("last.jpg"));
        assert!(!is_capture_name("img-.jpg"));
        assert!(!is_capture_name("img-20240101_120000.png"));
    }

    #[test]
    fn materialize_writes_invoker_output() {
        let temp = TempDir::new().unwrap();
        let invoker = FixedInvoker {
            bytes: b"\xff\xd8jpeg\xff\xd9",
            fail: false,
        };

        let path = materialize(temp.path(), &CaptureOptions::default(), &invoker).unwrap();
        assert_eq!(path.parent(), Some(temp.path()));
        assert!(is_capture_name(path.file_name().unwrap().to_str().unwrap()));
        assert_eq!(fs::read(&path).unwrap(), b"\xff\xd8jpeg\xff\xd9");
    }

    #[test]
    fn failed_capture_keeps_partial_file_and_path() {
        let temp = TempDir::new().unwrap();
        let invoker = FixedInvoker {
            bytes: b"partial",
            fail: true,
        };

        let err = materialize(temp.path(), &CaptureOptions::default(), &invoker).unwrap_err();
        let path = err.path.clone().expect("path is reported");
        assert!(path.exists());
        assert_eq!(fs::read(&path).unwrap(), b"partial");
        assert!(err.to_string().contains("camera went away"));
    }

    #[test]
    fn missing_directory_reports_no_path() {
        let temp = TempDir::new().unwrap();
        let invoker = FixedInvoker {
            bytes: b"",
            fail: false,
        };

        let err = materialize(
            &temp.path().join("missing"),
            &CaptureOptions::default(),
            &invoker,
        )
        .unwrap_err();
        assert!(err.path.is_none());
        assert!(matches!(err.source, CaptureError::FileCreate { .. }));
    }

    #[test]
    fn ensure_directory_creates_nested_path() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        let resolved = ensure_directory_exists(&nested).unwrap();
        assert!(resolved.is_dir());
    }
}
