//! Upload records from real files, for tests and command-line tooling.
//!
//! [`upload_from_file`] plays the part of the multipart parser: it sniffs the
//! file's MIME type, copies the bytes into a fresh temp file and produces a
//! record with a clean transport status, which then goes through the normal
//! rule chain. Filesystem problems are returned as [`FixtureError`]s because
//! they mean the environment is broken, not that the data is invalid.
use std::env;
use std::fs::File;
use std::io;
use std::path::Path;

use tracing::debug;

use crate::codes::UPLOAD_OK;
use crate::config::ValidationOptions;
use crate::error::FixtureError;
use crate::types::{Upload, UploadRecord};
use crate::validate::validate_record;

/// Prefix of the temp files created for fixtures.
pub const TEMP_PREFIX: &str = "upload_test";

/// MIME type reported for zero-byte files.
pub const EMPTY_MIME: &str = "application/x-empty";

const FALLBACK_MIME: &str = "application/octet-stream";

/// Builds an upload from the file at `path` and validates it.
///
/// The returned record's temp location is a kept temp file; the caller owns
/// it and should move or delete it.
///
/// ```rust,no_run
/// use file_upload::{upload_from_file, Upload, ValidationOptions};
///
/// let upload = upload_from_file("tests/data/photo.jpg", &ValidationOptions::default())?;
/// if let Upload::Valid(upload) = upload {
///     assert!(upload.is_image());
/// }
/// # Ok::<(), file_upload::FixtureError>(())
/// ```
pub fn upload_from_file(
    path: impl AsRef<Path>,
    options: &ValidationOptions,
) -> Result<Upload, FixtureError> {
    upload_from_file_in(path, env::temp_dir(), options)
}

/// Same as [`upload_from_file`], but writes the temp copy into `temp_dir`.
pub fn upload_from_file_in(
    path: impl AsRef<Path>,
    temp_dir: impl AsRef<Path>,
    options: &ValidationOptions,
) -> Result<Upload, FixtureError> {
    let path = path.as_ref();
    // Anything that cannot be stat'ed is treated as absent.
    let metadata = match path.metadata() {
        Ok(metadata) => metadata,
        Err(_) => return Err(FixtureError::FileNotFound(path.to_path_buf())),
    };
    // Only regular files have content to sniff.
    if !metadata.is_file() {
        return Err(FixtureError::MimeDetection(path.to_path_buf()));
    }

    let size = metadata.len();
    let mime =
        detect_mime(path, size).map_err(|_| FixtureError::MimeDetection(path.to_path_buf()))?;
    let temp_location = copy_to_temp(path, temp_dir.as_ref())
        .map_err(|_| FixtureError::TempFile(path.to_path_buf()))?;

    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(
        source = %path.display(),
        temp = %temp_location,
        mime = %mime,
        size,
        "fixture_created"
    );

    let record = UploadRecord::new(name, mime, size, temp_location, UPLOAD_OK);
    Ok(validate_record(record, options))
}

/// Content sniffing first, then the extension, then a generic binary type.
fn detect_mime(path: &Path, size: u64) -> io::Result<String> {
    if size == 0 {
        return Ok(EMPTY_MIME.to_string());
    }

    if let Some(kind) = infer::get_from_path(path)? {
        return Ok(kind.mime_type().to_string());
    }

    let guessed = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(FALLBACK_MIME);
    Ok(guessed.to_string())
}

fn copy_to_temp(path: &Path, temp_dir: &Path) -> io::Result<String> {
    let mut temp = tempfile::Builder::new()
        .prefix(TEMP_PREFIX)
        .tempfile_in(temp_dir)?;
    let mut source = File::open(path)?;
    io::copy(&mut source, temp.as_file_mut())?;

    let (_, kept) = temp.keep().map_err(|err| err.error)?;
    Ok(kept.to_string_lossy().into_owned())
}
