//! The upload decision chain.
//!
//! ```text
//! raw fields
//!     │
//!     ▼
//! ┌──────────────────────────────┐
//! │ 1. Structure                 │  all five keys, right JSON types
//! ├──────────────────────────────┤
//! │ 2. Transport error code      │  error != 0
//! ├──────────────────────────────┤
//! │ 3. Max size                  │  size > maxSize
//! ├──────────────────────────────┤
//! │ 4. Declared type             │  type ∉ allowedTypes
//! ├──────────────────────────────┤
//! │ 5. Extension                 │  ext(name) ∉ allowedExtensions
//! └──────────────────────────────┘
//!     │
//!     ▼
//! Upload::Valid | Upload::Error
//! ```
//!
//! The first failing rule decides the outcome; later rules never run.
//! Rejections are returned as [`Upload::Error`] values, never as `Err`.
use std::time::Instant;

use serde_json::{Map, Value};
use tracing::{Level, Span, info, warn};

use crate::codes::{UPLOAD_OK, UploadErrorCode};
use crate::config::ValidationOptions;
use crate::types::{
    ErrorUpload, FIELD_ERROR, FIELD_NAME, FIELD_SIZE, FIELD_TMP_NAME, FIELD_TYPE, Upload,
    UploadRecord, ValidUpload,
};

/// Message used when the raw fields cannot form a record.
pub const INVALID_STRUCTURE_MESSAGE: &str = "Invalid file data structure";

/// Validates raw upload fields against `options`.
///
/// ```rust
/// use file_upload::{validate, Upload, ValidationOptions};
/// use serde_json::json;
///
/// let raw = json!({
///     "name": "a.jpg",
///     "type": "image/jpeg",
///     "size": 1024,
///     "tmp_name": "/tmp/x",
///     "error": 0
/// });
/// let raw = raw.as_object().unwrap();
///
/// match validate(raw, &ValidationOptions::default()) {
///     Upload::Valid(upload) => {
///         assert_eq!(upload.record().extension(), Some("jpg"));
///         assert!(upload.is_image());
///     }
///     Upload::Error(upload) => panic!("rejected: {:?}", upload.message()),
/// }
/// ```
pub fn validate(raw: &Map<String, Value>, options: &ValidationOptions) -> Upload {
    let start = Instant::now();
    let name = raw
        .get(FIELD_NAME)
        .and_then(Value::as_str)
        .unwrap_or_default();
    let span = validate_span(name, options);
    let _guard = span.enter();

    match parse_record(raw) {
        Some(record) => decide(record, options, start),
        None => {
            let record = UploadRecord::new(name, "", 0, "", UploadErrorCode::NoFile.code());
            let elapsed_micros = start.elapsed().as_micros();
            warn!(
                reason = "structure",
                error_code = record.error_code(),
                elapsed_micros,
                "upload_rejected"
            );
            Upload::Error(ErrorUpload::new(
                record,
                Some(INVALID_STRUCTURE_MESSAGE.to_string()),
            ))
        }
    }
}

/// Runs the rule chain on an already typed record.
///
/// Same as [`validate`] minus the structural check.
pub fn validate_record(record: UploadRecord, options: &ValidationOptions) -> Upload {
    let start = Instant::now();
    let span = validate_span(record.name(), options);
    let _guard = span.enter();

    decide(record, options, start)
}

fn validate_span(file_name: &str, options: &ValidationOptions) -> Span {
    tracing::span!(
        Level::DEBUG,
        "upload.validate",
        file_name = %file_name,
        constrained = !options.is_unconstrained()
    )
}

/// Rule chain plus the outcome event; expects to run inside the span.
fn decide(record: UploadRecord, options: &ValidationOptions, start: Instant) -> Upload {
    match check_rules(&record, options) {
        None => {
            let elapsed_micros = start.elapsed().as_micros();
            info!(
                declared_type = %record.declared_type(),
                size = record.size(),
                extension = ?record.extension(),
                elapsed_micros,
                "upload_valid"
            );
            Upload::Valid(ValidUpload::new(record))
        }
        Some(rejection) => {
            let elapsed_micros = start.elapsed().as_micros();
            warn!(
                reason = rejection.reason(),
                error_code = record.error_code(),
                declared_type = %record.declared_type(),
                size = record.size(),
                elapsed_micros,
                "upload_rejected"
            );
            Upload::Error(ErrorUpload::new(record, rejection.into_message()))
        }
    }
}

/// Why a structurally sound record was turned down.
enum Rejection {
    Transport,
    TooLarge(u64),
    TypeNotAllowed(String),
    ExtensionNotAllowed(String),
}

impl Rejection {
    fn reason(&self) -> &'static str {
        match self {
            Rejection::Transport => "transport",
            Rejection::TooLarge(_) => "max_size",
            Rejection::TypeNotAllowed(_) => "type",
            Rejection::ExtensionNotAllowed(_) => "extension",
        }
    }

    /// `None` lets [`ErrorUpload::new`] resolve the code's sentence.
    fn into_message(self) -> Option<String> {
        match self {
            Rejection::Transport => None,
            Rejection::TooLarge(max) => Some(format!(
                "File size exceeds maximum allowed size of {max} bytes"
            )),
            Rejection::TypeNotAllowed(declared) => {
                Some(format!("File type {declared} is not allowed"))
            }
            Rejection::ExtensionNotAllowed(ext) => {
                Some(format!("File extension {ext} is not allowed"))
            }
        }
    }
}

fn check_rules(record: &UploadRecord, options: &ValidationOptions) -> Option<Rejection> {
    if record.error_code() != UPLOAD_OK {
        return Some(Rejection::Transport);
    }

    if options.is_unconstrained() {
        return None;
    }

    if let Some(max) = options.max_size {
        if record.size() > max {
            return Some(Rejection::TooLarge(max));
        }
    }

    if !options.allows_type(record.declared_type()) {
        return Some(Rejection::TypeNotAllowed(record.declared_type().to_string()));
    }

    // Derived from the name again rather than trusting any stored value.
    let extension = crate::types::extension_of(record.name());
    if !options.allows_extension(extension) {
        return Some(Rejection::ExtensionNotAllowed(
            extension.unwrap_or_default().to_string(),
        ));
    }

    None
}

/// Builds a record when every key is present, non-null and correctly typed.
fn parse_record(raw: &Map<String, Value>) -> Option<UploadRecord> {
    let name = raw.get(FIELD_NAME)?.as_str()?;
    let declared_type = raw.get(FIELD_TYPE)?.as_str()?;
    let size = raw.get(FIELD_SIZE)?.as_u64()?;
    let temp_location = raw.get(FIELD_TMP_NAME)?.as_str()?;
    let error_code = raw.get(FIELD_ERROR)?.as_i64()?;

    Some(UploadRecord::new(
        name,
        declared_type,
        size,
        temp_location,
        error_code,
    ))
}
