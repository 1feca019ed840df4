//! Upload validation layer
//!
//! This is where a file submitted through a multipart form gets checked
//! before anything persists it. The multipart parser hands us loosely typed
//! fields; we hand back either a [`ValidUpload`] that can be moved to
//! permanent storage or an [`ErrorUpload`] that says what went wrong.
//!
//! ## What we do here
//!
//! - **Check structure** - All five parser fields must be present and typed.
//! - **Respect the transport status** - A half-arrived file is never judged on
//!   size, type or extension; it gets the canonical sentence for its code.
//! - **Enforce policy** - Max size, allowed declared types, allowed
//!   extensions, in that order. First failure wins.
//! - **Move safely** - The move strategy is passed in, so request handlers can
//!   insist on registered temp files while tests use a plain rename.
//! - **Log outcomes** - One structured `tracing` event per validation.
//!
//! ## Main entry point
//!
//! Call [`validate`] with the raw fields and [`ValidationOptions`], then
//! match on the returned [`Upload`].
//!
//! ## Example
//!
//! ```
//! use file_upload::{validate, Upload, ValidationOptions};
//! use serde_json::json;
//!
//! let options = ValidationOptions {
//!     allowed_extensions: Some(vec!["png".into()]),
//!     ..Default::default()
//! };
//! let raw = json!({
//!     "name": "a.jpg",
//!     "type": "image/jpeg",
//!     "size": 1024,
//!     "tmp_name": "/tmp/x",
//!     "error": 0
//! });
//!
//! match validate(raw.as_object().unwrap(), &options) {
//!     Upload::Valid(_) => unreachable!(),
//!     Upload::Error(err) => {
//!         assert_eq!(err.message(), Some("File extension jpg is not allowed"));
//!     }
//! }
//! ```
mod codes;
mod config;
mod error;
#[cfg(feature = "fixture")]
mod fixture;
mod mover;
mod types;
mod validate;

pub use crate::codes::{UPLOAD_OK, UploadErrorCode, message_for_code};
pub use crate::config::ValidationOptions;
pub use crate::error::{ConfigError, FixtureError};
#[cfg(feature = "fixture")]
pub use crate::fixture::{EMPTY_MIME, TEMP_PREFIX, upload_from_file, upload_from_file_in};
pub use crate::mover::{RenameMover, UploadMover, UploadRegistry, UploadedFileMover};
pub use crate::types::{
    ErrorUpload, FIELD_ERROR, FIELD_NAME, FIELD_SIZE, FIELD_TMP_NAME, FIELD_TYPE, Upload,
    UploadRecord, ValidUpload, extension_of,
};
pub use crate::validate::{INVALID_STRUCTURE_MESSAGE, validate, validate_record};
