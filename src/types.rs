//! Core data model types for the upload crate.
//!
//! ```text
//! raw fields (serde_json::Map)
//! ├── name: string
//! ├── type: string
//! ├── size: integer
//! ├── tmp_name: string
//! └── error: integer
//!
//!         ↓ validate()
//!
//! Upload
//! ├── Valid(ValidUpload)
//! │   └── record: UploadRecord
//! └── Error(ErrorUpload)
//!     ├── record: UploadRecord
//!     └── message: Option<String>
//! ```
//!
//! Every value here is immutable once built. [`UploadRecord`] keeps its fields
//! private so the derived `extension` can never drift from `name`.
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::codes::message_for_code;
use crate::mover::UploadMover;

/// Raw field keys, in the shape the multipart parser produces.
pub const FIELD_NAME: &str = "name";
pub const FIELD_TYPE: &str = "type";
pub const FIELD_SIZE: &str = "size";
pub const FIELD_TMP_NAME: &str = "tmp_name";
pub const FIELD_ERROR: &str = "error";

/// Metadata describing one uploaded file.
///
/// All fields except `extension` are kept exactly as supplied. `extension` is
/// recomputed from `name` whenever a record is built, including on
/// deserialization.
///
/// ```rust
/// use file_upload::UploadRecord;
///
/// let record = UploadRecord::new("photo.final.JPG", "image/jpeg", 1024, "/tmp/php1a2b", 0);
/// assert_eq!(record.extension(), Some("JPG"));
///
/// let bare = UploadRecord::new("README", "text/plain", 10, "/tmp/php3c4d", 0);
/// assert_eq!(bare.extension(), None);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RecordFields")]
pub struct UploadRecord {
    name: String,
    #[serde(rename = "type")]
    declared_type: String,
    size: u64,
    #[serde(rename = "tmp_name")]
    temp_location: String,
    #[serde(rename = "error")]
    error_code: i64,
    extension: Option<String>,
}

#[derive(Deserialize)]
struct RecordFields {
    name: String,
    #[serde(rename = "type")]
    declared_type: String,
    size: u64,
    #[serde(rename = "tmp_name")]
    temp_location: String,
    #[serde(rename = "error")]
    error_code: i64,
}

impl From<RecordFields> for UploadRecord {
    fn from(fields: RecordFields) -> Self {
        UploadRecord::new(
            fields.name,
            fields.declared_type,
            fields.size,
            fields.temp_location,
            fields.error_code,
        )
    }
}

impl UploadRecord {
    pub fn new(
        name: impl Into<String>,
        declared_type: impl Into<String>,
        size: u64,
        temp_location: impl Into<String>,
        error_code: i64,
    ) -> Self {
        let name = name.into();
        let extension = extension_of(&name).map(str::to_owned);
        Self {
            name,
            declared_type: declared_type.into(),
            size,
            temp_location: temp_location.into(),
            error_code,
            extension,
        }
    }

    /// Client-declared filename.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Client-declared MIME type. Untrusted.
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Byte count as reported by the parser.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Opaque handle to where the bytes currently live.
    pub fn temp_location(&self) -> &str {
        &self.temp_location
    }

    /// Transport status; `0` means the upload itself completed.
    pub fn error_code(&self) -> i64 {
        self.error_code
    }

    /// Suffix after the last `.` of `name`, case preserved.
    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Returns the record in raw field form, ready to be fed back to
    /// [`validate`](crate::validate).
    ///
    /// ```rust
    /// use file_upload::{validate, UploadRecord, ValidationOptions};
    ///
    /// let record = UploadRecord::new("a.jpg", "image/jpeg", 1024, "/tmp/x", 0);
    /// let upload = validate(&record.to_fields(), &ValidationOptions::default());
    /// assert_eq!(upload.record(), &record);
    /// ```
    pub fn to_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut fields = serde_json::Map::with_capacity(5);
        fields.insert(FIELD_NAME.into(), self.name.clone().into());
        fields.insert(FIELD_TYPE.into(), self.declared_type.clone().into());
        fields.insert(FIELD_SIZE.into(), self.size.into());
        fields.insert(FIELD_TMP_NAME.into(), self.temp_location.clone().into());
        fields.insert(FIELD_ERROR.into(), self.error_code.into());
        fields
    }
}

/// Everything after the last `.` in `name`, or `None` if there is no dot.
pub fn extension_of(name: &str) -> Option<&str> {
    name.rfind('.').map(|idx| &name[idx + 1..])
}

/// An upload that passed every configured rule.
///
/// Only [`validate`](crate::validate) builds these.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidUpload {
    record: UploadRecord,
}

impl ValidUpload {
    pub(crate) fn new(record: UploadRecord) -> Self {
        Self { record }
    }

    pub fn record(&self) -> &UploadRecord {
        &self.record
    }

    pub fn into_record(self) -> UploadRecord {
        self.record
    }

    /// True when the declared type starts with `image/`.
    ///
    /// This reads the client's claim, not the bytes.
    pub fn is_image(&self) -> bool {
        self.record.declared_type.starts_with("image/")
    }

    /// Moves the uploaded bytes to `destination` using `mover`.
    ///
    /// Returns `false` when the move fails for any reason (missing source,
    /// unwritable destination, source rejected by the mover). The cause is
    /// logged at `warn`.
    ///
    /// ```rust,no_run
    /// use file_upload::{validate, RenameMover, Upload, UploadRecord, ValidationOptions};
    ///
    /// let record = UploadRecord::new("a.txt", "text/plain", 5, "/tmp/upload_abc", 0);
    /// if let Upload::Valid(upload) = validate(&record.to_fields(), &ValidationOptions::default()) {
    ///     let moved = upload.move_to("/srv/files/a.txt", &RenameMover);
    ///     println!("moved: {moved}");
    /// }
    /// ```
    pub fn move_to(&self, destination: impl AsRef<Path>, mover: &dyn UploadMover) -> bool {
        let from = Path::new(&self.record.temp_location);
        let to = destination.as_ref();
        match mover.move_file(from, to) {
            Ok(()) => {
                debug!(
                    file_name = %self.record.name,
                    from = %from.display(),
                    to = %to.display(),
                    "upload_moved"
                );
                true
            }
            Err(err) => {
                warn!(
                    file_name = %self.record.name,
                    from = %from.display(),
                    to = %to.display(),
                    error = %err,
                    "upload_move_failed"
                );
                false
            }
        }
    }
}

/// An upload that was rejected, with the reason when one is known.
///
/// ```rust
/// use file_upload::{ErrorUpload, UploadRecord};
///
/// let record = UploadRecord::new("a.jpg", "image/jpeg", 1024, "/tmp/x", 3);
/// let upload = ErrorUpload::new(record.clone(), None);
/// assert_eq!(upload.message(), Some("The uploaded file was only partially uploaded"));
///
/// // An explicit message always wins over the table.
/// let upload = ErrorUpload::new(record, Some("try again".into()));
/// assert_eq!(upload.message(), Some("try again"));
/// ```
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorUpload {
    #[serde(flatten)]
    record: UploadRecord,
    message: Option<String>,
}

impl ErrorUpload {
    /// Builds an error upload. Without `message`, the canonical sentence for
    /// the record's error code is used; unknown codes leave it `None`.
    pub fn new(record: UploadRecord, message: Option<String>) -> Self {
        let message = message.or_else(|| message_for_code(record.error_code).map(str::to_owned));
        Self { record, message }
    }

    pub fn record(&self) -> &UploadRecord {
        &self.record
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn into_parts(self) -> (UploadRecord, Option<String>) {
        (self.record, self.message)
    }
}

/// Outcome of validating one upload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Upload {
    Valid(ValidUpload),
    Error(ErrorUpload),
}

impl Upload {
    pub fn is_valid(&self) -> bool {
        matches!(self, Upload::Valid(_))
    }

    /// The record either variant wraps.
    pub fn record(&self) -> &UploadRecord {
        match self {
            Upload::Valid(upload) => upload.record(),
            Upload::Error(upload) => upload.record(),
        }
    }

    /// Rejection message, `None` for valid uploads and for unknown codes.
    pub fn message(&self) -> Option<&str> {
        match self {
            Upload::Valid(_) => None,
            Upload::Error(upload) => upload.message(),
        }
    }

    pub fn into_result(self) -> Result<ValidUpload, ErrorUpload> {
        match self {
            Upload::Valid(upload) => Ok(upload),
            Upload::Error(upload) => Err(upload),
        }
    }
}

impl From<ValidUpload> for Upload {
    fn from(value: ValidUpload) -> Self {
        Upload::Valid(value)
    }
}

impl From<ErrorUpload> for Upload {
    fn from(value: ErrorUpload) -> Self {
        Upload::Error(value)
    }
}
