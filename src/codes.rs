//! Transport status codes reported by the multipart parser.
//!
//! The parser that receives the upload stamps every file with an integer
//! status. `0` means the bytes arrived intact; the other known values form a
//! closed set, each with one canonical diagnostic sentence. Unknown values
//! are kept as plain integers on the record and simply have no sentence.
//!
//! | Code | Variant | Meaning |
//! |------|---------|---------|
//! | 1 | [`IniSize`](UploadErrorCode::IniSize) | Server-wide size limit exceeded |
//! | 2 | [`FormSize`](UploadErrorCode::FormSize) | Form-declared size limit exceeded |
//! | 3 | [`Partial`](UploadErrorCode::Partial) | Only part of the body arrived |
//! | 4 | [`NoFile`](UploadErrorCode::NoFile) | Field present, no file sent |
//! | 6 | [`NoTmpDir`](UploadErrorCode::NoTmpDir) | No temporary directory |
//! | 7 | [`CantWrite`](UploadErrorCode::CantWrite) | Temp file write failed |
//! | 8 | [`Extension`](UploadErrorCode::Extension) | A server extension aborted |
use serde::{Deserialize, Serialize};

/// Status code meaning "no transport error".
pub const UPLOAD_OK: i64 = 0;

/// Known non-zero transport status codes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum UploadErrorCode {
    IniSize,
    FormSize,
    Partial,
    NoFile,
    NoTmpDir,
    CantWrite,
    Extension,
}

impl UploadErrorCode {
    pub const ALL: [UploadErrorCode; 7] = [
        UploadErrorCode::IniSize,
        UploadErrorCode::FormSize,
        UploadErrorCode::Partial,
        UploadErrorCode::NoFile,
        UploadErrorCode::NoTmpDir,
        UploadErrorCode::CantWrite,
        UploadErrorCode::Extension,
    ];

    /// Maps a raw status integer onto a known code.
    ///
    /// Returns `None` both for [`UPLOAD_OK`] and for values outside the table.
    ///
    /// ```rust
    /// use file_upload::UploadErrorCode;
    ///
    /// assert_eq!(UploadErrorCode::from_code(3), Some(UploadErrorCode::Partial));
    /// assert_eq!(UploadErrorCode::from_code(5), None);
    /// assert_eq!(UploadErrorCode::from_code(999), None);
    /// ```
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(UploadErrorCode::IniSize),
            2 => Some(UploadErrorCode::FormSize),
            3 => Some(UploadErrorCode::Partial),
            4 => Some(UploadErrorCode::NoFile),
            6 => Some(UploadErrorCode::NoTmpDir),
            7 => Some(UploadErrorCode::CantWrite),
            8 => Some(UploadErrorCode::Extension),
            _ => None,
        }
    }

    /// Raw integer as the parser reports it.
    pub fn code(self) -> i64 {
        match self {
            UploadErrorCode::IniSize => 1,
            UploadErrorCode::FormSize => 2,
            UploadErrorCode::Partial => 3,
            UploadErrorCode::NoFile => 4,
            UploadErrorCode::NoTmpDir => 6,
            UploadErrorCode::CantWrite => 7,
            UploadErrorCode::Extension => 8,
        }
    }

    /// Canonical diagnostic sentence for this code.
    pub fn message(self) -> &'static str {
        match self {
            UploadErrorCode::IniSize => {
                "The uploaded file exceeds the upload_max_filesize directive in php.ini"
            }
            UploadErrorCode::FormSize => {
                "The uploaded file exceeds the MAX_FILE_SIZE directive in the HTML form"
            }
            UploadErrorCode::Partial => "The uploaded file was only partially uploaded",
            UploadErrorCode::NoFile => "No file was uploaded",
            UploadErrorCode::NoTmpDir => "Missing a temporary folder",
            UploadErrorCode::CantWrite => "Failed to write file to disk",
            UploadErrorCode::Extension => "A PHP extension stopped the file upload",
        }
    }
}

/// Looks up the canonical sentence for a raw status integer.
pub fn message_for_code(code: i64) -> Option<&'static str> {
    UploadErrorCode::from_code(code).map(UploadErrorCode::message)
}
