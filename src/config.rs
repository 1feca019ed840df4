//! Acceptance policy for uploads.
//!
//! [`ValidationOptions`] bundles the optional constraints the validator
//! enforces. Every field is optional; an unset field means "no constraint of
//! that kind". The type is cheap to clone and deserializes from the same
//! camelCase JSON shape clients already use for upload forms.
//!
//! # Quick Start
//!
//! ```rust
//! use file_upload::ValidationOptions;
//!
//! // No constraints at all
//! let options = ValidationOptions::default();
//! options.validate().expect("defaults are always valid");
//! ```
//!
//! # Loading From JSON
//!
//! ```rust
//! use file_upload::ValidationOptions;
//!
//! let options = ValidationOptions::from_json(r#"{
//!     "maxSize": 1048576,
//!     "allowedTypes": ["image/jpeg", "image/png"],
//!     "allowedExtensions": ["jpg", "jpeg", "png"]
//! }"#).expect("valid options");
//!
//! assert_eq!(options.max_size, Some(1_048_576));
//! ```
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Optional constraints applied by [`validate`](crate::validate).
///
/// Rules run in field order: size, then declared type, then extension.
/// Membership checks are exact and case sensitive. An explicitly empty list
/// is still a constraint and rejects every upload.
///
/// ```rust
/// use file_upload::ValidationOptions;
///
/// let options = ValidationOptions {
///     max_size: Some(5 * 1024 * 1024),
///     allowed_extensions: Some(vec!["pdf".into()]),
///     ..Default::default()
/// };
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct ValidationOptions {
    /// Largest accepted size in bytes; equal sizes pass.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_size: Option<u64>,

    /// Declared MIME types that are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_types: Option<Vec<String>>,

    /// Filename extensions (without the dot) that are accepted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allowed_extensions: Option<Vec<String>>,
}

impl ValidationOptions {
    /// Parses options from their JSON form and checks them.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let options: ValidationOptions = serde_json::from_str(input)?;
        options.validate()?;
        Ok(options)
    }

    /// Checks internal consistency.
    ///
    /// In-memory only; call it once when the options are loaded.
    ///
    /// ```rust
    /// use file_upload::{ConfigError, ValidationOptions};
    ///
    /// let options = ValidationOptions {
    ///     allowed_extensions: Some(vec![".png".into()]),
    ///     ..Default::default()
    /// };
    /// assert_eq!(
    ///     options.validate(),
    ///     Err(ConfigError::DottedExtension(".png".into()))
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_size == Some(0) {
            return Err(ConfigError::ZeroMaxSize);
        }

        if let Some(types) = &self.allowed_types {
            if types.iter().any(|t| t.is_empty()) {
                return Err(ConfigError::EmptyAllowedType);
            }
        }

        if let Some(extensions) = &self.allowed_extensions {
            if let Some(dotted) = extensions.iter().find(|ext| ext.starts_with('.')) {
                return Err(ConfigError::DottedExtension(dotted.clone()));
            }
        }

        Ok(())
    }

    /// True when no constraint is configured.
    pub fn is_unconstrained(&self) -> bool {
        self.max_size.is_none() && self.allowed_types.is_none() && self.allowed_extensions.is_none()
    }

    pub(crate) fn allows_type(&self, declared_type: &str) -> bool {
        match &self.allowed_types {
            Some(types) => types.iter().any(|t| t == declared_type),
            None => true,
        }
    }

    pub(crate) fn allows_extension(&self, extension: Option<&str>) -> bool {
        match (&self.allowed_extensions, extension) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(extensions), Some(ext)) => extensions.iter().any(|allowed| allowed == ext),
        }
    }
}
