//! Strategies for relocating uploaded bytes.
//!
//! The caller picks the strategy for its execution context and hands it to
//! [`ValidUpload::move_to`](crate::ValidUpload::move_to):
//!
//! - [`UploadedFileMover`] for request handling. It only accepts sources the
//!   multipart parser registered in its [`UploadRegistry`], so a forged
//!   `tmp_name` pointing at an arbitrary readable file is refused.
//! - [`RenameMover`] for CLI tooling and tests, where no upload took place and
//!   a plain rename is all that is needed.
use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tracing::warn;

/// Moves a file from its temporary location to a destination.
pub trait UploadMover: Send + Sync {
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// Plain `rename(2)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenameMover;

impl UploadMover for RenameMover {
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}

/// Temp paths written by the multipart parser during the current request.
///
/// The registry is request-scoped: paths of uploads that were rejected or
/// never moved stay registered until [`drain`](Self::drain) runs at the end
/// of the request. Cloning shares the same underlying set.
#[derive(Debug, Clone, Default)]
pub struct UploadRegistry {
    paths: Arc<RwLock<HashSet<PathBuf>>>,
}

impl UploadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path` as a genuine upload temp file.
    pub fn register(&self, path: impl Into<PathBuf>) {
        let mut guard = self
            .paths
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(path.into());
    }

    pub fn contains(&self, path: &Path) -> bool {
        let guard = self
            .paths
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.contains(path)
    }

    /// Drops `path` from the registry; returns whether it was present.
    pub fn forget(&self, path: &Path) -> bool {
        let mut guard = self
            .paths
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.remove(path)
    }

    /// Empties the registry and returns the paths that were never moved.
    ///
    /// Call this when the request finishes; the caller decides whether the
    /// leftover temp files are deleted.
    pub fn drain(&self) -> Vec<PathBuf> {
        let mut guard = self
            .paths
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.drain().collect()
    }

    pub fn len(&self) -> usize {
        self.paths
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Accepts only registered upload temp files, then renames them.
///
/// A moved path is forgotten, so each upload can be accepted once.
#[derive(Debug, Clone, Default)]
pub struct UploadedFileMover {
    registry: UploadRegistry,
}

impl UploadedFileMover {
    pub fn new(registry: UploadRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &UploadRegistry {
        &self.registry
    }
}

impl UploadMover for UploadedFileMover {
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        if !self.registry.contains(from) {
            warn!(from = %from.display(), "move_rejected_unregistered_source");
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("{} is not a registered upload", from.display()),
            ));
        }

        fs::rename(from, to)?;
        self.registry.forget(from);
        Ok(())
    }
}
