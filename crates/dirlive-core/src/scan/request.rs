//! What a single scan is asked to list.

use std::path::{Path, PathBuf};

/// Target directory plus the file filters for one scan.
///
/// A request is immutable once handed to a scanner; use
/// [`ScanRequest::retarget`] to derive the request for another directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanRequest {
    target: PathBuf,
    filetype_filter: String,
    mimetype_filter: String,
    writable_only: bool,
    directories_only: bool,
}

impl ScanRequest {
    /// A request for `target` that accepts every entry.
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Keep only files whose name ends with `suffix` (e.g. `".txt"`).
    #[must_use]
    pub fn with_filetype(self, suffix: impl Into<String>) -> Self {
        Self {
            filetype_filter: suffix.into(),
            ..self
        }
    }

    /// Keep only files whose guessed mime type matches (e.g. `"image/*"`).
    #[must_use]
    pub fn with_mimetype(self, mimetype: impl Into<String>) -> Self {
        Self {
            mimetype_filter: mimetype.into(),
            ..self
        }
    }

    #[must_use]
    pub fn writable_only(self, writable_only: bool) -> Self {
        Self {
            writable_only,
            ..self
        }
    }

    #[must_use]
    pub fn directories_only(self, directories_only: bool) -> Self {
        Self {
            directories_only,
            ..self
        }
    }

    /// Same filters, different directory.
    #[must_use]
    pub fn retarget(&self, target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            ..self.clone()
        }
    }

    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn filetype_filter(&self) -> &str {
        &self.filetype_filter
    }

    pub fn mimetype_filter(&self) -> &str {
        &self.mimetype_filter
    }

    pub fn is_writable_only(&self) -> bool {
        self.writable_only
    }

    pub fn is_directories_only(&self) -> bool {
        self.directories_only
    }
}
