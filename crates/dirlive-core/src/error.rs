//! Error type shared by scanning, watching and config loading.
//!
//! Scan failures travel to the consumer inside
//! [`ScanEvent::Failed`](crate::scan::ScanEvent::Failed), so every variant
//! must be `Send` and render on its own as a one-line status message.

use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("path not found: {0}")]
    NotFound(PathBuf),

    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The scan target exists but is a file, socket, etc.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// The change subscription could not be set up. Never fatal to a scan.
    #[error("cannot watch {path}: {reason}")]
    Watch { path: PathBuf, reason: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl CoreError {
    /// Classifies an I/O failure on `path`, keeping the path for the two
    /// kinds a listing reports specially.
    pub fn from_io(path: &Path, err: io::Error) -> Self {
        match err.kind() {
            io::ErrorKind::NotFound => CoreError::NotFound(path.to_path_buf()),
            io::ErrorKind::PermissionDenied => CoreError::PermissionDenied(path.to_path_buf()),
            _ => CoreError::Io(err),
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
