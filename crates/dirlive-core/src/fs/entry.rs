//! Entry descriptor representation.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use unicode_normalization::UnicodeNormalization;

/// How a scanned entry is presented to the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A configured mount point (removable volume), regardless of its on-disk type.
    Volume,
    /// A directory.
    Directory,
    /// Anything else: regular files, sockets, devices, dangling links.
    File,
}

/// An immutable snapshot of one filesystem entry at scan time.
///
/// Create instances via [`EntryDescriptor::new`]; there are no setters.
/// Directory and volume sizes are reported as `0`.
///
/// # Examples
///
/// ```no_run
/// use dirlive_core::{EntryDescriptor, EntryKind};
/// use std::fs;
///
/// let metadata = fs::metadata("Cargo.toml").unwrap();
/// let entry = EntryDescriptor::new("Cargo.toml".into(), &metadata, EntryKind::File);
/// assert_eq!(entry.name(), "Cargo.toml");
/// assert_eq!(entry.mime(), Some("text/x-toml"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDescriptor {
    path: PathBuf,
    name: String,
    kind: EntryKind,
    size: u64,
    modified: Option<SystemTime>,
    writable: bool,
    mode: Option<u32>,
    hidden: bool,
    symlink: bool,
    mime: Option<&'static str>,
}

impl EntryDescriptor {
    /// Creates a descriptor from a path, its metadata and an already decided kind.
    ///
    /// Hidden entries are detected by a leading `.` in the name. The mime hint
    /// is guessed from the extension and only set for files.
    pub fn new(path: PathBuf, metadata: &std::fs::Metadata, kind: EntryKind) -> Self {
        Self::with_link_flag(path, metadata, kind, metadata.is_symlink())
    }

    /// Like [`EntryDescriptor::new`] for callers that resolved a symlink
    /// to its target's metadata but still want the link recorded.
    pub(crate) fn with_link_flag(
        path: PathBuf,
        metadata: &std::fs::Metadata,
        kind: EntryKind,
        symlink: bool,
    ) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().nfc().collect::<String>())
            .unwrap_or_default();
        let hidden = name.starts_with('.');
        let mime = match kind {
            EntryKind::File => mime_guess::from_path(&path).first_raw(),
            _ => None,
        };

        Self {
            size: if kind == EntryKind::File { metadata.len() } else { 0 },
            modified: metadata.modified().ok(),
            writable: !metadata.permissions().readonly(),
            mode: unix_mode(metadata),
            symlink,
            path,
            name,
            kind,
            hidden,
            mime,
        }
    }

    /// Returns the absolute path of this entry.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the last path component, NFC normalised.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> EntryKind {
        self.kind
    }

    /// Returns `true` for directories and volumes.
    pub fn is_dir(&self) -> bool {
        matches!(self.kind, EntryKind::Directory | EntryKind::Volume)
    }

    /// Returns the size in bytes. Always `0` for directories and volumes.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Returns the last-modified time, if the platform reports one.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    /// Returns `false` when the permission bits mark the entry read-only.
    pub fn is_writable(&self) -> bool {
        self.writable
    }

    /// Unix permission bits, `None` on other platforms.
    pub fn mode(&self) -> Option<u32> {
        self.mode
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    /// Mime type guessed from the file extension.
    pub fn mime(&self) -> Option<&'static str> {
        self.mime
    }

    /// Lower-cased extension, empty when there is none.
    pub fn extension_lower(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    }
}

#[cfg(unix)]
fn unix_mode(metadata: &std::fs::Metadata) -> Option<u32> {
    use std::os::unix::fs::PermissionsExt;
    Some(metadata.permissions().mode() & 0o7777)
}

#[cfg(not(unix))]
fn unix_mode(_metadata: &std::fs::Metadata) -> Option<u32> {
    None
}
