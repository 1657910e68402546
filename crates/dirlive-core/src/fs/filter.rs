//! Entry filtering applied while a directory is scanned.

use crate::fs::entry::EntryDescriptor;

/// Decides which scanned entries make it into a snapshot.
///
/// Directories and volumes are only subject to the hidden-entry rule; the
/// type, mime and writability rules apply to files alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    suffix: String,
    mimetype: String,
    writable_only: bool,
    directories_only: bool,
    show_hidden: bool,
}

impl EntryFilter {
    /// Builds a filter. Both text filters are case-insensitive; an empty
    /// string accepts everything.
    pub fn new(
        filetype: &str,
        mimetype: &str,
        writable_only: bool,
        directories_only: bool,
        show_hidden: bool,
    ) -> Self {
        Self {
            suffix: normalize_suffix(filetype),
            mimetype: mimetype.trim().to_lowercase(),
            writable_only,
            directories_only,
            show_hidden,
        }
    }

    /// Returns `true` if `entry` should be listed.
    pub fn accepts(&self, entry: &EntryDescriptor) -> bool {
        if entry.is_hidden() && !self.show_hidden {
            return false;
        }
        if entry.is_dir() {
            return true;
        }
        if self.directories_only {
            return false;
        }
        if !matches_filetype(entry.name(), &self.suffix) {
            return false;
        }
        if !matches_mimetype(entry.mime(), &self.mimetype) {
            return false;
        }
        !self.writable_only || entry.is_writable()
    }
}

/// Turns `"txt"`, `".TXT"` or `" .txt "` into `".txt"`. Empty stays empty.
fn normalize_suffix(filetype: &str) -> String {
    let trimmed = filetype.trim().to_lowercase();
    if trimmed.is_empty() || trimmed.starts_with('.') {
        trimmed
    } else {
        format!(".{trimmed}")
    }
}

/// Case-insensitive suffix match against an already normalised suffix.
pub fn matches_filetype(name: &str, suffix: &str) -> bool {
    suffix.is_empty() || name.to_lowercase().ends_with(suffix)
}

/// Matches a guessed mime type against a filter such as `image/png`,
/// `image/*` or `*/*`.
///
/// Files without a guessable mime type only pass an empty or `*/*` filter.
pub fn matches_mimetype(mime: Option<&str>, filter: &str) -> bool {
    let filter = filter.trim();
    if filter.is_empty() || filter == "*/*" || filter == "*" {
        return true;
    }
    let Some(mime) = mime else {
        return false;
    };
    let mime = mime.to_lowercase();
    let filter = filter.to_lowercase();
    match filter.strip_suffix("/*") {
        Some(major) => mime.split('/').next() == Some(major),
        None => mime == filter,
    }
}
