//! Immutable scan results.

use std::path::{Path, PathBuf};

use crate::fs::entry::{EntryDescriptor, EntryKind};

/// A complete, sorted listing of one directory.
///
/// Entries are stored in display order: volumes first, then directories and
/// files (interleaved only when the sort policy mixes them). The category
/// accessors yield sorted subsequences of that order.
///
/// Snapshots are shared as `Arc<DirectorySnapshot>` and replaced wholesale;
/// nothing mutates a published snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySnapshot {
    path: PathBuf,
    entries: Vec<EntryDescriptor>,
}

impl DirectorySnapshot {
    /// Wraps entries that are already in display order.
    pub fn new(path: PathBuf, entries: Vec<EntryDescriptor>) -> Self {
        Self { path, entries }
    }

    /// The directory this snapshot lists.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All entries, volumes first.
    pub fn entries(&self) -> &[EntryDescriptor] {
        &self.entries
    }

    pub fn volumes(&self) -> impl Iterator<Item = &EntryDescriptor> {
        self.of_kind(EntryKind::Volume)
    }

    pub fn directories(&self) -> impl Iterator<Item = &EntryDescriptor> {
        self.of_kind(EntryKind::Directory)
    }

    pub fn files(&self) -> impl Iterator<Item = &EntryDescriptor> {
        self.of_kind(EntryKind::File)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the entry named `name`, used to preselect a file once loaded.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name() == name)
    }

    fn of_kind(&self, kind: EntryKind) -> impl Iterator<Item = &EntryDescriptor> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }
}
