//! Change classification and the debounce gate.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::event::{AccessKind, AccessMode, ModifyKind, RenameMode};
use notify::EventKind;

/// A change inside a watched directory that warrants a rescan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    Created,
    Deleted,
    MovedIn,
    MovedOut,
    /// A rename reported as a single event.
    Moved,
    ClosedAfterWrite,
}

impl ChangeKind {
    /// Classifies a `notify` event. Returns `None` for kinds that do not
    /// change the listing (reads, opens, in-place data writes, metadata).
    ///
    /// The inotify backend never forwards `IN_IGNORED` (mask 32768, raised
    /// when a watch is torn down); anything else that carries no change,
    /// such as `Any` or `Other`, falls through to `None` here.
    pub fn from_event_kind(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Create(_) => Some(ChangeKind::Created),
            EventKind::Remove(_) => Some(ChangeKind::Deleted),
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => Some(ChangeKind::MovedOut),
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => Some(ChangeKind::MovedIn),
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Moved),
            EventKind::Access(AccessKind::Close(AccessMode::Write)) => {
                Some(ChangeKind::ClosedAfterWrite)
            }
            _ => None,
        }
    }
}

/// Per-directory watch bookkeeping: the watched path and when the last
/// change signal was let through.
///
/// Acts as a leading-edge gate: the first change passes immediately, and
/// any change within `min_interval` (inclusive) of the last delivered one
/// is suppressed.
#[derive(Debug, Clone)]
pub struct WatchState {
    path: PathBuf,
    last_signal: Option<Instant>,
    min_interval: Duration,
}

impl WatchState {
    pub fn new(path: PathBuf, min_interval: Duration) -> Self {
        Self {
            path,
            last_signal: None,
            min_interval,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn last_signal(&self) -> Option<Instant> {
        self.last_signal
    }

    /// Returns `true` if a change observed at `now` should be delivered,
    /// recording `now` as the last delivery when it is.
    pub fn admit(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_signal {
            if now.saturating_duration_since(last) <= self.min_interval {
                return false;
            }
        }
        self.last_signal = Some(now);
        true
    }
}
