//! Command and event types for communication between a frontend and the core.
//!
//! The frontend translates user input into [`Command`]s for a
//! [`RefreshController`](crate::refresh::RefreshController), which reports
//! back through a [`ListingConsumer`](crate::refresh::ListingConsumer). A
//! channel of [`Event`]s is one such consumer, for frontends that prefer a
//! typed stream to callbacks.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::settings::{DisplaySettings, PreferenceKey};
use crate::scan::snapshot::DirectorySnapshot;

/// An action the frontend requests the controller to perform.
///
/// Commands flow **frontend → core**.
#[derive(Debug, Clone)]
pub enum Command {
    /// Display the directory at the given path (or its nearest directory ancestor).
    SetPath(PathBuf),
    /// Display a directory with the named entry preselected.
    SetPathSelecting(PathBuf, String),
    /// Re-read the current directory.
    Refresh,
    /// Replace the display settings; `PreferenceKey` names what changed.
    ApplySettings(DisplaySettings, PreferenceKey),
    /// Stop watching and cancel any scan.
    Teardown,
}

/// A notification the core sends back to the frontend.
///
/// Events flow **core → frontend**.
#[derive(Debug, Clone)]
pub enum Event {
    /// A scan started (`true`) or the displayed listing settled (`false`).
    LoadingChanged(bool),
    /// Entries enumerated so far by the running scan.
    Progress(usize),
    /// A new snapshot is about to replace the displayed one.
    DataReady(Arc<DirectorySnapshot>),
    /// The new snapshot is now the displayed one.
    DataApplied(Arc<DirectorySnapshot>),
    /// The scan failed; the previous snapshot stays displayed.
    ScanFailed(String),
}
