//! dirlive core library — live directory listings.
//!
//! `dirlive-core` lists one directory at a time, keeps the listing current
//! while the directory changes on disk, and lets any part of the process
//! ask for a rescan of a path. It has no UI; frontends drive a
//! [`RefreshController`] with [`Command`]s and observe it through a
//! [`ListingConsumer`].
//!
//! # Modules
//!
//! - [`fs`] — Entry descriptors, entry filtering and sort policy.
//! - [`scan`] — Cancellable single-directory scans, inline or on a worker thread.
//! - [`watch`] — Non-recursive change watching with a leading-edge debounce.
//! - [`refresh`] — The controller state machine tying scans and watching together.
//! - [`registry`] — Process-wide refresh-by-path subscriptions.
//! - [`config`] — TOML settings: display preferences, watcher and volumes.
//! - [`event`] — Command and event types for frontend ↔ core communication.
//! - [`error`] — Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).
//!
//! ```
//! use dirlive_core::{EntryDescriptor, EntryKind};
//!
//! let dir = std::env::temp_dir();
//! let meta = std::fs::metadata(&dir).unwrap();
//! let entry = EntryDescriptor::new(dir, &meta, EntryKind::Directory);
//! assert!(entry.is_dir());
//! assert_eq!(entry.size(), 0);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod fs;
pub mod refresh;
pub mod registry;
pub mod scan;
pub mod watch;

pub use config::settings::{Config, DisplaySettings, PreferenceKey, VolumeConfig, WatcherConfig};
pub use error::{CoreError, CoreResult};
pub use event::{Command, Event};
pub use fs::entry::{EntryDescriptor, EntryKind};
pub use fs::filter::EntryFilter;
pub use fs::sort::{SortDirection, SortField, SortPolicy};
pub use refresh::{
    resolve_directory, ControllerMessage, ControllerState, ListingConsumer, RefreshController,
};
pub use registry::{RefreshRegistry, Subscription};
pub use scan::{
    CancelFlag, DirectoryScanner, DirectorySnapshot, ScanEvent, ScanHandle, ScanMessage,
    ScanOutcome, ScanRequest,
};
pub use watch::{ChangeKind, DirWatcher, WatchMessage};
