//! Filesystem change watching with a leading-edge debounce.

pub mod state;
pub mod watcher;

pub use state::{ChangeKind, WatchState};
pub use watcher::{DirWatcher, WatchMessage};
