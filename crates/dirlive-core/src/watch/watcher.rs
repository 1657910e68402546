//! File system watcher for automatic directory refresh.
//!
//! Uses [`notify`] to observe the direct children of one directory and
//! forwards debounced change signals to a caller-supplied sink. The sink
//! runs on notify's event thread; callers that own non-`Send` state should
//! make it forward into their own channel.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use notify::{RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{CoreError, CoreResult};
use crate::watch::state::{ChangeKind, WatchState};

/// Messages from the watcher to its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchMessage {
    /// The watched directory contents changed.
    Changed { path: PathBuf, kind: ChangeKind },
    /// The platform reported an error while watching.
    Error { path: PathBuf, message: String },
}

type Sink = Arc<dyn Fn(WatchMessage) + Send + Sync>;

struct ActiveWatch {
    path: PathBuf,
    // Dropping the watcher releases the platform subscription.
    _watcher: RecommendedWatcher,
}

/// Watches a single directory for changes, one directory at a time.
pub struct DirWatcher {
    sink: Sink,
    min_interval: Duration,
    active: Option<ActiveWatch>,
    #[cfg(test)]
    refuse: bool,
}

impl DirWatcher {
    /// Creates an unarmed watcher delivering through `sink`.
    ///
    /// Changes within `min_interval` of the previously delivered one are dropped.
    pub fn new<F>(min_interval: Duration, sink: F) -> Self
    where
        F: Fn(WatchMessage) + Send + Sync + 'static,
    {
        Self {
            sink: Arc::new(sink),
            min_interval,
            active: None,
            #[cfg(test)]
            refuse: false,
        }
    }

    /// Watches `dir`, releasing the previous subscription first.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Watch`] if the subscription cannot be set up;
    /// the watcher is left unarmed in that case.
    pub fn watch(&mut self, dir: &Path) -> CoreResult<()> {
        self.stop();

        #[cfg(test)]
        {
            if self.refuse {
                return Err(CoreError::Watch {
                    path: dir.to_path_buf(),
                    reason: "refused".to_string(),
                });
            }
        }

        let sink = Arc::clone(&self.sink);
        let mut state = WatchState::new(dir.to_path_buf(), self.min_interval);
        let handler = move |result: notify::Result<notify::Event>| match result {
            Ok(event) => {
                let Some(kind) = ChangeKind::from_event_kind(&event.kind) else {
                    return;
                };
                if state.admit(Instant::now()) {
                    sink(WatchMessage::Changed {
                        path: state.path().to_path_buf(),
                        kind,
                    });
                } else {
                    tracing::trace!("change suppressed: {}", state.path().display());
                }
            }
            Err(e) => sink(WatchMessage::Error {
                path: state.path().to_path_buf(),
                message: e.to_string(),
            }),
        };

        let watch_err = |e: notify::Error| CoreError::Watch {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        };
        let mut watcher = notify::recommended_watcher(handler).map_err(watch_err)?;
        // Non-recursive: only direct children matter to a listing.
        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(watch_err)?;

        tracing::debug!("watching {}", dir.display());
        self.active = Some(ActiveWatch {
            path: dir.to_path_buf(),
            _watcher: watcher,
        });
        Ok(())
    }

    /// Releases the current subscription. Returns `false` if nothing was
    /// being watched; calling it repeatedly is harmless.
    pub fn stop(&mut self) -> bool {
        match self.active.take() {
            Some(active) => {
                tracing::debug!("stopped watching {}", active.path.display());
                true
            }
            None => false,
        }
    }

    pub fn watched_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.path.as_path())
    }

    pub fn is_watching(&self) -> bool {
        self.active.is_some()
    }

    /// Makes every later `watch` fail, as an exhausted inotify limit would.
    #[cfg(test)]
    pub(crate) fn refuse_watches(&mut self) {
        self.refuse = true;
    }
}

impl std::fmt::Debug for DirWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirWatcher")
            .field("min_interval", &self.min_interval)
            .field("watched_path", &self.watched_path())
            .finish()
    }
}
