//! Refresh-by-path subscriber registry.
//!
//! Any part of the process can ask every controller currently displaying a
//! directory to rescan it with [`RefreshRegistry::request_refresh`].
//! Controllers register through [`RefreshRegistry::subscribe`] and hold the
//! returned [`Subscription`]; dropping it removes the registration.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use tokio::sync::mpsc::UnboundedSender;

use crate::refresh::ControllerMessage;

#[derive(Debug)]
struct Subscriber {
    id: u64,
    tx: UnboundedSender<ControllerMessage>,
}

/// Subscribers keyed by the absolute directory path they display.
#[derive(Debug, Default)]
pub struct RefreshRegistry {
    subscribers: DashMap<PathBuf, Vec<Subscriber>>,
    next_id: AtomicU64,
}

impl RefreshRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// The process-wide registry.
    pub fn global() -> Arc<Self> {
        static GLOBAL: OnceLock<Arc<RefreshRegistry>> = OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(RefreshRegistry::new))
    }

    /// Registers `tx` for refresh requests on exactly `path`.
    pub fn subscribe(
        self: &Arc<Self>,
        path: &Path,
        tx: UnboundedSender<ControllerMessage>,
    ) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers
            .entry(path.to_path_buf())
            .or_default()
            .push(Subscriber { id, tx });
        tracing::debug!(id, "refresh subscription added: {}", path.display());

        Subscription {
            registry: Arc::clone(self),
            path: path.to_path_buf(),
            id,
        }
    }

    /// Asks every subscriber of exactly `path` to rescan.
    ///
    /// Returns how many subscribers were notified. Subscribers whose
    /// receiving side is gone are pruned.
    pub fn request_refresh(&self, path: &Path) -> usize {
        let Some(mut subscribers) = self.subscribers.get_mut(path) else {
            return 0;
        };
        subscribers.retain(|s| {
            s.tx
                .send(ControllerMessage::RefreshRequested(path.to_path_buf()))
                .is_ok()
        });
        subscribers.len()
    }

    pub fn subscriber_count(&self, path: &Path) -> usize {
        self.subscribers.get(path).map_or(0, |s| s.len())
    }

    fn unsubscribe(&self, path: &Path, id: u64) {
        if let Some(mut subscribers) = self.subscribers.get_mut(path) {
            subscribers.retain(|s| s.id != id);
        }
        self.subscribers.remove_if(path, |_, subscribers| subscribers.is_empty());
        tracing::debug!(id, "refresh subscription removed: {}", path.display());
    }
}

/// A live registration. Removed from the registry on drop.
#[derive(Debug)]
pub struct Subscription {
    registry: Arc<RefreshRegistry>,
    path: PathBuf,
    id: u64,
}

impl Subscription {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.registry.unsubscribe(&self.path, self.id);
    }
}
