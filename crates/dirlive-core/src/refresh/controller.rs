//! Refresh controller state machine.
//!
//! All state lives on the owner context. Scan workers, the change watcher
//! and the refresh registry only ever send [`ControllerMessage`]s into the
//! controller's inbox; the owner applies them with
//! [`RefreshController::process_pending`] or
//! [`RefreshController::process_next`].
//!
//! Each scan is tagged with a generation. Starting a scan cancels the
//! previous one and bumps the generation, and messages from any other
//! generation are dropped, so a slow superseded scan can never overwrite a
//! newer listing.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::config::settings::{Config, DisplaySettings, PreferenceKey};
use crate::error::CoreError;
use crate::event::Command;
use crate::refresh::consumer::ListingConsumer;
use crate::refresh::path::resolve_directory;
use crate::registry::{RefreshRegistry, Subscription};
use crate::scan::request::ScanRequest;
use crate::scan::scanner::{DirectoryScanner, ScanEvent, ScanHandle, ScanMessage};
use crate::scan::snapshot::DirectorySnapshot;
use crate::watch::watcher::{DirWatcher, WatchMessage};

/// Everything that can reach a controller from outside its owner context.
#[derive(Debug)]
pub enum ControllerMessage {
    Scan(ScanMessage),
    Watch(WatchMessage),
    /// Sent through the [`RefreshRegistry`].
    RefreshRequested(PathBuf),
}

impl From<ScanMessage> for ControllerMessage {
    fn from(msg: ScanMessage) -> Self {
        ControllerMessage::Scan(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// Nothing displayed or torn down.
    Idle,
    Scanning,
    /// A snapshot is displayed and no scan is running.
    Loaded,
}

/// Keeps one directory listing current.
pub struct RefreshController<C: ListingConsumer> {
    request: ScanRequest,
    settings: DisplaySettings,
    volumes: Vec<PathBuf>,
    path: PathBuf,
    preselected: Option<String>,
    snapshot: Option<Arc<DirectorySnapshot>>,
    state: ControllerState,
    loading: bool,
    active: Option<ScanHandle>,
    generation: u64,
    watcher: Option<DirWatcher>,
    registry: Arc<RefreshRegistry>,
    subscription: Option<Subscription>,
    inbox_tx: UnboundedSender<ControllerMessage>,
    inbox_rx: UnboundedReceiver<ControllerMessage>,
    consumer: C,
}

impl<C: ListingConsumer> RefreshController<C> {
    /// Creates an idle controller. `request` supplies the initial directory
    /// and the file filters kept for every later scan. Call
    /// [`RefreshController::start`] to load it.
    pub fn new(
        request: ScanRequest,
        config: &Config,
        registry: Arc<RefreshRegistry>,
        consumer: C,
    ) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        let watcher = config.watcher.enabled.then(|| {
            let tx = inbox_tx.clone();
            DirWatcher::new(config.watcher.debounce(), move |msg| {
                let _ = tx.send(ControllerMessage::Watch(msg));
            })
        });

        Self {
            path: request.target().to_path_buf(),
            request,
            settings: config.general.clone(),
            volumes: config.volumes.mount_points.clone(),
            preselected: None,
            snapshot: None,
            state: ControllerState::Idle,
            loading: false,
            active: None,
            generation: 0,
            watcher,
            registry,
            subscription: None,
            inbox_tx,
            inbox_rx,
            consumer,
        }
    }

    /// Loads the directory named by the initial request.
    pub fn start(&mut self) {
        let target = self.request.target().to_path_buf();
        self.set_path(&target);
    }

    /// Displays `path`, falling back to its nearest directory ancestor.
    ///
    /// Re-arms the watcher and the registry subscription on the resolved
    /// directory, then starts a scan.
    pub fn set_path(&mut self, path: &Path) {
        self.navigate(path, None);
    }

    /// Like [`RefreshController::set_path`], preselecting `filename` once
    /// the listing loads. A leaf rejected by path resolution takes
    /// precedence.
    pub fn set_path_selecting(&mut self, path: &Path, filename: impl Into<String>) {
        self.navigate(path, Some(filename.into()));
    }

    /// Rescans the current path, cancelling any scan still in flight.
    ///
    /// A detached controller (before `start` or after `teardown`) resolves
    /// and attaches to its path first.
    pub fn refresh(&mut self) {
        if !self.is_attached() {
            let path = self.path.clone();
            let selecting = self.preselected.take();
            self.navigate(&path, selecting);
            return;
        }

        if let Some(previous) = self.active.take() {
            previous.cancel();
            tracing::debug!(
                generation = previous.generation(),
                finished = previous.is_finished(),
                "superseded scan cancelled"
            );
        }

        self.generation += 1;
        let scanner = DirectoryScanner::new(
            self.request.retarget(&self.path),
            &self.settings,
            &self.volumes,
        );
        self.state = ControllerState::Scanning;
        self.set_loading(true);

        match scanner.spawn(self.generation, self.inbox_tx.clone()) {
            Ok(handle) => self.active = Some(handle),
            Err(e) => self.fail(&e),
        }
    }

    /// Replaces the display settings and rescans unless `key` has no
    /// effect on listing data.
    pub fn apply_settings(&mut self, settings: DisplaySettings, key: PreferenceKey) {
        self.settings = settings;
        if key.triggers_rescan() && self.is_attached() {
            self.refresh();
        }
    }

    /// Stops watching, cancels any scan and leaves the registry.
    /// Safe to call repeatedly; the displayed snapshot is kept.
    pub fn teardown(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
        }
        if let Some(watcher) = self.watcher.as_mut() {
            watcher.stop();
        }
        self.subscription = None;
        self.set_loading(false);
        self.state = ControllerState::Idle;
    }

    pub fn execute(&mut self, command: Command) {
        match command {
            Command::SetPath(path) => self.set_path(&path),
            Command::SetPathSelecting(path, filename) => self.set_path_selecting(&path, filename),
            Command::Refresh => self.refresh(),
            Command::ApplySettings(settings, key) => self.apply_settings(settings, key),
            Command::Teardown => self.teardown(),
        }
    }

    /// Applies every message already in the inbox. Never blocks.
    pub fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.inbox_rx.try_recv() {
            self.handle(msg);
            handled += 1;
        }
        handled
    }

    /// Waits for the next inbox message and applies it.
    pub async fn process_next(&mut self) {
        // The controller holds a sender itself, so the inbox never closes.
        if let Some(msg) = self.inbox_rx.recv().await {
            self.handle(msg);
        }
    }

    /// A sender into this controller's inbox.
    pub fn sender(&self) -> UnboundedSender<ControllerMessage> {
        self.inbox_tx.clone()
    }

    pub fn handle(&mut self, msg: ControllerMessage) {
        match msg {
            ControllerMessage::Scan(ScanMessage { generation, event }) => {
                if !self.is_active(generation) {
                    tracing::trace!(generation, "dropping result of a superseded scan");
                    return;
                }
                match event {
                    ScanEvent::Progress(count) => self.consumer.on_scan_progress(count),
                    ScanEvent::Completed(snapshot) => self.apply(snapshot),
                    ScanEvent::Failed(e) => {
                        self.active = None;
                        self.fail(&e);
                    }
                }
            }
            ControllerMessage::Watch(WatchMessage::Changed { path, kind }) => {
                if self.is_attached() && path == self.path {
                    tracing::debug!(?kind, "directory changed: {}", path.display());
                    self.refresh();
                }
            }
            ControllerMessage::Watch(WatchMessage::Error { path, message }) => {
                tracing::warn!("watch error on {}: {message}", path.display());
            }
            ControllerMessage::RefreshRequested(path) => {
                if self.is_attached() && path == self.path {
                    self.refresh();
                } else {
                    tracing::trace!("ignoring refresh request for {}", path.display());
                }
            }
        }
    }

    /// The directory currently displayed (absolute).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The leaf name rejected by path resolution, if any.
    pub fn preselected_filename(&self) -> Option<&str> {
        self.preselected.as_deref()
    }

    pub fn snapshot(&self) -> Option<&Arc<DirectorySnapshot>> {
        self.snapshot.as_ref()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn is_scanning(&self) -> bool {
        self.state == ControllerState::Scanning
    }

    pub fn settings(&self) -> &DisplaySettings {
        &self.settings
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.as_ref().is_some_and(DirWatcher::is_watching)
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }

    pub fn consumer_mut(&mut self) -> &mut C {
        &mut self.consumer
    }

    fn navigate(&mut self, path: &Path, selecting: Option<String>) {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        let (dir, rejected) = resolve_directory(&absolute);
        if let Some(name) = &rejected {
            tracing::debug!("{} is not a directory, showing {}", name, dir.display());
        }
        self.preselected = rejected.or(selecting);
        self.path = dir;
        self.attach();
        self.refresh();
    }

    /// Points the watcher and the registry subscription at the current path.
    /// A watcher that cannot be armed is left disarmed; scanning proceeds.
    fn attach(&mut self) {
        if let Some(watcher) = self.watcher.as_mut() {
            if watcher.watched_path() != Some(self.path.as_path()) {
                if let Err(e) = watcher.watch(&self.path) {
                    tracing::warn!("watcher not armed: {e}");
                }
            }
        }

        let subscribed = self.subscription.as_ref().map(Subscription::path);
        if subscribed != Some(self.path.as_path()) {
            // Drop the old registration before taking a new one.
            self.subscription = None;
            self.subscription = Some(self.registry.subscribe(&self.path, self.inbox_tx.clone()));
        }
    }

    fn is_active(&self, generation: u64) -> bool {
        self.active
            .as_ref()
            .is_some_and(|handle| handle.generation() == generation)
    }

    fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    fn apply(&mut self, snapshot: Arc<DirectorySnapshot>) {
        self.active = None;
        self.consumer.on_data_ready(&snapshot);
        self.snapshot = Some(Arc::clone(&snapshot));
        self.state = ControllerState::Loaded;
        self.set_loading(false);
        self.consumer.on_data_applied(&snapshot);
    }

    fn fail(&mut self, error: &CoreError) {
        tracing::warn!("scan of {} failed: {error}", self.path.display());
        self.consumer.on_scan_failed(error);
        self.state = if self.snapshot.is_some() {
            ControllerState::Loaded
        } else {
            ControllerState::Idle
        };
        self.set_loading(false);
    }

    fn set_loading(&mut self, loading: bool) {
        if self.loading != loading {
            self.loading = loading;
            self.consumer.on_loading_changed(loading);
        }
    }
}

impl<C: ListingConsumer> Drop for RefreshController<C> {
    fn drop(&mut self) {
        if let Some(active) = self.active.take() {
            active.cancel();
        }
    }
}

impl<C: ListingConsumer> std::fmt::Debug for RefreshController<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefreshController")
            .field("path", &self.path)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}
