//! Directory scanning and the background scan worker.
//!
//! [`DirectoryScanner::scan`] lists one directory synchronously. The
//! controller uses [`DirectoryScanner::spawn`], which runs the same scan on
//! a dedicated thread and reports through an unbounded channel. Every
//! message carries the generation it was started with so the receiver can
//! drop results from superseded scans.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tokio::sync::mpsc::UnboundedSender;

use crate::config::settings::DisplaySettings;
use crate::error::{CoreError, CoreResult};
use crate::fs::entry::{EntryDescriptor, EntryKind};
use crate::fs::filter::EntryFilter;
use crate::fs::sort::SortPolicy;
use crate::scan::request::ScanRequest;
use crate::scan::snapshot::DirectorySnapshot;

/// A progress message is emitted every this many enumerated entries.
pub const PROGRESS_INTERVAL: usize = 64;

/// Cooperative cancellation signal shared between a scan and its owner.
///
/// Cancelling never blocks and may be repeated; it only guarantees that a
/// scan which observes the flag produces no result.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Result of a synchronous scan.
#[derive(Debug)]
pub enum ScanOutcome {
    Completed(DirectorySnapshot),
    /// The flag was raised mid-scan. Not an error.
    Cancelled,
    Failed(CoreError),
}

/// Messages sent from a scan worker to its owner.
#[derive(Debug)]
pub struct ScanMessage {
    /// Generation the scan was spawned with.
    pub generation: u64,
    pub event: ScanEvent,
}

#[derive(Debug)]
pub enum ScanEvent {
    /// Number of entries enumerated so far.
    Progress(usize),
    Completed(Arc<DirectorySnapshot>),
    Failed(CoreError),
}

/// Lists a single directory according to a [`ScanRequest`].
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    request: ScanRequest,
    filter: EntryFilter,
    policy: SortPolicy,
    volumes: Vec<PathBuf>,
}

impl DirectoryScanner {
    /// Creates a scanner. `volumes` are mount points that are always listed
    /// as [`EntryKind::Volume`].
    pub fn new(request: ScanRequest, settings: &DisplaySettings, volumes: &[PathBuf]) -> Self {
        let filter = EntryFilter::new(
            request.filetype_filter(),
            request.mimetype_filter(),
            request.is_writable_only(),
            request.is_directories_only(),
            settings.show_hidden,
        );
        Self {
            request,
            filter,
            policy: settings.sort_policy(),
            volumes: volumes.to_vec(),
        }
    }

    pub fn request(&self) -> &ScanRequest {
        &self.request
    }

    /// Scans the target directory on the calling thread.
    ///
    /// `on_progress` is called with the running entry count every
    /// [`PROGRESS_INTERVAL`] entries. `cancel` is checked before each entry
    /// and once more before the snapshot is built.
    pub fn scan(&self, cancel: &CancelFlag, mut on_progress: impl FnMut(usize)) -> ScanOutcome {
        let target = self.request.target();
        let read_dir = match open_directory(target) {
            Ok(read_dir) => read_dir,
            Err(e) => return ScanOutcome::Failed(e),
        };

        let mut entries = Vec::new();
        let mut seen = 0usize;

        for dir_entry in read_dir {
            if cancel.is_cancelled() {
                return ScanOutcome::Cancelled;
            }
            let Ok(dir_entry) = dir_entry else {
                continue;
            };
            let Some(entry) = self.describe(dir_entry.path()) else {
                continue;
            };

            seen += 1;
            if seen % PROGRESS_INTERVAL == 0 {
                on_progress(seen);
            }
            if self.filter.accepts(&entry) {
                entries.push(entry);
            }
        }

        if cancel.is_cancelled() {
            return ScanOutcome::Cancelled;
        }

        self.policy.sort(&mut entries);
        ScanOutcome::Completed(DirectorySnapshot::new(target.to_path_buf(), entries))
    }

    /// Runs the scan on a new worker thread.
    ///
    /// Progress, completion and failure are sent on `tx` tagged with
    /// `generation`, converted into the owner's message type. A cancelled
    /// scan sends nothing further.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Io`] if the worker thread cannot be spawned.
    pub fn spawn<M>(self, generation: u64, tx: UnboundedSender<M>) -> CoreResult<ScanHandle>
    where
        M: From<ScanMessage> + Send + 'static,
    {
        let cancel = CancelFlag::new();
        let worker_cancel = cancel.clone();
        let join = thread::Builder::new()
            .name(format!("dirlive-scan-{generation}"))
            .spawn(move || run_worker(&self, generation, &worker_cancel, &tx))?;

        Ok(ScanHandle {
            generation,
            cancel,
            join: Some(join),
        })
    }

    /// Builds the descriptor for one child, following symlinks for
    /// classification. Entries that vanish between listing and stat are skipped.
    fn describe(&self, path: PathBuf) -> Option<EntryDescriptor> {
        let link_meta = fs::symlink_metadata(&path).ok()?;
        let symlink = link_meta.is_symlink();
        let metadata = if symlink {
            fs::metadata(&path).unwrap_or(link_meta)
        } else {
            link_meta
        };
        let kind = self.classify(&path, &metadata);
        Some(EntryDescriptor::with_link_flag(path, &metadata, kind, symlink))
    }

    fn classify(&self, path: &Path, metadata: &fs::Metadata) -> EntryKind {
        if self.volumes.iter().any(|v| v == path) {
            EntryKind::Volume
        } else if metadata.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

fn open_directory(target: &Path) -> CoreResult<fs::ReadDir> {
    let metadata = fs::metadata(target).map_err(|e| CoreError::from_io(target, e))?;
    if !metadata.is_dir() {
        return Err(CoreError::NotADirectory(target.to_path_buf()));
    }
    fs::read_dir(target).map_err(|e| CoreError::from_io(target, e))
}

fn run_worker<M: From<ScanMessage>>(
    scanner: &DirectoryScanner,
    generation: u64,
    cancel: &CancelFlag,
    tx: &UnboundedSender<M>,
) {
    let target = scanner.request.target();
    tracing::debug!(generation, "scan started: {}", target.display());

    let send = |event: ScanEvent| {
        let _ = tx.send(ScanMessage { generation, event }.into());
    };

    let outcome = scanner.scan(cancel, |count| {
        if !cancel.is_cancelled() {
            send(ScanEvent::Progress(count));
        }
    });

    if cancel.is_cancelled() {
        tracing::debug!(generation, "scan cancelled: {}", target.display());
        return;
    }

    match outcome {
        ScanOutcome::Completed(snapshot) => {
            tracing::debug!(
                generation,
                entries = snapshot.len(),
                "scan complete: {}",
                target.display()
            );
            send(ScanEvent::Completed(Arc::new(snapshot)));
        }
        ScanOutcome::Failed(e) => {
            tracing::debug!(generation, "scan failed: {e}");
            send(ScanEvent::Failed(e));
        }
        ScanOutcome::Cancelled => {}
    }
}

/// Owner-side handle of a running scan.
///
/// Dropping the handle cancels the scan without waiting for the worker.
#[derive(Debug)]
pub struct ScanHandle {
    generation: u64,
    cancel: CancelFlag,
    join: Option<JoinHandle<()>>,
}

impl ScanHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Signals the worker to stop. Never blocks; a no-op once the scan finished.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Returns `true` once the worker thread has exited.
    pub fn is_finished(&self) -> bool {
        self.join.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Blocks until the worker thread exits.
    pub fn join(mut self) {
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

impl Drop for ScanHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}
