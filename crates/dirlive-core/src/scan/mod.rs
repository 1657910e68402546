//! Single-directory scanning.
//!
//! A [`ScanRequest`] names the directory and file filters, a
//! [`DirectoryScanner`] turns it into an immutable [`DirectorySnapshot`],
//! either inline or on a worker thread reporting [`ScanMessage`]s.

pub mod request;
pub mod scanner;
pub mod snapshot;

pub use request::ScanRequest;
pub use scanner::{
    CancelFlag, DirectoryScanner, ScanEvent, ScanHandle, ScanMessage, ScanOutcome,
    PROGRESS_INTERVAL,
};
pub use snapshot::DirectorySnapshot;
