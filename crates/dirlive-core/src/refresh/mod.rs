//! The refresh controller: owns the displayed path, its snapshot, the
//! active scan and the change watcher, and serializes every state change
//! through one inbox.

pub mod consumer;
pub mod controller;
pub mod path;

pub use consumer::ListingConsumer;
pub use controller::{ControllerMessage, ControllerState, RefreshController};
pub use path::resolve_directory;
