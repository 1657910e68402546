//! Consumer side of the refresh controller.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::error::CoreError;
use crate::event::Event;
use crate::scan::snapshot::DirectorySnapshot;

/// Receives the controller's notifications on the owner context.
///
/// Every method defaults to a no-op so consumers implement only what they
/// display. For a given snapshot `on_data_ready` runs before the controller
/// swaps it in and `on_data_applied` after, bracketing the swap.
pub trait ListingConsumer {
    /// Called when a scan starts (`true`) or the listing settles (`false`).
    fn on_loading_changed(&mut self, _loading: bool) {}

    fn on_scan_progress(&mut self, _count: usize) {}

    /// New data is ready; the previous snapshot is still the current one.
    fn on_data_ready(&mut self, _snapshot: &Arc<DirectorySnapshot>) {}

    /// The new snapshot is now the current one.
    fn on_data_applied(&mut self, _snapshot: &Arc<DirectorySnapshot>) {}

    fn on_scan_failed(&mut self, _error: &CoreError) {}
}

/// Forwards notifications as [`Event`]s. A closed receiver is ignored.
impl ListingConsumer for UnboundedSender<Event> {
    fn on_loading_changed(&mut self, loading: bool) {
        let _ = self.send(Event::LoadingChanged(loading));
    }

    fn on_scan_progress(&mut self, count: usize) {
        let _ = self.send(Event::Progress(count));
    }

    fn on_data_ready(&mut self, snapshot: &Arc<DirectorySnapshot>) {
        let _ = self.send(Event::DataReady(Arc::clone(snapshot)));
    }

    fn on_data_applied(&mut self, snapshot: &Arc<DirectorySnapshot>) {
        let _ = self.send(Event::DataApplied(Arc::clone(snapshot)));
    }

    fn on_scan_failed(&mut self, error: &CoreError) {
        let _ = self.send(Event::ScanFailed(error.to_string()));
    }
}

/// A consumer that ignores everything.
impl ListingConsumer for () {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::sync::mpsc;

    #[test]
    fn channel_consumer_emits_events_in_order() {
        let (mut tx, mut rx) = mpsc::unbounded_channel::<Event>();
        let snapshot = Arc::new(DirectorySnapshot::new(PathBuf::from("/data"), Vec::new()));

        tx.on_loading_changed(true);
        tx.on_scan_progress(64);
        tx.on_data_ready(&snapshot);
        tx.on_loading_changed(false);
        tx.on_data_applied(&snapshot);
        tx.on_scan_failed(&CoreError::NotFound(PathBuf::from("/gone")));

        assert!(matches!(rx.try_recv(), Ok(Event::LoadingChanged(true))));
        assert!(matches!(rx.try_recv(), Ok(Event::Progress(64))));
        assert!(matches!(rx.try_recv(), Ok(Event::DataReady(s)) if Arc::ptr_eq(&s, &snapshot)));
        assert!(matches!(rx.try_recv(), Ok(Event::LoadingChanged(false))));
        assert!(matches!(rx.try_recv(), Ok(Event::DataApplied(_))));
        match rx.try_recv() {
            Ok(Event::ScanFailed(msg)) => assert_eq!(msg, "path not found: /gone"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn closed_channel_is_ignored() {
        let (mut tx, rx) = mpsc::unbounded_channel::<Event>();
        drop(rx);
        tx.on_loading_changed(true);
    }
}
