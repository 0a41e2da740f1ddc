//! Event system for polling progress
//!
//! Provides:
//! - Event types for run lifecycle, status and snapshot changes
//! - Event dispatcher for publishing events to subscribers

use crate::data::{GridConfig, RunStatus};
use crate::error::TransportError;
use crate::validation::ValidationResult;
use tokio::sync::broadcast;

/// Polling event types
#[derive(Debug, Clone)]
pub enum PollEvent {
    /// A run started on the given grid
    Started(GridConfig),
    /// A status report was applied
    StatusUpdated(RunStatus),
    /// The snapshot was replaced and redrawn
    SnapshotReplaced {
        /// Colored cells in the new snapshot
        cells: usize,
    },
    /// A tick fired while the previous fetch was still in flight
    TickSkipped,
    /// The finished run was validated
    Validated(ValidationResult),
    /// Polling stopped on a transport error
    Failed(TransportError),
    /// Polling was stopped by the caller
    Stopped,
}

impl PollEvent {
    /// Whether no further events follow for this run
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            PollEvent::Validated(_) | PollEvent::Failed(_) | PollEvent::Stopped
        )
    }
}

impl std::fmt::Display for PollEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PollEvent::Started(config) => write!(f, "Started {} grid", config),
            PollEvent::StatusUpdated(status) => write!(f, "Status: {}", status),
            PollEvent::SnapshotReplaced { cells } => write!(f, "Snapshot: {} cells", cells),
            PollEvent::TickSkipped => write!(f, "Tick skipped, fetch in flight"),
            PollEvent::Validated(result) => write!(f, "Validated: {}", result),
            PollEvent::Failed(err) => write!(f, "Failed: {}", err),
            PollEvent::Stopped => write!(f, "Stopped"),
        }
    }
}

/// Event dispatcher for publishing events to subscribers
#[derive(Clone)]
pub struct EventDispatcher {
    /// Broadcast sender channel for poll events.
    tx: broadcast::Sender<PollEvent>,
}

impl EventDispatcher {
    /// Create a new event dispatcher
    ///
    /// # Arguments
    /// * `buffer_size` - Size of the broadcast buffer (default 100)
    pub fn new(buffer_size: usize) -> Self {
        let (tx, _) = broadcast::channel(buffer_size);
        Self { tx }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> broadcast::Receiver<PollEvent> {
        self.tx.subscribe()
    }

    /// Publish an event to all subscribers
    ///
    /// Returns the number of subscribers reached; zero when nobody listens.
    pub fn publish(&self, event: PollEvent) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Get number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_without_subscribers() {
        let dispatcher = EventDispatcher::default();
        assert_eq!(dispatcher.publish(PollEvent::TickSkipped), 0);
    }

    #[tokio::test]
    async fn test_subscriber_receives_events() {
        let dispatcher = EventDispatcher::default();
        let mut rx = dispatcher.subscribe();
        assert_eq!(dispatcher.subscriber_count(), 1);

        dispatcher.publish(PollEvent::SnapshotReplaced { cells: 3 });
        dispatcher.publish(PollEvent::Stopped);

        let first = rx.recv().await.unwrap();
        assert_eq!(first.to_string(), "Snapshot: 3 cells");
        assert!(rx.recv().await.unwrap().is_final());
    }
}
