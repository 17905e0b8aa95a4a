//! Broadcast fanout of store events.
//!
//! One writer (the store), N readers (one per open stream connection). Each
//! reader owns a bounded buffer; dropping the receiver unsubscribes. There
//! is no replay: a receiver only sees events emitted after it subscribed, so
//! new connections must fetch a snapshot separately.

use a2ui_protocol::StoreEvent;
use tokio::sync::broadcast;

const DEFAULT_CAPACITY: usize = 128;

/// Broadcast channel wrapper carrying [`StoreEvent`]s.
pub struct EventFanout {
    tx: broadcast::Sender<StoreEvent>,
}

impl EventFanout {
    /// Create a fanout whose receivers buffer up to `capacity` events.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe; the returned receiver sees every event emitted from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Deliver an event to all current subscribers. Emitting with no
    /// subscribers is not an error.
    pub fn emit(&self, event: StoreEvent) {
        let _ = self.tx.send(event);
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for EventFanout {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}
