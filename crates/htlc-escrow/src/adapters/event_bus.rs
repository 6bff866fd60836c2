//! # Escrow Event Bus
//!
//! Broadcasts escrow lifecycle events to in-process subscribers.

use crate::domain::EscrowEvent;
use crate::ports::outbound::EscrowEventPublisher;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Default channel capacity.
pub const DEFAULT_EVENT_CAPACITY: usize = 1000;

/// In-memory event bus.
///
/// Uses `tokio::sync::broadcast`, so a subscriber that falls more than
/// `capacity` events behind sees `RecvError::Lagged`.
pub struct InMemoryEventBus {
    sender: broadcast::Sender<EscrowEvent>,
    events_published: AtomicU64,
    capacity: usize,
}

impl InMemoryEventBus {
    /// Create a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a bus with the given capacity (clamped to at least 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, _) = broadcast::channel(capacity);
        Self {
            sender,
            events_published: AtomicU64::new(0),
            capacity,
        }
    }

    /// Subscribe to every event published from now on.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<EscrowEvent> {
        self.sender.subscribe()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    /// Channel capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EscrowEventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EscrowEvent) -> usize {
        let topic = event.topic();
        self.events_published.fetch_add(1, Ordering::Relaxed);

        match self.sender.send(event) {
            Ok(receivers) => {
                debug!(topic, receivers, "[htlc] Event published");
                receivers
            }
            Err(_) => {
                warn!(topic, "[htlc] Event dropped (no receivers)");
                0
            }
        }
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}

/// Publisher that discards everything.
#[derive(Debug, Default)]
pub struct NoOpPublisher {
    events_published: AtomicU64,
}

#[async_trait]
impl EscrowEventPublisher for NoOpPublisher {
    async fn publish(&self, _event: EscrowEvent) -> usize {
        self.events_published.fetch_add(1, Ordering::Relaxed);
        0
    }

    fn events_published(&self) -> u64 {
        self.events_published.load(Ordering::Relaxed)
    }
}
