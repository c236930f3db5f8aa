//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::broadcast;

use super::types::{TreeEvent, UsageEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Usage counter changes (increments, resets)
    Usage,
    /// Tree reordering
    Tree,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Usage(UsageEvent),
    Tree(TreeEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Usage(_) => Topic::Usage,
            Event::Tree(_) => Topic::Tree,
        }
    }
}

/// Topic-based event bus
///
/// Channels are created up front for every topic, so the map is never
/// mutated after construction and needs no lock. `send` and `try_recv` are
/// synchronous, which keeps the bus usable from the single-threaded
/// activation path.
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Per-topic capacity used by [`EventBus::new`].
    pub const DEFAULT_CAPACITY: usize = 100;

    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut channels = HashMap::new();

        // Pre-create channels for each topic
        channels.insert(Topic::Usage, broadcast::channel(capacity).0);
        channels.insert(Topic::Tree, broadcast::channel(capacity).0);

        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();

        if let Some(tx) = self.channels.get(&topic)
            && tx.send(event).is_err()
        {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic, or
    /// `None` if the topic has no channel.
    pub fn subscribe(&self, topic: Topic) -> Option<broadcast::Receiver<Event>> {
        self.channels.get(&topic).map(broadcast::Sender::subscribe)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            channels: Arc::clone(&self.channels),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
