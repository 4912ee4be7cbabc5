//! Event Bus implementation.
//!
//! Synchronous handlers run on the publishing thread; async consumers take
//! a broadcast receiver. An optional bounded history keeps recent events
//! for diagnostics.

use parking_lot::RwLock;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Filter to receive only specific event types
#[derive(Debug, Clone, Default)]
pub enum EventFilter {
    /// Receive all events.
    #[default]
    All,
    /// Receive events matching any of these categories.
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    /// Check if an event matches this filter
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type EventHandler = Box<dyn Fn(&AppEvent) + Send + Sync>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Channel capacity for broadcast.
    pub channel_capacity: usize,
    /// Maximum number of events kept in history; 0 disables history.
    pub history_size: usize,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 256,
            history_size: 0,
        }
    }
}

/// Publish/subscribe hub shared by the map components
pub struct EventBus {
    sender: broadcast::Sender<AppEvent>,
    handlers: RwLock<HashMap<SubscriptionId, (EventFilter, EventHandler)>>,
    history: RwLock<VecDeque<AppEvent>>,
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
        Self {
            sender,
            handlers: RwLock::new(HashMap::new()),
            history: RwLock::new(VecDeque::new()),
            config,
        }
    }

    /// Convenience constructor returning a shareable bus
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Publish an event to handlers and receivers
    ///
    /// Returns how many handlers and receivers saw the event. Having no
    /// listeners is not an error.
    pub fn publish(&self, event: AppEvent) -> usize {
        tracing::trace!("event: {}", event.description());

        if self.config.history_size > 0 {
            let mut history = self.history.write();
            history.push_back(event.clone());
            while history.len() > self.config.history_size {
                history.pop_front();
            }
        }

        let mut delivered = 0;
        {
            let handlers = self.handlers.read();
            for (filter, handler) in handlers.values() {
                if filter.matches(&event) {
                    handler(&event);
                    delivered += 1;
                }
            }
        }

        delivered + self.sender.send(event).unwrap_or(0)
    }

    /// Subscribe with a synchronous handler
    ///
    /// The handler runs on the publishing thread and must not publish on
    /// the same bus.
    pub fn subscribe<F>(&self, filter: EventFilter, handler: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId::new();
        self.handlers.write().insert(id, (filter, Box::new(handler)));
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Get a receiver for polling events from an async task
    pub fn receiver(&self) -> broadcast::Receiver<AppEvent> {
        self.sender.subscribe()
    }

    /// Unsubscribe; returns true if the subscription existed
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let removed = self.handlers.write().remove(&id).is_some();
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Number of synchronous subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Events kept in history, oldest first
    pub fn history(&self) -> Vec<AppEvent> {
        self.history.read().iter().cloned().collect()
    }

    /// Clear event history
    pub fn clear_history(&self) {
        self.history.write().clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .field("config", &self.config)
            .finish()
    }
}
