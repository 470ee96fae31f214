//! Event Bus implementation.
//!
//! A synchronous, single-threaded publish/subscribe bus. Handlers run on
//! the publishing thread in subscription order.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};
use uuid::Uuid;

use super::events::BroadcastEvent;
use crate::ids::InstanceId;

/// Subscription handle for unsubscribing from events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Create a new unique subscription ID
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sub({})", &self.0.to_string()[..8])
    }
}

/// Type alias for event handler functions
type EventHandler = Rc<dyn Fn(&BroadcastEvent)>;

/// Configuration for the event bus
#[derive(Debug, Clone)]
pub struct EventBusConfig {
    /// Subscriber count above which a warning is logged.
    pub max_listeners: usize,
    /// Whether to keep event history.
    pub enable_history: bool,
    /// Maximum number of events to retain in history.
    pub max_history_size: usize,
    /// How long to retain events in history.
    pub history_retention: Duration,
}

impl Default for EventBusConfig {
    fn default() -> Self {
        Self {
            max_listeners: 10,
            enable_history: false,
            max_history_size: 1000,
            history_retention: Duration::from_secs(300),
        }
    }
}

/// Event with timestamp for history
#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: BroadcastEvent,
    timestamp: Instant,
}

/// Error types for event bus operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventBusError {
    /// No subscribers are listening
    #[error("No active subscribers")]
    NoSubscribers,
}

struct Subscription {
    id: SubscriptionId,
    /// Events published by this instance are not delivered back to it
    owner: InstanceId,
    handler: EventHandler,
}

/// Publish/subscribe bus for broadcast events
pub struct EventBus {
    /// Registered handlers, in subscription order
    handlers: RefCell<Vec<Subscription>>,
    /// Event history (optional)
    history: RefCell<VecDeque<TimestampedEvent>>,
    /// Current listener ceiling; starts at `config.max_listeners`
    max_listeners: Cell<usize>,
    /// Configuration
    config: EventBusConfig,
}

impl EventBus {
    /// Create a new event bus with default configuration
    pub fn new() -> Self {
        Self::with_config(EventBusConfig::default())
    }

    /// Create a new event bus with custom configuration
    pub fn with_config(config: EventBusConfig) -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            history: RefCell::new(VecDeque::new()),
            max_listeners: Cell::new(config.max_listeners),
            config,
        }
    }

    /// Publish an event to all matching subscribers
    ///
    /// Returns the number of handlers the event was delivered to, or an
    /// error if nobody is subscribed. Handlers may subscribe or unsubscribe
    /// while the event is being delivered; such changes apply to the next
    /// publish.
    pub fn publish(&self, event: BroadcastEvent) -> Result<usize, EventBusError> {
        if self.config.enable_history {
            self.add_to_history(&event);
        }

        let targets: Vec<EventHandler> = {
            let handlers = self.handlers.borrow();
            if handlers.is_empty() {
                return Err(EventBusError::NoSubscribers);
            }
            handlers
                .iter()
                .filter(|sub| sub.owner != event.source())
                .map(|sub| Rc::clone(&sub.handler))
                .collect()
        };

        tracing::trace!("Publishing {} to {} handler(s)", event.description(), targets.len());
        for handler in &targets {
            handler(&event);
        }
        Ok(targets.len())
    }

    /// Subscribe `owner` to every event another instance publishes
    pub fn subscribe<F>(&self, owner: InstanceId, handler: F) -> SubscriptionId
    where
        F: Fn(&BroadcastEvent) + 'static,
    {
        let id = SubscriptionId::new();
        let count = {
            let mut handlers = self.handlers.borrow_mut();
            handlers.push(Subscription {
                id,
                owner,
                handler: Rc::new(handler),
            });
            handlers.len()
        };
        let max = self.max_listeners.get();
        if count > max {
            tracing::warn!(
                "Event bus has {} subscribers, above the configured maximum of {}",
                count,
                max
            );
        }
        tracing::debug!("Subscription {} added", id);
        id
    }

    /// Unsubscribe from events
    ///
    /// Returns true if the subscription was found and removed.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.borrow_mut();
        let before = handlers.len();
        handlers.retain(|sub| sub.id != id);
        let removed = handlers.len() != before;
        if removed {
            tracing::debug!("Subscription {} removed", id);
        }
        removed
    }

    /// Get the number of active subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.borrow().len()
    }

    /// Current listener ceiling.
    pub fn max_listeners(&self) -> usize {
        self.max_listeners.get()
    }

    /// Adjust the listener ceiling.
    pub fn set_max_listeners(&self, max: usize) {
        self.max_listeners.set(max);
    }

    /// Get recent event history (if enabled)
    ///
    /// Returns events since the given instant, or all history if None.
    pub fn history(&self, since: Option<Instant>) -> Vec<BroadcastEvent> {
        if !self.config.enable_history {
            return Vec::new();
        }

        let history = self.history.borrow();
        match since {
            Some(since) => history
                .iter()
                .filter(|e| e.timestamp >= since)
                .map(|e| e.event)
                .collect(),
            None => history.iter().map(|e| e.event).collect(),
        }
    }

    /// Clear event history
    pub fn clear_history(&self) {
        self.history.borrow_mut().clear();
    }

    /// Get the configuration the bus was created with
    pub fn config(&self) -> &EventBusConfig {
        &self.config
    }

    /// Add an event to history, maintaining size and age limits
    fn add_to_history(&self, event: &BroadcastEvent) {
        let mut history = self.history.borrow_mut();
        let now = Instant::now();

        history.push_back(TimestampedEvent {
            event: *event,
            timestamp: now,
        });

        let retention = self.config.history_retention;
        while history
            .front()
            .is_some_and(|e| now.duration_since(e.timestamp) > retention)
        {
            history.pop_front();
        }

        while history.len() > self.config.max_history_size {
            history.pop_front();
        }
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
            .field("max_listeners", &self.max_listeners())
            .field("config", &self.config)
            .finish()
    }
}
