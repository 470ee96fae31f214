//! # Event Bus Module
//!
//! Provides the publish/subscribe bus that editable circles use to
//! coordinate with each other.
//!
//! ## Overview
//!
//! - Publishers emit [`BroadcastEvent`]s without knowing subscribers
//! - Subscribers never receive events they published themselves
//! - Delivery is synchronous, on the publishing (UI) thread
//!
//! ## Usage
//!
//! ```rust,ignore
//! use mapcircle_core::event_bus::{BroadcastEvent, EventBus, HandleKind};
//!
//! let bus = EventBus::new();
//! let subscription = bus.subscribe(my_id, |event| {
//!     tracing::debug!("{}", event.description());
//! });
//!
//! bus.publish(BroadcastEvent::Suspend { source: other_id, handle: HandleKind::Center }).ok();
//!
//! bus.unsubscribe(subscription);
//! ```

mod bus;
mod events;

pub use bus::*;
pub use events::*;
