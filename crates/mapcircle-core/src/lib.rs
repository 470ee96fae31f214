//! # MapCircle Core
//!
//! Core types and utilities shared by the MapCircle crates.
//! Provides the error taxonomy, the broadcast bus used to coordinate
//! editable circles, process-unique instance ids, and distance units.

pub mod constants;
pub mod error;
pub mod event_bus;
pub mod ids;
pub mod types;
pub mod units;

pub use error::{CircleError, Error, HostError, Result};

// Re-export event bus for convenience
pub use event_bus::{
    BroadcastEvent, EventBus, EventBusConfig, EventBusError,
    HandleKind, SubscriptionId,
};

pub use ids::InstanceId;

pub use types::{shared, Shared};

pub use units::DistanceUnits;
