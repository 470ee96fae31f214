//! Event type definitions for the broadcast bus.
//!
//! Broadcast events coordinate editable circles that share a map: a circle
//! starting a drag asks its siblings to suspend their pointer listeners,
//! and asks them to resume when the drag ends.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ids::InstanceId;

/// The kind of on-canvas handle a user can drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HandleKind {
    /// The single handle at the circle center; dragging moves the circle.
    Center,
    /// The four cardinal handles on the rim; dragging resizes the circle.
    Radius,
}

impl HandleKind {
    /// The other handle kind.
    pub fn other(self) -> Self {
        match self {
            Self::Center => Self::Radius,
            Self::Radius => Self::Center,
        }
    }
}

impl fmt::Display for HandleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Center => write!(f, "center"),
            Self::Radius => write!(f, "radius"),
        }
    }
}

/// Root event enum for the broadcast bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BroadcastEvent {
    /// A drag started on `source`; listeners must be unbound.
    Suspend {
        /// The circle whose handle is being dragged.
        source: InstanceId,
        /// Which handle is being dragged.
        handle: HandleKind,
    },
    /// The drag on `source` ended; listeners may be rebound.
    Resume {
        /// The circle whose drag ended.
        source: InstanceId,
        /// Which handle was being dragged.
        handle: HandleKind,
    },
}

impl BroadcastEvent {
    /// Short lowercase name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Suspend { .. } => "suspend",
            Self::Resume { .. } => "resume",
        }
    }

    /// The instance that published the event.
    pub fn source(&self) -> InstanceId {
        match self {
            Self::Suspend { source, .. } | Self::Resume { source, .. } => *source,
        }
    }

    /// The handle kind the event refers to.
    pub fn handle(&self) -> HandleKind {
        match self {
            Self::Suspend { handle, .. } | Self::Resume { handle, .. } => *handle,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        format!(
            "{} {} handle listeners (source circle {})",
            self.name(),
            self.handle(),
            self.source()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_accessors() {
        let source = InstanceId::next();
        let event = BroadcastEvent::Suspend {
            source,
            handle: HandleKind::Radius,
        };
        assert_eq!(event.name(), "suspend");
        assert_eq!(event.source(), source);
        assert_eq!(event.handle(), HandleKind::Radius);
        assert!(event.description().starts_with("suspend radius"));
    }

    #[test]
    fn test_other_handle() {
        assert_eq!(HandleKind::Center.other(), HandleKind::Radius);
        assert_eq!(HandleKind::Radius.other(), HandleKind::Center);
    }
}
