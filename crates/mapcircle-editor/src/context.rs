//! Collaborators shared by the circles of one map.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use mapcircle_core::constants::HOVER_RESET_DEBOUNCE;
use mapcircle_geodesy::{GeodesyPort, Spherical};

use crate::coordinator::BroadcastCoordinator;
use crate::quirks::{HostQuirks, NoQuirks};

/// Services a circle is constructed with.
///
/// Circles that should coordinate drags must share one coordinator, so
/// clone a single context for all of them.
#[derive(Clone)]
pub struct EditorContext {
    pub coordinator: Rc<BroadcastCoordinator>,
    pub geodesy: Rc<dyn GeodesyPort>,
    pub quirks: Rc<dyn HostQuirks>,
    /// Delay before a hovered handle is un-highlighted after the pointer leaves.
    pub hover_debounce: Duration,
}

impl EditorContext {
    pub fn new() -> Self {
        Self {
            coordinator: Rc::new(BroadcastCoordinator::new()),
            geodesy: Rc::new(Spherical),
            quirks: Rc::new(NoQuirks),
            hover_debounce: HOVER_RESET_DEBOUNCE,
        }
    }

    pub fn with_coordinator(mut self, coordinator: Rc<BroadcastCoordinator>) -> Self {
        self.coordinator = coordinator;
        self
    }

    pub fn with_geodesy(mut self, geodesy: Rc<dyn GeodesyPort>) -> Self {
        self.geodesy = geodesy;
        self
    }

    pub fn with_quirks(mut self, quirks: Rc<dyn HostQuirks>) -> Self {
        self.quirks = quirks;
        self
    }

    pub fn with_hover_debounce(mut self, debounce: Duration) -> Self {
        self.hover_debounce = debounce;
        self
    }
}

impl Default for EditorContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorContext")
            .field("coordinator", &self.coordinator)
            .field("hover_debounce", &self.hover_debounce)
            .finish_non_exhaustive()
    }
}
