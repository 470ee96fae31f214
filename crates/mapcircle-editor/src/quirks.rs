//! Host-specific input quirks.
//!
//! Some hosts raise a click alongside the context-menu event when the menu
//! is opened with a modifier-click. A [`HostQuirks`] strategy recognises
//! that gesture and [`GestureDedup`] makes sure it surfaces as exactly one
//! `contextmenu`.

use std::time::{Duration, Instant};

use crate::host::{MouseButton, PointerEvent, ScreenPoint};

/// Window within which a click and context-menu pair belong to one gesture.
pub const GESTURE_PAIR_WINDOW: Duration = Duration::from_millis(500);

pub trait HostQuirks {
    /// Whether this click is really the platform's context-menu gesture.
    fn click_is_context_menu(&self, _event: &PointerEvent) -> bool {
        false
    }
}

/// Hosts with no input quirks.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoQuirks;

impl HostQuirks for NoQuirks {}

/// Hosts where ctrl + primary click opens the context menu and also clicks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModifierClickContextMenu;

impl HostQuirks for ModifierClickContextMenu {
    fn click_is_context_menu(&self, event: &PointerEvent) -> bool {
        event.button == MouseButton::Primary && event.modifiers.ctrl
    }
}

/// How a fill-layer pointer event surfaces to listeners.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureClass {
    Click,
    ContextMenu,
    /// Second half of a gesture already reported.
    Swallowed,
}

#[derive(Debug, Clone, Copy)]
struct Reported {
    point: ScreenPoint,
    at: Instant,
    /// The host event that reported it was a click.
    via_click: bool,
}

/// Collapses a modifier-click and its paired context-menu into one event.
#[derive(Debug, Default)]
pub struct GestureDedup {
    last: Option<Reported>,
}

impl GestureDedup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify_click(&mut self, event: &PointerEvent, quirks: &dyn HostQuirks) -> GestureClass {
        if !quirks.click_is_context_menu(event) {
            return GestureClass::Click;
        }
        if self.take_pair(event, false) {
            return GestureClass::Swallowed;
        }
        self.remember(event, true);
        GestureClass::ContextMenu
    }

    pub fn classify_context_menu(&mut self, event: &PointerEvent) -> GestureClass {
        if self.take_pair(event, true) {
            return GestureClass::Swallowed;
        }
        self.remember(event, false);
        GestureClass::ContextMenu
    }

    fn remember(&mut self, event: &PointerEvent, via_click: bool) {
        self.last = Some(Reported {
            point: event.point,
            at: event.timestamp,
            via_click,
        });
    }

    /// Consume a remembered gesture reported through the other channel.
    fn take_pair(&mut self, event: &PointerEvent, via_click: bool) -> bool {
        let paired = self.last.is_some_and(|r| {
            r.via_click == via_click
                && r.point == event.point
                && event.timestamp.saturating_duration_since(r.at) <= GESTURE_PAIR_WINDOW
        });
        if paired {
            self.last = None;
        }
        paired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::Modifiers;
    use mapcircle_geodesy::LngLat;

    fn click(ctrl: bool, at: Instant) -> PointerEvent {
        let ev = PointerEvent::new(ScreenPoint::new(5.0, 5.0), LngLat::default()).at(at);
        if ctrl {
            ev.with_modifiers(Modifiers::ctrl())
        } else {
            ev
        }
    }

    #[test]
    fn test_no_quirks_passes_clicks() {
        let mut dedup = GestureDedup::new();
        let t = Instant::now();
        assert_eq!(dedup.classify_click(&click(true, t), &NoQuirks), GestureClass::Click);
    }

    #[test]
    fn test_click_then_context_menu() {
        let mut dedup = GestureDedup::new();
        let t = Instant::now();
        let quirks = ModifierClickContextMenu;
        assert_eq!(dedup.classify_click(&click(true, t), &quirks), GestureClass::ContextMenu);
        assert_eq!(
            dedup.classify_context_menu(&click(true, t + Duration::from_millis(5))),
            GestureClass::Swallowed
        );
        // next gesture reports again
        assert_eq!(
            dedup.classify_context_menu(&click(true, t + Duration::from_secs(2))),
            GestureClass::ContextMenu
        );
    }

    #[test]
    fn test_context_menu_then_click() {
        let mut dedup = GestureDedup::new();
        let t = Instant::now();
        let quirks = ModifierClickContextMenu;
        assert_eq!(dedup.classify_context_menu(&click(true, t)), GestureClass::ContextMenu);
        assert_eq!(dedup.classify_click(&click(true, t), &quirks), GestureClass::Swallowed);
        assert_eq!(dedup.classify_click(&click(false, t), &quirks), GestureClass::Click);
    }

    #[test]
    fn test_pair_window_expires() {
        let mut dedup = GestureDedup::new();
        let t = Instant::now();
        dedup.classify_context_menu(&click(true, t));
        assert_eq!(
            dedup.classify_click(&click(true, t + Duration::from_secs(1)), &ModifierClickContextMenu),
            GestureClass::ContextMenu
        );
    }
}
