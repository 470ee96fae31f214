//! Per-handle drag state machine.
//!
//! A controller tracks one handle kind. It decides whether a pointer-down
//! may start a drag, holds the latest unapplied pointer move until the next
//! animation frame, and times the debounced hover reset. Host side effects
//! (cursor, paint, listeners) are applied by the circle.

use std::time::{Duration, Instant};

use mapcircle_core::HandleKind;

use crate::host::{Cursor, PointerEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Debug)]
pub struct HandleDragController {
    kind: HandleKind,
    state: DragState,
    highlighted: bool,
    pending_move: Option<PointerEvent>,
    dropped_moves: u64,
    reset_due: Option<Instant>,
}

impl HandleDragController {
    pub fn new(kind: HandleKind) -> Self {
        Self {
            kind,
            state: DragState::Idle,
            highlighted: false,
            pending_move: None,
            dropped_moves: 0,
            reset_due: None,
        }
    }

    pub fn kind(&self) -> HandleKind {
        self.kind
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Whether the host cursor shows the affordance this handle expects.
    pub fn accepts_cursor(&self, cursor: Cursor) -> bool {
        match self.kind {
            HandleKind::Center => cursor == Cursor::Move,
            HandleKind::Radius => matches!(cursor, Cursor::EwResize | Cursor::NsResize),
        }
    }

    /// `Idle -> Dragging`. Returns false when already dragging or the
    /// cursor does not match.
    pub fn begin(&mut self, cursor: Cursor) -> bool {
        if self.is_dragging() || !self.accepts_cursor(cursor) {
            return false;
        }
        self.state = DragState::Dragging;
        self.highlighted = true;
        self.reset_due = None;
        self.pending_move = None;
        self.dropped_moves = 0;
        true
    }

    /// `Dragging -> Idle`. Returns false if no drag was active.
    pub fn finish(&mut self) -> bool {
        if !self.is_dragging() {
            return false;
        }
        self.state = DragState::Idle;
        self.highlighted = false;
        self.pending_move = None;
        true
    }

    /// Queue a move for the next frame, replacing any unapplied one.
    pub fn queue_move(&mut self, event: PointerEvent) {
        if !self.is_dragging() {
            return;
        }
        if self.pending_move.replace(event).is_some() {
            self.dropped_moves += 1;
        }
    }

    pub fn take_move(&mut self) -> Option<PointerEvent> {
        self.pending_move.take()
    }

    pub fn has_pending_move(&self) -> bool {
        self.pending_move.is_some()
    }

    /// Moves replaced before a frame applied them, during the current drag.
    pub fn dropped_moves(&self) -> u64 {
        self.dropped_moves
    }

    /// Pointer entered the handle. Returns true if the highlight turned on.
    pub fn hover_enter(&mut self) -> bool {
        self.reset_due = None;
        let changed = !self.highlighted;
        self.highlighted = true;
        changed
    }

    /// Pointer left the handle; schedule an un-highlight.
    pub fn hover_leave(&mut self, now: Instant, debounce: Duration) {
        if !self.is_dragging() && self.highlighted {
            self.reset_due = Some(now + debounce);
        }
    }

    /// Returns true if a scheduled reset fired, un-highlighting the handle.
    pub fn take_due_reset(&mut self, now: Instant) -> bool {
        match self.reset_due {
            Some(due) if now >= due => {
                self.reset_due = None;
                if self.is_dragging() {
                    return false;
                }
                self.highlighted = false;
                true
            }
            _ => false,
        }
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_due.is_some()
    }

    /// Back to idle, discarding any drag or hover state.
    pub fn reset(&mut self) {
        self.state = DragState::Idle;
        self.highlighted = false;
        self.pending_move = None;
        self.reset_due = None;
    }
}

/// Resize cursor for a pointer at `bearing` degrees from the center.
pub fn resize_cursor(bearing: f64) -> Cursor {
    let b = bearing.abs();
    if b <= 45.0 || b >= 135.0 {
        Cursor::NsResize
    } else {
        Cursor::EwResize
    }
}

/// A pointer-out caused by crossing onto or off a marker element.
pub fn is_spurious_pointer_out(event: &PointerEvent) -> bool {
    event.transition.from_marker || event.transition.to_marker
}
