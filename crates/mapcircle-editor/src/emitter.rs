//! Public circle events.
//!
//! This channel is separate from the coordinator bus: it only carries what
//! applications subscribe to through [`crate::Circle::on`].

use std::fmt;
use std::rc::Rc;

use crate::circle::Circle;
use crate::host::PointerEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CircleEventKind {
    Click,
    ContextMenu,
    CenterChanged,
    RadiusChanged,
    /// First successful render after attaching.
    Rendered,
}

impl fmt::Display for CircleEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CircleEventKind::Click => "click",
            CircleEventKind::ContextMenu => "contextmenu",
            CircleEventKind::CenterChanged => "centerchanged",
            CircleEventKind::RadiusChanged => "radiuschanged",
            CircleEventKind::Rendered => "rendered",
        })
    }
}

/// An event delivered to circle listeners.
pub enum CircleEvent<'a> {
    Click(&'a PointerEvent),
    ContextMenu(&'a PointerEvent),
    CenterChanged(&'a Circle),
    RadiusChanged(&'a Circle),
    Rendered(&'a Circle),
}

impl CircleEvent<'_> {
    pub fn kind(&self) -> CircleEventKind {
        match self {
            CircleEvent::Click(_) => CircleEventKind::Click,
            CircleEvent::ContextMenu(_) => CircleEventKind::ContextMenu,
            CircleEvent::CenterChanged(_) => CircleEventKind::CenterChanged,
            CircleEvent::RadiusChanged(_) => CircleEventKind::RadiusChanged,
            CircleEvent::Rendered(_) => CircleEventKind::Rendered,
        }
    }

    /// The pointer payload of click and context-menu events.
    pub fn pointer(&self) -> Option<&PointerEvent> {
        match self {
            CircleEvent::Click(p) | CircleEvent::ContextMenu(p) => Some(p),
            _ => None,
        }
    }

    /// The circle payload of change and render events.
    pub fn circle(&self) -> Option<&Circle> {
        match self {
            CircleEvent::CenterChanged(c) | CircleEvent::RadiusChanged(c) | CircleEvent::Rendered(c) => {
                Some(c)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for CircleEvent<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CircleEvent({})", self.kind())
    }
}

/// Handle returned by [`crate::Circle::on`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type CircleEventHandler = Rc<dyn Fn(&CircleEvent<'_>)>;

struct Entry {
    id: ListenerId,
    kind: CircleEventKind,
    once: bool,
    handler: CircleEventHandler,
}

/// Listener registry for one circle.
#[derive(Default)]
pub struct Emitter {
    entries: Vec<Entry>,
    next_id: u64,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: CircleEventKind, handler: CircleEventHandler, once: bool) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            kind,
            once,
            handler,
        });
        id
    }

    /// Returns false if the listener was already removed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Remove every listener of `kind`; returns how many were removed.
    pub fn off_kind(&mut self, kind: CircleEventKind) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.kind != kind);
        before - self.entries.len()
    }

    /// Handlers to call for `kind`, in registration order.
    ///
    /// One-shot listeners are removed here, so callers can invoke the
    /// returned handlers after releasing any borrow on the emitter.
    pub fn handlers_for(&mut self, kind: CircleEventKind) -> Vec<CircleEventHandler> {
        let handlers = self
            .entries
            .iter()
            .filter(|e| e.kind == kind)
            .map(|e| Rc::clone(&e.handler))
            .collect();
        self.entries.retain(|e| !(e.kind == kind && e.once));
        handlers
    }

    pub fn listener_count(&self, kind: CircleEventKind) -> usize {
        self.entries.iter().filter(|e| e.kind == kind).count()
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.entries.len())
            .finish()
    }
}
