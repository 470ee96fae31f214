//! The host map boundary.
//!
//! A circle never owns a rendering engine. It drives one through
//! [`HostMap`], and the host drives the circle back by forwarding the
//! events it subscribed to ([`crate::Circle::handle_event`]) and by ticking
//! animation frames ([`crate::Circle::on_animation_frame`]).

use std::fmt;
use std::rc::Rc;
use std::time::Instant;

use mapcircle_core::{HostError, Shared};
use mapcircle_geodesy::LngLat;
use serde_json::{Map, Value};

/// Shared handle to a host map.
pub type MapHandle = Shared<dyn HostMap>;

/// Whether two handles refer to the same host map.
pub fn same_map(a: &MapHandle, b: &MapHandle) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Canvas cursor affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Move,
    EwResize,
    NsResize,
}

impl Cursor {
    /// CSS cursor keyword.
    pub fn css(self) -> &'static str {
        match self {
            Cursor::Default => "",
            Cursor::Pointer => "pointer",
            Cursor::Move => "move",
            Cursor::EwResize => "ew-resize",
            Cursor::NsResize => "ns-resize",
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Cursor::Default => "default",
            other => other.css(),
        })
    }
}

/// A point in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn ctrl() -> Self {
        Self {
            ctrl: true,
            ..Self::default()
        }
    }

    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Which DOM elements a pointer-out moved between.
///
/// Hosts fill this in from the native event's target and related target.
/// A transition touching a marker element is not a real exit from the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementTransition {
    pub from_marker: bool,
    pub to_marker: bool,
}

/// Pointer payload of a host event.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerEvent {
    pub point: ScreenPoint,
    pub lng_lat: LngLat,
    pub button: MouseButton,
    pub modifiers: Modifiers,
    pub transition: ElementTransition,
    pub timestamp: Instant,
}

impl PointerEvent {
    pub fn new(point: ScreenPoint, lng_lat: LngLat) -> Self {
        Self {
            point,
            lng_lat,
            button: MouseButton::Primary,
            modifiers: Modifiers::default(),
            transition: ElementTransition::default(),
            timestamp: Instant::now(),
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_transition(mut self, transition: ElementTransition) -> Self {
        self.transition = transition;
        self
    }

    pub fn at(mut self, timestamp: Instant) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListenerTarget {
    /// The whole map canvas.
    Map,
    /// Features of one style layer.
    Layer(String),
}

impl ListenerTarget {
    pub fn layer(id: impl Into<String>) -> Self {
        Self::Layer(id.into())
    }
}

impl fmt::Display for ListenerTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListenerTarget::Map => f.write_str("map"),
            ListenerTarget::Layer(id) => write!(f, "layer:{id}"),
        }
    }
}

/// Host event names a circle subscribes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Load,
    Render,
    StyleData,
    ZoomEnd,
    PointerEnter,
    PointerLeave,
    PointerDown,
    PointerUp,
    PointerMove,
    PointerOut,
    Click,
    ContextMenu,
}

impl EventKind {
    /// Events that carry a [`PointerEvent`].
    pub fn is_pointer(self) -> bool {
        !matches!(
            self,
            EventKind::Load | EventKind::Render | EventKind::StyleData | EventKind::ZoomEnd
        )
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EventKind::Load => "load",
            EventKind::Render => "render",
            EventKind::StyleData => "styledata",
            EventKind::ZoomEnd => "zoomend",
            EventKind::PointerEnter => "mouseenter",
            EventKind::PointerLeave => "mouseleave",
            EventKind::PointerDown => "mousedown",
            EventKind::PointerUp => "mouseup",
            EventKind::PointerMove => "mousemove",
            EventKind::PointerOut => "mouseout",
            EventKind::Click => "click",
            EventKind::ContextMenu => "contextmenu",
        })
    }
}

/// An event delivered by the host to a listener.
#[derive(Debug, Clone, PartialEq)]
pub struct MapEvent {
    pub target: ListenerTarget,
    pub kind: EventKind,
    pub pointer: Option<PointerEvent>,
}

impl MapEvent {
    /// A map-level lifecycle event without pointer data.
    pub fn map(kind: EventKind) -> Self {
        Self {
            target: ListenerTarget::Map,
            kind,
            pointer: None,
        }
    }

    /// A pointer event on the map canvas.
    pub fn map_pointer(kind: EventKind, pointer: PointerEvent) -> Self {
        Self {
            target: ListenerTarget::Map,
            kind,
            pointer: Some(pointer),
        }
    }

    /// A pointer event on a style layer.
    pub fn layer(layer: impl Into<String>, kind: EventKind, pointer: PointerEvent) -> Self {
        Self {
            target: ListenerTarget::Layer(layer.into()),
            kind,
            pointer: Some(pointer),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerType {
    Line,
    Fill,
    Circle,
}

impl LayerType {
    pub fn as_str(self) -> &'static str {
        match self {
            LayerType::Line => "line",
            LayerType::Fill => "fill",
            LayerType::Circle => "circle",
        }
    }
}

/// A style layer definition.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSpec {
    pub id: String,
    pub layer_type: LayerType,
    pub source: String,
    pub paint: Map<String, Value>,
}

impl LayerSpec {
    /// Style JSON for hosts that take layer definitions as documents.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "id": self.id,
            "type": self.layer_type.as_str(),
            "source": self.source,
            "paint": self.paint,
        })
    }
}

/// A slippy-map rendering engine a circle can draw into.
pub trait HostMap {
    // Sources

    /// Add a GeoJSON source.
    fn add_source(&mut self, id: &str, data: Value) -> Result<(), HostError>;
    /// Replace the data of an existing GeoJSON source.
    fn set_source_data(&mut self, id: &str, data: Value) -> Result<(), HostError>;
    fn remove_source(&mut self, id: &str) -> Result<(), HostError>;
    fn has_source(&self, id: &str) -> bool;

    // Layers

    /// Add a style layer, below `before` when given.
    fn add_layer(&mut self, layer: LayerSpec, before: Option<&str>) -> Result<(), HostError>;
    fn remove_layer(&mut self, id: &str) -> Result<(), HostError>;
    fn has_layer(&self, id: &str) -> bool;
    fn set_paint_property(&mut self, layer: &str, name: &str, value: Value)
        -> Result<(), HostError>;

    // Listeners

    /// Start forwarding `kind` events on `target` to the circle.
    fn listen(&mut self, target: &ListenerTarget, kind: EventKind);
    fn unlisten(&mut self, target: &ListenerTarget, kind: EventKind);

    // Queries

    fn is_loaded(&self) -> bool;
    fn is_style_loaded(&self) -> bool;
    fn zoom(&self) -> f64;
    fn unproject(&self, point: ScreenPoint) -> LngLat;
    /// Ids of the rendered layers under a canvas point, topmost first.
    fn layers_at(&self, point: ScreenPoint) -> Vec<String>;

    // Interaction

    fn cursor(&self) -> Cursor;
    fn set_cursor(&mut self, cursor: Cursor);
    fn set_drag_pan(&mut self, enabled: bool);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_css() {
        assert_eq!(Cursor::Move.css(), "move");
        assert_eq!(Cursor::EwResize.css(), "ew-resize");
        assert_eq!(Cursor::Default.css(), "");
        assert_eq!(Cursor::Default.to_string(), "default");
    }

    #[test]
    fn test_event_names() {
        assert_eq!(EventKind::StyleData.to_string(), "styledata");
        assert_eq!(EventKind::PointerOut.to_string(), "mouseout");
        assert!(EventKind::Click.is_pointer());
        assert!(!EventKind::ZoomEnd.is_pointer());
    }

    #[test]
    fn test_layer_spec_value() {
        let mut paint = Map::new();
        paint.insert("fill-opacity".into(), Value::from(0.25));
        let spec = LayerSpec {
            id: "fill".into(),
            layer_type: LayerType::Fill,
            source: "src".into(),
            paint,
        };
        let value = spec.to_value();
        assert_eq!(value["type"], "fill");
        assert_eq!(value["paint"]["fill-opacity"], 0.25);
    }

    #[test]
    fn test_map_event_constructors() {
        let pointer = PointerEvent::new(ScreenPoint::new(1.0, 2.0), LngLat::new(3.0, 4.0));
        let ev = MapEvent::layer("handles", EventKind::PointerDown, pointer);
        assert_eq!(ev.target, ListenerTarget::layer("handles"));
        assert!(ev.pointer.is_some());
        assert!(MapEvent::map(EventKind::Load).pointer.is_none());
    }
}
