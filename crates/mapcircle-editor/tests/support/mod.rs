//! In-memory host map for integration tests.
//!
//! Screen points unproject one-to-one: `ScreenPoint { x, y }` is the
//! coordinate `(x, y)` in degrees.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use mapcircle_core::{shared, HostError};
use mapcircle_editor::{
    Circle, Cursor, EventKind, HostMap, LayerIds, LayerSpec, ListenerTarget, MapEvent, MapHandle,
    PointerEvent, ScreenPoint,
};
use mapcircle_geodesy::LngLat;
use serde_json::Value;

#[derive(Debug)]
pub struct MockMap {
    pub loaded: bool,
    pub style_loaded: bool,
    pub zoom: f64,
    pub sources: HashMap<String, Value>,
    pub layers: Vec<LayerSpec>,
    /// Listener reference counts; several circles share map-level events.
    pub listeners: HashMap<(ListenerTarget, EventKind), usize>,
    pub paint: HashMap<(String, String), Value>,
    pub cursor: Cursor,
    pub drag_pan: bool,
    /// Layers reported under every point.
    pub hits: Vec<String>,
    pub source_updates: usize,
}

impl MockMap {
    pub fn new() -> Self {
        Self {
            loaded: true,
            style_loaded: true,
            zoom: 10.0,
            sources: HashMap::new(),
            layers: Vec::new(),
            listeners: HashMap::new(),
            paint: HashMap::new(),
            cursor: Cursor::Default,
            drag_pan: true,
            hits: Vec::new(),
            source_updates: 0,
        }
    }

    pub fn loading() -> Self {
        Self {
            loaded: false,
            style_loaded: false,
            ..Self::new()
        }
    }

    pub fn is_listening(&self, target: &ListenerTarget, kind: EventKind) -> bool {
        self.listeners.get(&(target.clone(), kind)).is_some_and(|n| *n > 0)
    }

    pub fn layer_ids(&self) -> Vec<&str> {
        self.layers.iter().map(|l| l.id.as_str()).collect()
    }

    /// Drop every source and layer, as hosts do when the style changes.
    pub fn replace_style(&mut self) {
        self.sources.clear();
        self.layers.clear();
    }

    pub fn paint_of(&self, layer: &str, name: &str) -> Option<&Value> {
        self.paint.get(&(layer.to_string(), name.to_string()))
    }
}

impl HostMap for MockMap {
    fn add_source(&mut self, id: &str, data: Value) -> Result<(), HostError> {
        if self.sources.contains_key(id) {
            return Err(HostError::SourceExists { id: id.to_string() });
        }
        self.sources.insert(id.to_string(), data);
        Ok(())
    }

    fn set_source_data(&mut self, id: &str, data: Value) -> Result<(), HostError> {
        match self.sources.get_mut(id) {
            Some(slot) => {
                *slot = data;
                self.source_updates += 1;
                Ok(())
            }
            None => Err(HostError::SourceNotFound { id: id.to_string() }),
        }
    }

    fn remove_source(&mut self, id: &str) -> Result<(), HostError> {
        self.sources
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| HostError::SourceNotFound { id: id.to_string() })
    }

    fn has_source(&self, id: &str) -> bool {
        self.sources.contains_key(id)
    }

    fn add_layer(&mut self, layer: LayerSpec, before: Option<&str>) -> Result<(), HostError> {
        if self.has_layer(&layer.id) {
            return Err(HostError::LayerExists { id: layer.id });
        }
        let index = before
            .and_then(|b| self.layers.iter().position(|l| l.id == b))
            .unwrap_or(self.layers.len());
        self.layers.insert(index, layer);
        Ok(())
    }

    fn remove_layer(&mut self, id: &str) -> Result<(), HostError> {
        let index = self
            .layers
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| HostError::LayerNotFound { id: id.to_string() })?;
        self.layers.remove(index);
        Ok(())
    }

    fn has_layer(&self, id: &str) -> bool {
        self.layers.iter().any(|l| l.id == id)
    }

    fn set_paint_property(&mut self, layer: &str, name: &str, value: Value) -> Result<(), HostError> {
        if !self.has_layer(layer) {
            return Err(HostError::LayerNotFound { id: layer.to_string() });
        }
        self.paint.insert((layer.to_string(), name.to_string()), value);
        Ok(())
    }

    fn listen(&mut self, target: &ListenerTarget, kind: EventKind) {
        *self.listeners.entry((target.clone(), kind)).or_insert(0) += 1;
    }

    fn unlisten(&mut self, target: &ListenerTarget, kind: EventKind) {
        let key = (target.clone(), kind);
        if let Some(count) = self.listeners.get_mut(&key) {
            *count -= 1;
            if *count == 0 {
                self.listeners.remove(&key);
            }
        }
    }

    fn is_loaded(&self) -> bool {
        self.loaded
    }

    fn is_style_loaded(&self) -> bool {
        self.style_loaded
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    fn unproject(&self, point: ScreenPoint) -> LngLat {
        LngLat::new(point.x, point.y)
    }

    fn layers_at(&self, _point: ScreenPoint) -> Vec<String> {
        self.hits.clone()
    }

    fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn set_drag_pan(&mut self, enabled: bool) {
        self.drag_pan = enabled;
    }
}

pub fn new_map() -> (Rc<RefCell<MockMap>>, MapHandle) {
    wrap(MockMap::new())
}

pub fn wrap(mock: MockMap) -> (Rc<RefCell<MockMap>>, MapHandle) {
    let mock = shared(mock);
    let handle: MapHandle = mock.clone();
    (mock, handle)
}

/// A pointer at `(lng, lat)`.
pub fn at(lng: f64, lat: f64) -> PointerEvent {
    PointerEvent::new(ScreenPoint::new(lng, lat), LngLat::new(lng, lat))
}

pub fn ids(circle: &Circle) -> LayerIds {
    LayerIds::for_instance(circle.id())
}

pub fn on_layer(circle: &Circle, layer: &str, kind: EventKind, pointer: PointerEvent) {
    circle
        .handle_event(&MapEvent::layer(layer, kind, pointer))
        .expect("event delivered");
}

pub fn on_map(circle: &Circle, kind: EventKind, pointer: PointerEvent) {
    circle
        .handle_event(&MapEvent::map_pointer(kind, pointer))
        .expect("event delivered");
}

pub fn lifecycle(circle: &Circle, kind: EventKind) {
    circle
        .handle_event(&MapEvent::map(kind))
        .expect("event delivered");
}

/// Hover then press the center handle.
pub fn press_center(circle: &Circle, pointer: PointerEvent) {
    let layer = ids(circle).center_handle_layer;
    on_layer(circle, &layer, EventKind::PointerEnter, pointer.clone());
    on_layer(circle, &layer, EventKind::PointerDown, pointer);
}

/// Hover then press a radius handle.
pub fn press_radius(circle: &Circle, pointer: PointerEvent) {
    let layer = ids(circle).radius_handles_layer;
    on_layer(circle, &layer, EventKind::PointerEnter, pointer.clone());
    on_layer(circle, &layer, EventKind::PointerDown, pointer);
}

/// Move, render a frame, and release.
pub fn move_and_release(circle: &Circle, to: PointerEvent) {
    on_map(circle, EventKind::PointerMove, to.clone());
    circle.on_animation_frame(to.timestamp);
    on_map(circle, EventKind::PointerUp, to);
}

/// Source data of a circle's polygon as the host holds it.
pub fn polygon_source(mock: &Rc<RefCell<MockMap>>, circle: &Circle) -> Option<Value> {
    mock.borrow().sources.get(&ids(circle).circle_source).cloned()
}

pub fn counter() -> Rc<std::cell::Cell<u32>> {
    Rc::new(std::cell::Cell::new(0))
}
