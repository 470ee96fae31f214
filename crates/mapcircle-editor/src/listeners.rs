//! Bookkeeping for the host listeners a circle holds.
//!
//! The host only knows `(target, kind)` pairs. This set remembers which
//! pairs are bound and whether each should fire once, so unbinding on
//! suspend, drag end and detach never leaks a listener.

use std::collections::HashMap;

use crate::host::{EventKind, HostMap, ListenerTarget};

/// Listener groups toggled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerGroup {
    /// Click and context-menu on the fill layer.
    Fill,
    /// Enter, leave and down on the center handle layer.
    CenterHandle,
    /// Enter, leave and down on the radius handles layer.
    RadiusHandles,
    /// Map-level move, up and out during a drag.
    Drag,
    /// Load, render, styledata and zoomend on the map.
    Lifecycle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerMode {
    Persistent,
    /// Unbound after delivering one event.
    Once,
}

#[derive(Debug, Clone, Copy)]
struct Binding {
    group: ListenerGroup,
    mode: ListenerMode,
}

/// The bound listeners of one circle.
#[derive(Debug, Default)]
pub struct ListenerSet {
    bindings: HashMap<(ListenerTarget, EventKind), Binding>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a listener. Rebinding an existing pair only updates its mode.
    pub fn bind(
        &mut self,
        map: &mut dyn HostMap,
        group: ListenerGroup,
        target: ListenerTarget,
        kind: EventKind,
        mode: ListenerMode,
    ) {
        let key = (target, kind);
        if !self.bindings.contains_key(&key) {
            map.listen(&key.0, kind);
        }
        self.bindings.insert(key, Binding { group, mode });
    }

    pub fn unbind(&mut self, map: &mut dyn HostMap, target: &ListenerTarget, kind: EventKind) {
        let key = (target.clone(), kind);
        if self.bindings.remove(&key).is_some() {
            map.unlisten(target, kind);
        }
    }

    pub fn is_bound(&self, target: &ListenerTarget, kind: EventKind) -> bool {
        self.bindings.contains_key(&(target.clone(), kind))
    }

    /// Whether an incoming event should be handled.
    ///
    /// One-shot listeners are unbound on the way through.
    pub fn consume(&mut self, map: &mut dyn HostMap, target: &ListenerTarget, kind: EventKind) -> bool {
        let key = (target.clone(), kind);
        match self.bindings.get(&key).map(|b| b.mode) {
            None => false,
            Some(ListenerMode::Persistent) => true,
            Some(ListenerMode::Once) => {
                self.bindings.remove(&key);
                map.unlisten(target, kind);
                true
            }
        }
    }

    /// Unbind every listener in `group`.
    pub fn unbind_group(&mut self, map: &mut dyn HostMap, group: ListenerGroup) {
        let keys: Vec<_> = self
            .bindings
            .iter()
            .filter(|(_, b)| b.group == group)
            .map(|(k, _)| k.clone())
            .collect();
        for (target, kind) in keys {
            self.bindings.remove(&(target.clone(), kind));
            map.unlisten(&target, kind);
        }
    }

    pub fn has_group(&self, group: ListenerGroup) -> bool {
        self.bindings.values().any(|b| b.group == group)
    }

    pub fn unbind_all(&mut self, map: &mut dyn HostMap) {
        for ((target, kind), _) in self.bindings.drain() {
            map.unlisten(&target, kind);
        }
    }

    /// Drop every binding without telling the host, for when the host
    /// cannot be reached and its listeners are lost with it.
    pub fn forget_all(&mut self) {
        self.bindings.clear();
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Cursor, LayerSpec, ScreenPoint};
    use mapcircle_core::HostError;
    use mapcircle_geodesy::LngLat;
    use serde_json::Value;

    #[derive(Default)]
    struct Recorder {
        listening: Vec<(ListenerTarget, EventKind)>,
    }

    impl HostMap for Recorder {
        fn add_source(&mut self, _: &str, _: Value) -> Result<(), HostError> {
            Ok(())
        }
        fn set_source_data(&mut self, _: &str, _: Value) -> Result<(), HostError> {
            Ok(())
        }
        fn remove_source(&mut self, _: &str) -> Result<(), HostError> {
            Ok(())
        }
        fn has_source(&self, _: &str) -> bool {
            false
        }
        fn add_layer(&mut self, _: LayerSpec, _: Option<&str>) -> Result<(), HostError> {
            Ok(())
        }
        fn remove_layer(&mut self, _: &str) -> Result<(), HostError> {
            Ok(())
        }
        fn has_layer(&self, _: &str) -> bool {
            false
        }
        fn set_paint_property(&mut self, _: &str, _: &str, _: Value) -> Result<(), HostError> {
            Ok(())
        }
        fn listen(&mut self, target: &ListenerTarget, kind: EventKind) {
            self.listening.push((target.clone(), kind));
        }
        fn unlisten(&mut self, target: &ListenerTarget, kind: EventKind) {
            self.listening.retain(|(t, k)| !(t == target && *k == kind));
        }
        fn is_loaded(&self) -> bool {
            true
        }
        fn is_style_loaded(&self) -> bool {
            true
        }
        fn zoom(&self) -> f64 {
            0.0
        }
        fn unproject(&self, _: ScreenPoint) -> LngLat {
            LngLat::default()
        }
        fn layers_at(&self, _: ScreenPoint) -> Vec<String> {
            Vec::new()
        }
        fn cursor(&self) -> Cursor {
            Cursor::Default
        }
        fn set_cursor(&mut self, _: Cursor) {}
        fn set_drag_pan(&mut self, _: bool) {}
    }

    #[test]
    fn test_bind_is_idempotent() {
        let mut map = Recorder::default();
        let mut set = ListenerSet::new();
        let target = ListenerTarget::layer("fill");
        set.bind(&mut map, ListenerGroup::Fill, target.clone(), EventKind::Click, ListenerMode::Persistent);
        set.bind(&mut map, ListenerGroup::Fill, target.clone(), EventKind::Click, ListenerMode::Persistent);
        assert_eq!(map.listening.len(), 1);
        assert!(set.is_bound(&target, EventKind::Click));
    }

    #[test]
    fn test_once_is_consumed() {
        let mut map = Recorder::default();
        let mut set = ListenerSet::new();
        set.bind(&mut map, ListenerGroup::Drag, ListenerTarget::Map, EventKind::PointerUp, ListenerMode::Once);
        assert!(set.consume(&mut map, &ListenerTarget::Map, EventKind::PointerUp));
        assert!(!set.consume(&mut map, &ListenerTarget::Map, EventKind::PointerUp));
        assert!(map.listening.is_empty());
    }

    #[test]
    fn test_unbind_group() {
        let mut map = Recorder::default();
        let mut set = ListenerSet::new();
        let center = ListenerTarget::layer("center");
        set.bind(&mut map, ListenerGroup::CenterHandle, center.clone(), EventKind::PointerDown, ListenerMode::Persistent);
        set.bind(&mut map, ListenerGroup::CenterHandle, center.clone(), EventKind::PointerEnter, ListenerMode::Persistent);
        set.bind(&mut map, ListenerGroup::Fill, ListenerTarget::layer("fill"), EventKind::Click, ListenerMode::Persistent);

        set.unbind_group(&mut map, ListenerGroup::CenterHandle);
        assert!(!set.has_group(ListenerGroup::CenterHandle));
        assert!(set.has_group(ListenerGroup::Fill));
        assert_eq!(map.listening.len(), 1);

        set.unbind_all(&mut map);
        assert!(set.is_empty());
        assert!(map.listening.is_empty());
    }

    #[test]
    fn test_forget_all_allows_rebinding() {
        let mut old_map = Recorder::default();
        let mut set = ListenerSet::new();
        let fill = ListenerTarget::layer("fill");
        set.bind(&mut old_map, ListenerGroup::Fill, fill.clone(), EventKind::Click, ListenerMode::Persistent);

        set.forget_all();
        assert!(set.is_empty());
        assert_eq!(old_map.listening.len(), 1);

        let mut new_map = Recorder::default();
        set.bind(&mut new_map, ListenerGroup::Fill, fill, EventKind::Click, ListenerMode::Persistent);
        assert_eq!(new_map.listening.len(), 1);
    }
}
