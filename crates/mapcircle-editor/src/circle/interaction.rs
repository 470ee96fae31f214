//! Pointer interaction: hover, drags and fill clicks.

use std::time::Instant;

use mapcircle_core::constants::CENTER_COORDINATE_PRECISION;
use mapcircle_core::{BroadcastEvent, DistanceUnits, HandleKind, Result};

use super::{borrow_host, Circle, CircleState, Effects, Emit};
use crate::coordinator::suspended_groups;
use crate::handle::{is_spurious_pointer_out, resize_cursor};
use crate::host::{Cursor, EventKind, HostMap, ListenerTarget, MapEvent, PointerEvent};
use crate::layers::{self, LayerIds};
use crate::listeners::{ListenerGroup, ListenerMode};
use crate::quirks::GestureClass;

impl Circle {
    /// Deliver a host event for one of the listeners this circle bound.
    ///
    /// Events for listeners that are not bound, including those suspended
    /// by a sibling's drag, are ignored.
    pub fn handle_event(&self, event: &MapEvent) -> Result<()> {
        let effects = {
            let Ok(mut state) = self.inner.state.try_borrow_mut() else {
                tracing::warn!("Circle busy, dropping re-entrant {} event", event.kind);
                return Ok(());
            };
            let Some(map) = state.attachment.map().cloned() else {
                return Ok(());
            };
            let mut host = borrow_host(&map)?;
            state.dispatch(&mut *host, event)
        };
        self.flush(effects);
        Ok(())
    }

    /// Apply the latest queued drag move and any due hover reset.
    pub fn on_animation_frame(&self, now: Instant) {
        let Ok(mut state) = self.inner.state.try_borrow_mut() else {
            tracing::warn!("Circle busy, skipping animation frame");
            return;
        };
        let Some(map) = state.attachment.live_map().cloned() else {
            return;
        };
        match map.try_borrow_mut() {
            Ok(mut host) => state.frame(&mut *host, now),
            Err(_) => tracing::warn!("Host map busy, skipping frame for circle {}", state.id()),
        };
    }

    /// A suspend or resume published by another circle.
    pub(super) fn on_broadcast(&self, event: &BroadcastEvent) {
        let Ok(mut state) = self.inner.state.try_borrow_mut() else {
            tracing::warn!("Circle busy, skipping {}", event.description());
            return;
        };
        state.apply_broadcast(event);
    }
}

impl CircleState {
    fn dispatch(&mut self, host: &mut dyn HostMap, event: &MapEvent) -> Effects {
        if !self.listeners.consume(host, &event.target, event.kind) {
            return Effects::default();
        }
        match &event.target {
            ListenerTarget::Map => match event.kind {
                EventKind::Load | EventKind::Render | EventKind::StyleData | EventKind::ZoomEnd => {
                    self.on_lifecycle(host, event.kind)
                }
                EventKind::PointerMove => {
                    if let Some(pointer) = &event.pointer {
                        self.queue_move(pointer);
                    }
                    Effects::default()
                }
                EventKind::PointerUp => self.finish_drag(host),
                EventKind::PointerOut => match &event.pointer {
                    Some(pointer) if is_spurious_pointer_out(pointer) => {
                        tracing::trace!("Pointer crossed a marker, drag continues");
                        self.listeners.bind(
                            host,
                            ListenerGroup::Drag,
                            ListenerTarget::Map,
                            EventKind::PointerOut,
                            ListenerMode::Once,
                        );
                        Effects::default()
                    }
                    _ => self.finish_drag(host),
                },
                _ => Effects::default(),
            },
            ListenerTarget::Layer(layer) => {
                let Some(pointer) = &event.pointer else {
                    return Effects::default();
                };
                let ids = LayerIds::for_instance(self.id());
                if *layer == ids.fill_layer {
                    self.on_fill(host, &ids, event.kind, pointer)
                } else if *layer == ids.center_handle_layer {
                    self.on_handle(host, HandleKind::Center, event.kind, pointer)
                } else if *layer == ids.radius_handles_layer {
                    self.on_handle(host, HandleKind::Radius, event.kind, pointer)
                } else {
                    Effects::default()
                }
            }
        }
    }

    fn on_fill(
        &mut self,
        host: &mut dyn HostMap,
        ids: &LayerIds,
        kind: EventKind,
        pointer: &PointerEvent,
    ) -> Effects {
        let mut effects = Effects::default();
        if host
            .layers_at(pointer.point)
            .iter()
            .any(|layer| ids.is_handle_layer(layer))
        {
            return effects;
        }
        let class = match kind {
            EventKind::Click => self.gestures.classify_click(pointer, &*self.ctx.quirks),
            EventKind::ContextMenu => self.gestures.classify_context_menu(pointer),
            _ => return effects,
        };
        match class {
            GestureClass::Click => effects.events.push(Emit::Click(pointer.clone())),
            GestureClass::ContextMenu => effects.events.push(Emit::ContextMenu(pointer.clone())),
            GestureClass::Swallowed => tracing::trace!("Paired gesture event swallowed"),
        }
        effects
    }

    fn on_handle(
        &mut self,
        host: &mut dyn HostMap,
        kind: HandleKind,
        event: EventKind,
        pointer: &PointerEvent,
    ) -> Effects {
        match event {
            EventKind::PointerDown => return self.begin_drag(host, kind, pointer),
            EventKind::PointerEnter if self.model.editing().is_none() => {
                if self.controller_mut(kind).hover_enter() {
                    self.set_handle_paint(host, kind, true);
                }
                let cursor = self.handle_cursor(host, kind, pointer);
                host.set_cursor(cursor);
            }
            EventKind::PointerLeave if self.model.editing().is_none() => {
                let debounce = self.ctx.hover_debounce;
                self.controller_mut(kind).hover_leave(pointer.timestamp, debounce);
                host.set_cursor(Cursor::Default);
            }
            _ => {}
        }
        Effects::default()
    }

    fn handle_cursor(&self, host: &dyn HostMap, kind: HandleKind, pointer: &PointerEvent) -> Cursor {
        match kind {
            HandleKind::Center => Cursor::Move,
            HandleKind::Radius => {
                let at = host.unproject(pointer.point);
                resize_cursor(self.ctx.geodesy.bearing(self.model.active_center(), at))
            }
        }
    }

    fn set_handle_paint(&self, host: &mut dyn HostMap, kind: HandleKind, highlighted: bool) {
        let ids = LayerIds::for_instance(self.id());
        let layer = match kind {
            HandleKind::Center => ids.center_handle_layer,
            HandleKind::Radius => ids.radius_handles_layer,
        };
        let color = layers::handle_color(&self.options, highlighted);
        if let Err(e) = host.set_paint_property(&layer, "circle-color", color) {
            tracing::warn!("Failed to restyle handle layer {}: {}", layer, e);
        }
    }

    fn begin_drag(&mut self, host: &mut dyn HostMap, kind: HandleKind, pointer: &PointerEvent) -> Effects {
        let id = self.id();
        let cursor = host.cursor();
        if self.model.editing().is_some() || !self.controller_mut(kind).begin(cursor) {
            tracing::debug!("Circle {} ignored {} pointer-down (cursor {})", id, kind, cursor);
            return Effects::default();
        }
        self.model.begin_edit(kind);

        host.set_drag_pan(false);
        self.set_handle_paint(host, kind, true);
        let cursor = self.handle_cursor(host, kind, pointer);
        host.set_cursor(cursor);

        self.listeners.bind(
            host,
            ListenerGroup::Drag,
            ListenerTarget::Map,
            EventKind::PointerMove,
            ListenerMode::Persistent,
        );
        for event in [EventKind::PointerUp, EventKind::PointerOut] {
            self.listeners.bind(
                host,
                ListenerGroup::Drag,
                ListenerTarget::Map,
                event,
                ListenerMode::Once,
            );
        }
        for group in suspended_groups(id, id, kind) {
            self.listeners.unbind_group(host, group);
        }

        tracing::debug!("Circle {} started {} drag", id, kind);
        let mut effects = Effects::default();
        effects
            .broadcasts
            .push(BroadcastEvent::Suspend { source: id, handle: kind });
        effects
    }

    fn queue_move(&mut self, pointer: &PointerEvent) {
        if let Some(kind) = self.model.editing() {
            tracing::trace!("Queued {} move to ({}, {})", kind, pointer.point.x, pointer.point.y);
            self.controller_mut(kind).queue_move(pointer.clone());
        }
    }

    /// Move the edit value to where `pointer` is.
    fn update_edit(&mut self, host: &dyn HostMap, kind: HandleKind, pointer: &PointerEvent) {
        let at = host.unproject(pointer.point);
        match kind {
            HandleKind::Center => {
                let center = self.ctx.geodesy.truncate(at, CENTER_COORDINATE_PRECISION);
                self.model.update_edit_center(center);
            }
            HandleKind::Radius => {
                let radius = self
                    .ctx
                    .geodesy
                    .distance(self.model.active_center(), at, DistanceUnits::Meters)
                    .round();
                self.model.update_edit_radius(radius);
            }
        }
    }

    pub(super) fn frame(&mut self, host: &mut dyn HostMap, now: Instant) {
        for kind in [HandleKind::Center, HandleKind::Radius] {
            if self.controller_mut(kind).take_due_reset(now) {
                self.set_handle_paint(host, kind, false);
            }
        }
        let Some(kind) = self.model.editing() else {
            return;
        };
        if let Some(pointer) = self.controller_mut(kind).take_move() {
            self.update_edit(host, kind, &pointer);
            self.recompute();
            self.render(host);
        }
    }

    /// Shared exit of pointer-up and pointer-out: commit and resume.
    fn finish_drag(&mut self, host: &mut dyn HostMap) -> Effects {
        let mut effects = Effects::default();
        let Some(kind) = self.model.editing() else {
            return effects;
        };
        let id = self.id();
        if let Some(pointer) = self.controller_mut(kind).take_move() {
            self.update_edit(host, kind, &pointer);
        }
        let dropped = self.controller_mut(kind).dropped_moves();
        self.controller_mut(kind).finish();

        host.set_drag_pan(true);
        self.set_handle_paint(host, kind, false);
        host.set_cursor(Cursor::Default);
        self.listeners.unbind_group(host, ListenerGroup::Drag);
        for group in suspended_groups(id, id, kind) {
            if !self.is_suspended(group) {
                self.bind_group(host, group);
            }
        }

        let commit = self.model.commit();
        self.recompute();
        self.render(host);
        tracing::debug!(
            "Circle {} finished {} drag ({} coalesced moves dropped)",
            id,
            kind,
            dropped
        );

        effects
            .broadcasts
            .push(BroadcastEvent::Resume { source: id, handle: kind });
        if commit.center_changed {
            effects.events.push(Emit::CenterChanged);
        }
        if commit.radius_changed {
            effects.events.push(Emit::RadiusChanged);
        }
        effects
    }

    /// Abandon an active drag without committing it.
    pub(super) fn cancel_drag(&mut self, host: Option<&mut dyn HostMap>) -> Effects {
        let mut effects = Effects::default();
        let Some(kind) = self.model.cancel_edit() else {
            return effects;
        };
        self.controller_mut(kind).reset();
        if let Some(host) = host {
            host.set_drag_pan(true);
            self.set_handle_paint(host, kind, false);
            host.set_cursor(Cursor::Default);
            self.listeners.unbind_group(host, ListenerGroup::Drag);
        }
        self.recompute();
        tracing::debug!("Circle {} cancelled {} drag", self.id(), kind);
        effects.broadcasts.push(BroadcastEvent::Resume {
            source: self.id(),
            handle: kind,
        });
        effects
    }

    fn apply_broadcast(&mut self, event: &BroadcastEvent) {
        let id = self.id();
        let (source, handle) = (event.source(), event.handle());
        let groups = suspended_groups(id, source, handle);
        let map = self.attachment.live_map().cloned();

        match event {
            BroadcastEvent::Suspend { .. } => {
                self.suspension = Some((source, handle));
                if let Some(map) = map {
                    let Ok(mut host) = map.try_borrow_mut() else {
                        tracing::warn!("Host map busy, circle {} not suspended", id);
                        return;
                    };
                    for group in groups {
                        self.listeners.unbind_group(&mut *host, group);
                    }
                }
                tracing::debug!("Circle {} suspended by circle {}", id, source);
            }
            BroadcastEvent::Resume { .. } => {
                self.suspension = None;
                if let Some(map) = map {
                    let Ok(mut host) = map.try_borrow_mut() else {
                        tracing::warn!("Host map busy, circle {} not resumed", id);
                        return;
                    };
                    for group in groups {
                        self.bind_group(&mut *host, group);
                    }
                }
                tracing::debug!("Circle {} resumed by circle {}", id, source);
            }
        }
    }
}
