//! Attaching to and detaching from a host map.

use std::rc::Rc;

use mapcircle_core::{CircleError, Error, HostError, Result};

use super::{borrow_host, Attachment, Circle, CircleState, Effects, Emit, Mutation};
use crate::coordinator::suspends;
use crate::host::{EventKind, HostMap, ListenerTarget, MapHandle, same_map};
use crate::layers::{self, LayerIds};
use crate::listeners::{ListenerGroup, ListenerMode};

const FILL_EVENTS: &[EventKind] = &[EventKind::Click, EventKind::ContextMenu];
const HANDLE_EVENTS: &[EventKind] = &[
    EventKind::PointerEnter,
    EventKind::PointerLeave,
    EventKind::PointerDown,
];

impl Circle {
    /// Attach to `map`, optionally below the layer `before`.
    ///
    /// Attaching again to the same map is a no-op. Sources and layers are
    /// created once the host reports its style loaded.
    pub fn add_to(&self, map: &MapHandle, before: Option<&str>) -> Result<()> {
        let result = {
            let mut state = self.inner.state.borrow_mut();
            if let Some(current) = state.attachment.map() {
                if same_map(current, map) {
                    return Ok(());
                }
                return Err(CircleError::MapAlreadyAssigned {
                    instance: state.id().get(),
                }
                .into());
            }
            state.attachment = Attachment::Waiting {
                map: Rc::clone(map),
                before: before.map(str::to_string),
                reload: false,
            };
            match borrow_host(map) {
                Ok(mut host) => state.await_style(&mut *host),
                Err(e) => Err(Error::from(e)),
            }
        };

        match result {
            Ok(effects) => {
                self.flush(effects);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to attach circle {}: {}", self.id(), e);
                self.remove();
                Err(e)
            }
        }
    }

    /// Detach from the host map.
    ///
    /// Removes owned sources, layers and listeners and leaves the
    /// coordinator. An active drag is cancelled and siblings are resumed.
    /// Calling this on a detached circle does nothing.
    pub fn remove(&self) {
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            let Some(map) = state.attachment.map().cloned() else {
                return;
            };
            state.attachment = Attachment::Detached;
            let effects = match map.try_borrow_mut() {
                Ok(mut host) => state.teardown(Some(&mut *host)),
                Err(_) => {
                    tracing::warn!(
                        "Host map busy while removing circle {}; its layers stay behind",
                        state.id()
                    );
                    state.teardown(None)
                }
            };
            tracing::debug!("Circle {} removed", state.id());
            effects
        };
        self.flush(effects);
    }
}

impl CircleState {
    /// Listen for the host finishing its style, installing now if it has.
    pub(super) fn await_style(&mut self, host: &mut dyn HostMap) -> Result<Effects> {
        for kind in [EventKind::Load, EventKind::Render, EventKind::StyleData] {
            self.listeners.bind(
                host,
                ListenerGroup::Lifecycle,
                ListenerTarget::Map,
                kind,
                ListenerMode::Persistent,
            );
        }
        if host.is_loaded() && host.is_style_loaded() {
            self.install(host)
        } else {
            tracing::debug!("Circle {} waiting for map style", self.id());
            Ok(Effects::default())
        }
    }

    /// Create sources, layers and listeners on a ready host.
    fn install(&mut self, host: &mut dyn HostMap) -> Result<Effects> {
        let (map, before, reload) = match &self.attachment {
            Attachment::Waiting {
                map,
                before,
                reload,
            } => (Rc::clone(map), before.clone(), *reload),
            _ => return Ok(Effects::default()),
        };
        let id = self.id();
        let ids = LayerIds::for_instance(id);
        let editable = self.options.editable;

        self.zoom = host.zoom();
        self.recompute();

        let before = before.filter(|layer| {
            let exists = host.has_layer(layer);
            if !exists {
                tracing::warn!("Layer {} not found, adding circle {} on top", layer, id);
            }
            exists
        });
        if let Err(e) = self.add_resources(host, &ids, before.as_deref()) {
            self.remove_resources(host, &ids);
            return Err(e.into());
        }

        for kind in [EventKind::Load, EventKind::Render] {
            self.listeners.unbind(host, &ListenerTarget::Map, kind);
        }
        self.listeners.bind(
            host,
            ListenerGroup::Lifecycle,
            ListenerTarget::Map,
            EventKind::StyleData,
            ListenerMode::Persistent,
        );
        if self.options.refine_stroke {
            self.listeners.bind(
                host,
                ListenerGroup::Lifecycle,
                ListenerTarget::Map,
                EventKind::ZoomEnd,
                ListenerMode::Persistent,
            );
        }
        for group in [
            ListenerGroup::Fill,
            ListenerGroup::CenterHandle,
            ListenerGroup::RadiusHandles,
        ] {
            if !self.is_suspended(group) {
                self.bind_group(host, group);
            }
        }

        self.attachment = Attachment::Live { map, before };
        if editable {
            self.register();
        }

        let mut effects = Effects::default();
        if reload {
            tracing::debug!("Circle {} reinstalled after style reload", id);
        } else {
            tracing::debug!("Circle {} rendered ({} steps)", id, self.shape.steps);
            effects.events.push(Emit::Rendered);
        }
        for mutation in self.pending.drain(..) {
            effects.events.push(match mutation {
                Mutation::Center => Emit::CenterChanged,
                Mutation::Radius => Emit::RadiusChanged,
            });
        }
        Ok(effects)
    }

    fn add_resources(
        &self,
        host: &mut dyn HostMap,
        ids: &LayerIds,
        before: Option<&str>,
    ) -> std::result::Result<(), HostError> {
        upsert_source(host, &ids.circle_source, self.shape.polygon_data())?;
        if self.options.editable {
            upsert_source(host, &ids.center_handle_source, self.shape.center_handle_data())?;
            upsert_source(host, &ids.radius_handles_source, self.shape.radius_handles_data())?;
        }

        add_layer_once(host, layers::fill_layer(ids, &self.options), before)?;
        add_layer_once(host, layers::stroke_layer(ids, &self.options), before)?;
        if self.options.editable {
            add_layer_once(host, layers::radius_handles_layer(ids, &self.options), before)?;
            add_layer_once(host, layers::center_handle_layer(ids, &self.options), before)?;
        }
        Ok(())
    }

    fn remove_resources(&self, host: &mut dyn HostMap, ids: &LayerIds) {
        let editable = self.options.editable;
        for layer in ids.layers(editable).into_iter().rev() {
            if host.has_layer(layer) {
                if let Err(e) = host.remove_layer(layer) {
                    tracing::warn!("Failed to remove layer {}: {}", layer, e);
                }
            }
        }
        for source in ids.sources(editable) {
            if host.has_source(source) {
                if let Err(e) = host.remove_source(source) {
                    tracing::warn!("Failed to remove source {}: {}", source, e);
                }
            }
        }
    }

    fn register(&self) {
        let this = self.this.clone();
        self.ctx.coordinator.register(self.id(), move |event| {
            if let Some(inner) = this.upgrade() {
                Circle { inner }.on_broadcast(event);
            }
        });
    }

    /// Release everything held on the host and in the coordinator.
    pub(super) fn teardown(&mut self, host: Option<&mut dyn HostMap>) -> Effects {
        let effects = self.release(host);
        if self.options.editable {
            self.ctx.coordinator.unregister(self.id());
        }
        self.suspension = None;
        effects
    }

    /// Release what the circle holds on the host.
    ///
    /// The coordinator registration and any sibling suspension survive, so a
    /// reinstall after a style reload stays in step with the other circles.
    fn release(&mut self, host: Option<&mut dyn HostMap>) -> Effects {
        let effects = match host {
            Some(host) => {
                let effects = self.cancel_drag(Some(&mut *host));
                self.listeners.unbind_all(host);
                let ids = LayerIds::for_instance(self.id());
                self.remove_resources(host, &ids);
                effects
            }
            None => {
                let effects = self.cancel_drag(None);
                self.listeners.forget_all();
                effects
            }
        };
        self.center_handle.reset();
        self.radius_handle.reset();
        effects
    }

    /// Host lifecycle notifications: load, render, styledata, zoomend.
    pub(super) fn on_lifecycle(&mut self, host: &mut dyn HostMap, kind: EventKind) -> Effects {
        let waiting = matches!(self.attachment, Attachment::Waiting { .. });
        let live = self.is_live();
        match kind {
            EventKind::Load | EventKind::Render | EventKind::StyleData if waiting => {
                if !(host.is_loaded() && host.is_style_loaded()) {
                    return Effects::default();
                }
                match self.install(host) {
                    Ok(effects) => effects,
                    Err(e) => {
                        tracing::error!("Failed to install circle {}: {}", self.id(), e);
                        Effects::default()
                    }
                }
            }
            EventKind::StyleData if live => {
                let ids = LayerIds::for_instance(self.id());
                if host.has_source(&ids.circle_source) {
                    Effects::default()
                } else {
                    self.reload(host)
                }
            }
            EventKind::ZoomEnd if live => {
                self.zoom = host.zoom();
                self.recompute();
                self.render(host);
                Effects::default()
            }
            _ => Effects::default(),
        }
    }

    /// The host dropped our sources with its old style; start over.
    fn reload(&mut self, host: &mut dyn HostMap) -> Effects {
        let (map, before) = match std::mem::replace(&mut self.attachment, Attachment::Detached) {
            Attachment::Live { map, before } => (map, before),
            other => {
                self.attachment = other;
                return Effects::default();
            }
        };
        tracing::debug!("Map style changed, reattaching circle {}", self.id());

        let mut effects = self.release(Some(&mut *host));
        self.attachment = Attachment::Waiting {
            map,
            before,
            reload: true,
        };
        match self.await_style(host) {
            Ok(more) => effects.merge(more),
            Err(e) => tracing::error!("Failed to reinstall circle {}: {}", self.id(), e),
        }
        effects
    }

    /// Whether a sibling's drag currently suspends `group`.
    pub(super) fn is_suspended(&self, group: ListenerGroup) -> bool {
        self.suspension
            .is_some_and(|(source, handle)| suspends(group, self.id(), source, handle))
    }

    /// Bind the pointer listeners of a fill or handle group.
    pub(super) fn bind_group(&mut self, host: &mut dyn HostMap, group: ListenerGroup) {
        let ids = LayerIds::for_instance(self.id());
        let (layer, kinds) = match group {
            ListenerGroup::Fill => (ids.fill_layer, FILL_EVENTS),
            ListenerGroup::CenterHandle if self.options.editable => {
                (ids.center_handle_layer, HANDLE_EVENTS)
            }
            ListenerGroup::RadiusHandles if self.options.editable => {
                (ids.radius_handles_layer, HANDLE_EVENTS)
            }
            _ => return,
        };
        for &kind in kinds {
            self.listeners.bind(
                host,
                group,
                ListenerTarget::layer(layer.as_str()),
                kind,
                ListenerMode::Persistent,
            );
        }
    }

    /// Push the current shape into the host sources.
    pub(super) fn render(&mut self, host: &mut dyn HostMap) {
        let ids = LayerIds::for_instance(self.id());
        let mut updates = vec![(ids.circle_source, self.shape.polygon_data())];
        if self.options.editable {
            updates.push((ids.center_handle_source, self.shape.center_handle_data()));
            updates.push((ids.radius_handles_source, self.shape.radius_handles_data()));
        }
        for (source, data) in updates {
            if let Err(e) = host.set_source_data(&source, data) {
                tracing::warn!("Failed to update source {}: {}", source, e);
            }
        }
    }
}

fn upsert_source(
    host: &mut dyn HostMap,
    id: &str,
    data: serde_json::Value,
) -> std::result::Result<(), HostError> {
    if host.has_source(id) {
        host.set_source_data(id, data)
    } else {
        host.add_source(id, data)
    }
}

fn add_layer_once(
    host: &mut dyn HostMap,
    layer: crate::host::LayerSpec,
    before: Option<&str>,
) -> std::result::Result<(), HostError> {
    if host.has_layer(&layer.id) {
        return Ok(());
    }
    host.add_layer(layer, before)
}
