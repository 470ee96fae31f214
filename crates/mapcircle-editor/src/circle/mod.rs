//! The circle facade.
//!
//! [`Circle`] composes the model, derived geometry, both drag controllers,
//! the public emitter and the host attachment. It is split into submodules:
//! - `lifecycle`: attach, detach, style reloads, rendering
//! - `interaction`: host events, animation frames, broadcasts
//!
//! Every operation runs in two phases. State is mutated while borrowed and
//! the resulting broadcasts and public events are collected into
//! [`Effects`]; they are delivered after the borrow is released, so
//! listeners may call back into any circle.

mod interaction;
mod lifecycle;

use std::cell::{OnceCell, RefCell, RefMut};
use std::fmt;
use std::rc::{Rc, Weak};

use mapcircle_core::{BroadcastEvent, CircleError, HandleKind, HostError, InstanceId};
use mapcircle_geodesy::{Bbox, Feature, Geometry, LngLat};

use crate::context::EditorContext;
use crate::emitter::{CircleEvent, CircleEventKind, Emitter, ListenerId};
use crate::geometry::{CircleGeometry, CircleShape};
use crate::handle::HandleDragController;
use crate::host::{HostMap, MapHandle, PointerEvent};
use crate::listeners::ListenerSet;
use crate::model::CircleModel;
use crate::options::CircleOptions;
use crate::quirks::GestureDedup;

/// An editable geodesic circle drawn on a host map.
///
/// Clones share the same circle.
#[derive(Clone)]
pub struct Circle {
    inner: Rc<Inner>,
}

struct Inner {
    state: RefCell<CircleState>,
    emitter: RefCell<Emitter>,
}

enum Attachment {
    Detached,
    /// Attached, waiting for the host to finish loading its style.
    Waiting {
        map: MapHandle,
        before: Option<String>,
        /// Reinstalling after the host replaced its style.
        reload: bool,
    },
    Live {
        map: MapHandle,
        before: Option<String>,
    },
}

impl Attachment {
    fn map(&self) -> Option<&MapHandle> {
        match self {
            Attachment::Detached => None,
            Attachment::Waiting { map, .. } | Attachment::Live { map, .. } => Some(map),
        }
    }

    fn live_map(&self) -> Option<&MapHandle> {
        match self {
            Attachment::Live { map, .. } => Some(map),
            _ => None,
        }
    }
}

/// Setter calls made before the circle was rendered, announced on render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mutation {
    Center,
    Radius,
}

enum Emit {
    Click(PointerEvent),
    ContextMenu(PointerEvent),
    CenterChanged,
    RadiusChanged,
    Rendered,
}

impl Emit {
    fn kind(&self) -> CircleEventKind {
        match self {
            Emit::Click(_) => CircleEventKind::Click,
            Emit::ContextMenu(_) => CircleEventKind::ContextMenu,
            Emit::CenterChanged => CircleEventKind::CenterChanged,
            Emit::RadiusChanged => CircleEventKind::RadiusChanged,
            Emit::Rendered => CircleEventKind::Rendered,
        }
    }
}

#[derive(Default)]
struct Effects {
    broadcasts: Vec<BroadcastEvent>,
    events: Vec<Emit>,
}

impl Effects {
    fn merge(&mut self, other: Effects) {
        self.broadcasts.extend(other.broadcasts);
        self.events.extend(other.events);
    }
}

struct CircleState {
    this: Weak<Inner>,
    id: OnceCell<InstanceId>,
    options: CircleOptions,
    model: CircleModel,
    zoom: f64,
    shape: CircleShape,
    center_handle: HandleDragController,
    radius_handle: HandleDragController,
    listeners: ListenerSet,
    attachment: Attachment,
    pending: Vec<Mutation>,
    gestures: GestureDedup,
    /// Drag on another circle currently suspending our listeners.
    suspension: Option<(InstanceId, HandleKind)>,
    ctx: EditorContext,
}

impl CircleState {
    fn id(&self) -> InstanceId {
        *self.id.get_or_init(InstanceId::next)
    }

    fn is_live(&self) -> bool {
        matches!(self.attachment, Attachment::Live { .. })
    }

    fn controller_mut(&mut self, kind: HandleKind) -> &mut HandleDragController {
        match kind {
            HandleKind::Center => &mut self.center_handle,
            HandleKind::Radius => &mut self.radius_handle,
        }
    }

    fn recompute(&mut self) {
        self.shape = CircleGeometry::recompute(
            self.model.active_center(),
            self.model.active_radius(),
            self.zoom,
            &self.options,
            &*self.ctx.geodesy,
        );
        if self.options.debug {
            tracing::info!(
                "Circle {}: zoom {:.2}, {} steps, drag {:?}",
                self.id(),
                self.zoom,
                self.shape.steps,
                self.model.editing()
            );
        }
    }

    /// Record a committed change: render it now, or announce it on render.
    fn committed(&mut self, mutation: Mutation) -> Effects {
        let mut effects = Effects::default();
        if let Some(map) = self.attachment.live_map().cloned() {
            match map.try_borrow_mut() {
                Ok(mut host) => self.render(&mut *host),
                Err(_) => tracing::warn!("Host map busy, circle {} not redrawn", self.id()),
            }
            effects.events.push(match mutation {
                Mutation::Center => Emit::CenterChanged,
                Mutation::Radius => Emit::RadiusChanged,
            });
        } else if !self.pending.contains(&mutation) {
            self.pending.push(mutation);
        }
        effects
    }
}

fn borrow_host(map: &MapHandle) -> Result<RefMut<'_, dyn HostMap + 'static>, HostError> {
    map.try_borrow_mut().map_err(|_| HostError::Other {
        message: "host map is already borrowed".to_string(),
    })
}

impl Circle {
    /// Create a circle with its own coordinator and spherical geodesy.
    ///
    /// Circles built this way do not coordinate drags with each other; use
    /// [`Circle::with_context`] with a shared [`EditorContext`] for that.
    pub fn new(
        center: impl Into<LngLat>,
        radius: f64,
        options: CircleOptions,
    ) -> Result<Self, CircleError> {
        Self::with_context(center, radius, options, EditorContext::default())
    }

    pub fn with_context(
        center: impl Into<LngLat>,
        radius: f64,
        options: CircleOptions,
        ctx: EditorContext,
    ) -> Result<Self, CircleError> {
        let center = center.into();
        options.validate()?;
        if !center.is_valid() {
            return Err(CircleError::InvalidCenter {
                lng: center.lng,
                lat: center.lat,
            });
        }
        if !radius.is_finite() {
            return Err(CircleError::InvalidRadius { radius });
        }

        let model = CircleModel::new(center, radius, options.min_radius, options.max_radius);
        let shape = CircleGeometry::recompute(
            model.center(),
            model.radius(),
            0.0,
            &options,
            &*ctx.geodesy,
        );

        let inner = Rc::new_cyclic(|this| Inner {
            state: RefCell::new(CircleState {
                this: this.clone(),
                id: OnceCell::new(),
                options,
                model,
                zoom: 0.0,
                shape,
                center_handle: HandleDragController::new(HandleKind::Center),
                radius_handle: HandleDragController::new(HandleKind::Radius),
                listeners: ListenerSet::new(),
                attachment: Attachment::Detached,
                pending: Vec::new(),
                gestures: GestureDedup::new(),
                suspension: None,
                ctx,
            }),
            emitter: RefCell::new(Emitter::new()),
        });
        Ok(Self { inner })
    }

    /// Process-unique id, assigned on first use.
    pub fn id(&self) -> InstanceId {
        self.inner.state.borrow().id()
    }

    pub fn options(&self) -> CircleOptions {
        self.inner.state.borrow().options.clone()
    }

    pub fn is_editable(&self) -> bool {
        self.inner.state.borrow().options.editable
    }

    /// Committed center.
    pub fn center(&self) -> LngLat {
        self.inner.state.borrow().model.center()
    }

    /// Set the committed center.
    ///
    /// Fires `centerchanged` when the center moved. Before the circle is
    /// rendered the event is held back until the first render.
    pub fn set_center(&self, center: impl Into<LngLat>) -> Result<(), CircleError> {
        let center = center.into();
        if !center.is_valid() {
            return Err(CircleError::InvalidCenter {
                lng: center.lng,
                lat: center.lat,
            });
        }
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.model.set_center(center);
            state.recompute();
            if changed {
                state.committed(Mutation::Center)
            } else {
                Effects::default()
            }
        };
        self.flush(effects);
        Ok(())
    }

    /// Committed radius in meters.
    pub fn radius(&self) -> f64 {
        self.inner.state.borrow().model.radius()
    }

    /// Set the committed radius, clamped to the configured bounds.
    ///
    /// Fires `radiuschanged` under the same rules as [`Circle::set_center`].
    pub fn set_radius(&self, radius: f64) -> Result<(), CircleError> {
        if !radius.is_finite() {
            return Err(CircleError::InvalidRadius { radius });
        }
        let effects = {
            let mut state = self.inner.state.borrow_mut();
            let changed = state.model.set_radius(radius);
            state.recompute();
            if changed {
                state.committed(Mutation::Radius)
            } else {
                Effects::default()
            }
        };
        self.flush(effects);
        Ok(())
    }

    /// Southwest/northeast bounds of the current polygon.
    pub fn bounds(&self) -> Bbox {
        let state = self.inner.state.borrow();
        state.shape.bounds(&*state.ctx.geodesy).unwrap_or_else(|| {
            let c = state.shape.center;
            Bbox::new(c.lng, c.lat, c.lng, c.lat)
        })
    }

    /// Rectangle polygon covering [`Circle::bounds`].
    pub fn bounds_polygon(&self) -> Geometry {
        let bbox = self.bounds();
        self.inner.state.borrow().ctx.geodesy.bbox_polygon(bbox)
    }

    /// The polygon feature as last recomputed.
    pub fn polygon(&self) -> Feature {
        self.inner.state.borrow().shape.polygon.clone()
    }

    /// Radius handle positions; empty for non-editable circles.
    pub fn handle_points(&self) -> Vec<LngLat> {
        self.inner.state.borrow().shape.handles.clone()
    }

    /// Step count of the current polygon.
    pub fn steps(&self) -> u32 {
        self.inner.state.borrow().shape.steps
    }

    /// Last known host zoom.
    pub fn zoom(&self) -> f64 {
        self.inner.state.borrow().zoom
    }

    /// The handle being dragged, if any.
    pub fn active_drag(&self) -> Option<HandleKind> {
        self.inner.state.borrow().model.editing()
    }

    pub fn is_attached(&self) -> bool {
        self.inner.state.borrow().attachment.map().is_some()
    }

    /// Whether sources and layers are installed on the host.
    pub fn is_rendered(&self) -> bool {
        self.inner.state.borrow().is_live()
    }

    pub fn on<F>(&self, kind: CircleEventKind, handler: F) -> ListenerId
    where
        F: Fn(&CircleEvent<'_>) + 'static,
    {
        self.inner.emitter.borrow_mut().on(kind, Rc::new(handler), false)
    }

    /// Like [`Circle::on`], removed after the first delivery.
    pub fn once<F>(&self, kind: CircleEventKind, handler: F) -> ListenerId
    where
        F: Fn(&CircleEvent<'_>) + 'static,
    {
        self.inner.emitter.borrow_mut().on(kind, Rc::new(handler), true)
    }

    pub fn off(&self, id: ListenerId) -> bool {
        self.inner.emitter.borrow_mut().off(id)
    }

    fn flush(&self, effects: Effects) {
        if !effects.broadcasts.is_empty() {
            let coordinator = Rc::clone(&self.inner.state.borrow().ctx.coordinator);
            for event in effects.broadcasts {
                match event {
                    BroadcastEvent::Suspend { source, handle } => {
                        coordinator.suspend(source, handle);
                    }
                    BroadcastEvent::Resume { source, handle } => {
                        coordinator.resume(source, handle);
                    }
                }
            }
        }
        for emit in effects.events {
            self.emit(emit);
        }
    }

    fn emit(&self, emit: Emit) {
        let handlers = self.inner.emitter.borrow_mut().handlers_for(emit.kind());
        if handlers.is_empty() {
            return;
        }
        let event = match &emit {
            Emit::Click(pointer) => CircleEvent::Click(pointer),
            Emit::ContextMenu(pointer) => CircleEvent::ContextMenu(pointer),
            Emit::CenterChanged => CircleEvent::CenterChanged(self),
            Emit::RadiusChanged => CircleEvent::RadiusChanged(self),
            Emit::Rendered => CircleEvent::Rendered(self),
        };
        for handler in handlers {
            handler(&event);
        }
    }
}

impl fmt::Debug for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.state.try_borrow() {
            Ok(state) => f
                .debug_struct("Circle")
                .field("id", &state.id.get())
                .field("center", &state.model.center())
                .field("radius", &state.model.radius())
                .field("editing", &state.model.editing())
                .field("rendered", &state.is_live())
                .finish(),
            Err(_) => f.write_str("Circle { <busy> }"),
        }
    }
}
