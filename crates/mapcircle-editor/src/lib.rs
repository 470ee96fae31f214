//! # MapCircle Editor
//!
//! Editable geodesic circles for slippy maps.
//!
//! A [`Circle`] renders a spherical cap into a [`HostMap`] and, when
//! editable, lets the user drag its center handle and resize it from four
//! cardinal radius handles. Circles sharing an [`EditorContext`] coordinate
//! through a [`BroadcastCoordinator`], so overlapping circles never fight
//! over the same pointer gesture.
//!
//! ## Modules
//!
//! - `options`: circle styling and behavior
//! - `precision`: polygon step count policy
//! - `geometry`: polygon and handle derivation
//! - `model`: committed and edit values
//! - `handle`: per-handle drag state machine
//! - `coordinator`: cross-circle suspend/resume
//! - `host`: the host map trait and its event types
//! - `layers`, `listeners`: host resources a circle owns
//! - `emitter`, `quirks`: public events and gesture normalization
//! - `context`: collaborators shared between circles
//! - `circle`: the facade tying it all together
//!
//! ## Driving a circle
//!
//! The host forwards every event the circle asked for via
//! [`HostMap::listen`] to [`Circle::handle_event`], and calls
//! [`Circle::on_animation_frame`] once per frame. Pointer moves during a
//! drag are coalesced to the latest one per frame.

pub mod circle;
pub mod context;
pub mod coordinator;
pub mod emitter;
pub mod geometry;
pub mod handle;
pub mod host;
pub mod layers;
pub mod listeners;
pub mod model;
pub mod options;
pub mod precision;
pub mod quirks;

pub use circle::Circle;
pub use context::EditorContext;
pub use coordinator::BroadcastCoordinator;
pub use emitter::{CircleEvent, CircleEventKind, ListenerId};
pub use geometry::{CircleGeometry, CircleShape};
pub use handle::{DragState, HandleDragController};
pub use host::{
    same_map, Cursor, ElementTransition, EventKind, HostMap, LayerSpec, LayerType,
    ListenerTarget, MapEvent, MapHandle, Modifiers, MouseButton, PointerEvent, ScreenPoint,
};
pub use layers::LayerIds;
pub use model::{CircleModel, Commit, EditState};
pub use options::CircleOptions;
pub use quirks::{HostQuirks, ModifierClickContextMenu, NoQuirks};
