//! Shared constants for circle geometry, styling, and interaction.

use std::time::Duration;

/// Default lower bound for a circle radius (meters).
pub const DEFAULT_MIN_RADIUS_M: f64 = 10.0;

/// Default upper bound for a circle radius (meters).
pub const DEFAULT_MAX_RADIUS_M: f64 = 1.1e6;

/// Polygon step count used when stroke refinement is off, and the floor when it is on.
pub const BASE_POLYGON_STEPS: u32 = 64;

/// Zoom levels below this are treated as this value by the precision policy.
pub const MIN_REFINE_ZOOM: f64 = 0.1;

/// Decimal places kept when a dragged center is truncated.
pub const CENTER_COORDINATE_PRECISION: u32 = 6;

/// Radius under which a center drag may use a lightweight preview.
pub const SMALL_RADIUS_THRESHOLD_M: f64 = 10_000.0;

/// Delay before a hovered handle is un-highlighted after the pointer leaves.
pub const HOVER_RESET_DEBOUNCE: Duration = Duration::from_millis(150);

/// Bearings (degrees) of the four radius handles, clockwise from north.
pub const HANDLE_BEARINGS: [f64; 4] = [0.0, 90.0, 180.0, -90.0];

/// Default stroke color.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
/// Default stroke width (pixels).
pub const DEFAULT_STROKE_WEIGHT: f64 = 0.5;
/// Default stroke opacity.
pub const DEFAULT_STROKE_OPACITY: f64 = 0.75;
/// Default fill color.
pub const DEFAULT_FILL_COLOR: &str = "#FB6A4A";
/// Default fill opacity.
pub const DEFAULT_FILL_OPACITY: f64 = 0.25;

/// Handle fill color when not highlighted.
pub const HANDLE_IDLE_COLOR: &str = "#ffffff";
/// Handle marker radius (pixels).
pub const HANDLE_RADIUS_PX: f64 = 3.75;
/// Handle outline width (pixels).
pub const HANDLE_STROKE_WIDTH_PX: f64 = 2.25;

/// Mean earth radius (meters) used by the spherical geodesy model.
pub const EARTH_RADIUS_M: f64 = 6_371_008.8;
/// Largest radius a circle may be configured with: half the earth's
/// circumference, where the cap covers the whole sphere.
pub const RADIUS_LIMIT_M: f64 = std::f64::consts::PI * EARTH_RADIUS_M;
