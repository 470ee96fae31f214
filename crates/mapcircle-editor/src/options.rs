//! Circle configuration.
//!
//! Options are fixed when a circle is constructed. Every field has a
//! default, so partial JSON/TOML documents deserialize cleanly.

use mapcircle_core::constants::{
    DEFAULT_FILL_COLOR, DEFAULT_FILL_OPACITY, DEFAULT_MAX_RADIUS_M, DEFAULT_MIN_RADIUS_M,
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_OPACITY, DEFAULT_STROKE_WEIGHT, RADIUS_LIMIT_M,
};
use mapcircle_core::CircleError;
use mapcircle_geodesy::Properties;
use serde::{Deserialize, Serialize};

/// Styling and behavioral options for a circle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CircleOptions {
    /// Show center and radius handles and allow dragging them
    pub editable: bool,
    /// Smallest allowed radius (meters)
    pub min_radius: f64,
    /// Largest allowed radius (meters)
    pub max_radius: f64,
    /// Outline color
    pub stroke_color: String,
    /// Outline width (pixels)
    pub stroke_weight: f64,
    /// Outline opacity
    pub stroke_opacity: f64,
    /// Fill color
    pub fill_color: String,
    /// Fill opacity
    pub fill_opacity: f64,
    /// Scale polygon step count with zoom and radius
    pub refine_stroke: bool,
    /// GeoJSON properties copied onto the circle polygon feature
    pub properties: Properties,
    /// Log zoom, step count and drag state on every recompute
    pub debug: bool,
}

impl Default for CircleOptions {
    fn default() -> Self {
        Self {
            editable: false,
            min_radius: DEFAULT_MIN_RADIUS_M,
            max_radius: DEFAULT_MAX_RADIUS_M,
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_weight: DEFAULT_STROKE_WEIGHT,
            stroke_opacity: DEFAULT_STROKE_OPACITY,
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            fill_opacity: DEFAULT_FILL_OPACITY,
            refine_stroke: false,
            properties: Properties::new(),
            debug: false,
        }
    }
}

impl CircleOptions {
    /// Editable circle with otherwise default options.
    pub fn editable() -> Self {
        Self {
            editable: true,
            ..Self::default()
        }
    }

    /// Validate the radius bounds and styling values.
    pub fn validate(&self) -> Result<(), CircleError> {
        let invalid = |reason: String| Err(CircleError::InvalidOptions { reason });

        if !self.min_radius.is_finite() || self.min_radius < 0.0 {
            return invalid(format!("min_radius must be >= 0, got {}", self.min_radius));
        }
        if !self.max_radius.is_finite() || self.max_radius > RADIUS_LIMIT_M {
            return invalid(format!(
                "max_radius must be at most {RADIUS_LIMIT_M:.0} m, got {}",
                self.max_radius
            ));
        }
        if self.min_radius > self.max_radius {
            return invalid(format!(
                "min_radius ({}) must not exceed max_radius ({})",
                self.min_radius, self.max_radius
            ));
        }
        for (name, value) in [
            ("stroke_opacity", self.stroke_opacity),
            ("fill_opacity", self.fill_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return invalid(format!("{name} must be within 0..=1, got {value}"));
            }
        }
        if !self.stroke_weight.is_finite() || self.stroke_weight < 0.0 {
            return invalid(format!("stroke_weight must be >= 0, got {}", self.stroke_weight));
        }
        Ok(())
    }

    /// Clamp a radius into `[min_radius, max_radius]`.
    pub fn clamp_radius(&self, radius: f64) -> f64 {
        radius.clamp(self.min_radius, self.max_radius)
    }
}
