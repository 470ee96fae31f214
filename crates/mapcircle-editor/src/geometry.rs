//! Derived circle geometry.
//!
//! The polygon and handle points are pure functions of the active center,
//! radius, zoom and options. They are recomputed as a unit and never
//! mutated on their own.

use mapcircle_core::constants::HANDLE_BEARINGS;
use mapcircle_core::DistanceUnits;
use mapcircle_geodesy::{Bbox, Feature, GeoJson, GeodesyPort, Geometry, LngLat};
use serde_json::Value;

use crate::options::CircleOptions;
use crate::precision;

/// Geometry derived from a circle's center and radius.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    /// Center the shape was computed for.
    pub center: LngLat,
    /// Radius (meters) the shape was computed for.
    pub radius: f64,
    /// Polygon step count used.
    pub steps: u32,
    /// Polygon approximating the spherical cap, carrying the option properties.
    pub polygon: Feature,
    /// Radius handles at bearings 0, 90, 180, -90; empty unless editable.
    pub handles: Vec<LngLat>,
}

/// Computes [`CircleShape`]s through a geodesy collaborator.
pub struct CircleGeometry;

impl CircleGeometry {
    /// Derive polygon and handle points.
    pub fn recompute(
        center: LngLat,
        radius: f64,
        zoom: f64,
        options: &CircleOptions,
        geodesy: &dyn GeodesyPort,
    ) -> CircleShape {
        let steps = precision::steps(radius, zoom, options.refine_stroke);
        let polygon = Feature::with_properties(
            geodesy.circle(center, radius, steps, DistanceUnits::Meters),
            options.properties.clone(),
        );
        let handles = if options.editable {
            Self::handle_points(center, radius, geodesy)
        } else {
            Vec::new()
        };

        CircleShape {
            center,
            radius,
            steps,
            polygon,
            handles,
        }
    }

    /// The four cardinal radius handle positions.
    pub fn handle_points(center: LngLat, radius: f64, geodesy: &dyn GeodesyPort) -> Vec<LngLat> {
        HANDLE_BEARINGS
            .iter()
            .map(|&bearing| geodesy.destination(center, radius, bearing, DistanceUnits::Meters))
            .collect()
    }
}

impl CircleShape {
    /// Bounding box of the polygon.
    pub fn bounds(&self, geodesy: &dyn GeodesyPort) -> Option<Bbox> {
        geodesy.bbox(&self.polygon.geometry)
    }

    /// Rectangle polygon covering [`CircleShape::bounds`].
    pub fn bounds_polygon(&self, geodesy: &dyn GeodesyPort) -> Option<Geometry> {
        self.bounds(geodesy).map(|bbox| geodesy.bbox_polygon(bbox))
    }

    /// Source data for the fill and stroke layers.
    pub fn polygon_data(&self) -> Value {
        self.polygon.to_value()
    }

    /// Source data for the center handle layer.
    pub fn center_handle_data(&self) -> Value {
        Feature::new(Geometry::point(self.center)).to_value()
    }

    /// Source data for the radius handles layer.
    pub fn radius_handles_data(&self) -> Value {
        GeoJson::FeatureCollection {
            features: self
                .handles
                .iter()
                .map(|&p| Feature::new(Geometry::point(p)))
                .collect(),
        }
        .to_value()
    }
}
