//! The geodesy collaborator seam.

use mapcircle_core::DistanceUnits;

use crate::coord::{Bbox, LngLat};
use crate::geojson::Geometry;

/// Geodesy primitives the circle editor computes geometry through.
///
/// Implementations are pure and synchronous. Bearings are degrees clockwise
/// from north in `(-180, 180]`.
pub trait GeodesyPort {
    /// The point reached by travelling `distance` from `origin` along `bearing`.
    fn destination(&self, origin: LngLat, distance: f64, bearing: f64, units: DistanceUnits)
        -> LngLat;

    /// Initial bearing from `from` to `to`.
    fn bearing(&self, from: LngLat, to: LngLat) -> f64;

    /// Great-circle distance between two points.
    fn distance(&self, from: LngLat, to: LngLat, units: DistanceUnits) -> f64;

    /// Bounding box of every position in a geometry.
    fn bbox(&self, geometry: &Geometry) -> Option<Bbox> {
        Bbox::from_points(geometry.positions())
    }

    /// The rectangle covering `bbox`, as a closed polygon.
    fn bbox_polygon(&self, bbox: Bbox) -> Geometry {
        Geometry::polygon(vec![
            LngLat::new(bbox.west, bbox.south),
            LngLat::new(bbox.east, bbox.south),
            LngLat::new(bbox.east, bbox.north),
            LngLat::new(bbox.west, bbox.north),
        ])
    }

    /// Round a point to `precision` decimal places.
    fn truncate(&self, point: LngLat, precision: u32) -> LngLat {
        point.truncated(precision)
    }

    /// Closed polygon approximating the circle of `radius` around `center`.
    ///
    /// Vertices are placed counter-clockwise starting due north, `steps`
    /// of them, with the first repeated to close the ring.
    fn circle(&self, center: LngLat, radius: f64, steps: u32, units: DistanceUnits) -> Geometry {
        let steps = steps.max(3);
        let ring = (0..steps)
            .map(|i| {
                let bearing = f64::from(i) * -360.0 / f64::from(steps);
                self.destination(center, radius, bearing, units)
            })
            .collect();
        Geometry::polygon(ring)
    }
}
