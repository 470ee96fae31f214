//! Longitude/latitude pairs and bounding boxes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A geographic position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LngLat {
    pub lng: f64,
    pub lat: f64,
}

impl LngLat {
    /// Creates a new position from longitude and latitude.
    pub fn new(lng: f64, lat: f64) -> Self {
        Self { lng, lat }
    }

    /// `[lng, lat]`, the GeoJSON coordinate order.
    pub fn to_array(self) -> [f64; 2] {
        [self.lng, self.lat]
    }

    /// True when both components are finite and latitude is within ±90°.
    pub fn is_valid(&self) -> bool {
        self.lng.is_finite() && self.lat.is_finite() && (-90.0..=90.0).contains(&self.lat)
    }

    /// Rounds both components to `precision` decimal places.
    pub fn truncated(self, precision: u32) -> Self {
        let factor = 10f64.powi(precision as i32);
        Self {
            lng: (self.lng * factor).round() / factor,
            lat: (self.lat * factor).round() / factor,
        }
    }
}

impl From<[f64; 2]> for LngLat {
    fn from(coords: [f64; 2]) -> Self {
        Self::new(coords[0], coords[1])
    }
}

impl From<(f64, f64)> for LngLat {
    fn from((lng, lat): (f64, f64)) -> Self {
        Self::new(lng, lat)
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        p.to_array()
    }
}

impl fmt::Display for LngLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lng, self.lat)
    }
}

/// Axis-aligned bounding box in degrees: west, south, east, north.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bbox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bbox {
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LngLat>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.lng, first.lat, first.lng, first.lat);
        for p in iter {
            bbox.west = bbox.west.min(p.lng);
            bbox.south = bbox.south.min(p.lat);
            bbox.east = bbox.east.max(p.lng);
            bbox.north = bbox.north.max(p.lat);
        }
        Some(bbox)
    }

    /// The south-west corner.
    pub fn southwest(&self) -> LngLat {
        LngLat::new(self.west, self.south)
    }

    /// The north-east corner.
    pub fn northeast(&self) -> LngLat {
        LngLat::new(self.east, self.north)
    }

    /// `[west, south, east, north]`
    pub fn to_array(self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    pub fn contains(&self, p: LngLat) -> bool {
        p.lng >= self.west && p.lng <= self.east && p.lat >= self.south && p.lat <= self.north
    }
}
