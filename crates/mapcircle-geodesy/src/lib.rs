//! # MapCircle Geodesy
//!
//! Coordinates, GeoJSON feature types, and the [`GeodesyPort`] trait the
//! circle editor computes geometry through.
//!
//! [`Spherical`] implements the port on a sphere of mean earth radius,
//! which is the model slippy maps use for on-screen distances.
//!
//! ## Usage
//!
//! ```rust
//! use mapcircle_geodesy::{GeodesyPort, LngLat, Spherical};
//! use mapcircle_core::DistanceUnits;
//!
//! let geodesy = Spherical;
//! let center = LngLat::new(-75.343, 39.984);
//! let north = geodesy.destination(center, 300.0, 0.0, DistanceUnits::Meters);
//! let back = geodesy.distance(center, north, DistanceUnits::Meters);
//! assert!((back - 300.0).abs() < 1e-6);
//! ```

pub mod coord;
pub mod geojson;
pub mod port;
pub mod spherical;

pub use coord::{Bbox, LngLat};
pub use geojson::{Feature, GeoJson, Geometry, Properties};
pub use port::GeodesyPort;
pub use spherical::Spherical;
