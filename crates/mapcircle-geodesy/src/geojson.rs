//! The subset of GeoJSON the circle editor produces.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::coord::LngLat;

/// Feature properties.
pub type Properties = serde_json::Map<String, Value>;

/// GeoJSON geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: [f64; 2] },
    MultiPoint { coordinates: Vec<[f64; 2]> },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl Geometry {
    pub fn point(p: LngLat) -> Self {
        Geometry::Point {
            coordinates: p.to_array(),
        }
    }

    /// A polygon with a single exterior ring. The ring is closed if it is not already.
    pub fn polygon(ring: Vec<LngLat>) -> Self {
        let mut coords: Vec<[f64; 2]> = ring.into_iter().map(LngLat::to_array).collect();
        if let (Some(first), Some(last)) = (coords.first().copied(), coords.last().copied()) {
            if first != last {
                coords.push(first);
            }
        }
        Geometry::Polygon {
            coordinates: vec![coords],
        }
    }

    /// Every position in the geometry, in document order.
    pub fn positions(&self) -> Vec<LngLat> {
        match self {
            Geometry::Point { coordinates } => vec![LngLat::from(*coordinates)],
            Geometry::MultiPoint { coordinates } => {
                coordinates.iter().copied().map(LngLat::from).collect()
            }
            Geometry::Polygon { coordinates } => coordinates
                .iter()
                .flatten()
                .copied()
                .map(LngLat::from)
                .collect(),
        }
    }

    /// The exterior ring of a polygon.
    pub fn exterior_ring(&self) -> Option<&[[f64; 2]]> {
        match self {
            Geometry::Polygon { coordinates } => coordinates.first().map(Vec::as_slice),
            _ => None,
        }
    }
}

/// A GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            properties: Properties::new(),
        }
    }

    pub fn with_properties(geometry: Geometry, properties: Properties) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    /// Serialize as a standalone `"type": "Feature"` object.
    pub fn to_value(&self) -> Value {
        GeoJson::Feature(self.clone()).to_value()
    }
}

/// Top-level GeoJSON documents accepted as map source data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJson {
    Feature(Feature),
    FeatureCollection { features: Vec<Feature> },
}

impl GeoJson {
    /// Serialize to a JSON value.
    ///
    /// Non-finite coordinates serialize as `null`.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_polygon_is_closed() {
        let geometry = Geometry::polygon(vec![
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 0.0),
            LngLat::new(1.0, 1.0),
        ]);
        let ring = geometry.exterior_ring().unwrap();
        assert_eq!(ring.len(), 4);
        assert_eq!(ring.first(), ring.last());
    }

    #[test]
    fn test_feature_serialization() {
        let mut properties = Properties::new();
        properties.insert("name".into(), json!("home"));
        let feature = Feature::with_properties(Geometry::point(LngLat::new(1.5, 2.5)), properties);

        assert_eq!(
            feature.to_value(),
            json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [1.5, 2.5] },
                "properties": { "name": "home" }
            })
        );
    }

    #[test]
    fn test_collection_round_trip() {
        let doc = GeoJson::FeatureCollection {
            features: vec![Feature::new(Geometry::MultiPoint {
                coordinates: vec![[0.0, 1.0], [2.0, 3.0]],
            })],
        };
        let text = serde_json::to_string(&doc).unwrap();
        let parsed: GeoJson = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, doc);
    }

    #[test]
    fn test_positions() {
        let geometry = Geometry::MultiPoint {
            coordinates: vec![[0.0, 1.0], [2.0, 3.0]],
        };
        assert_eq!(
            geometry.positions(),
            vec![LngLat::new(0.0, 1.0), LngLat::new(2.0, 3.0)]
        );
        assert!(geometry.exterior_ring().is_none());
    }
}
