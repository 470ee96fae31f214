use mapcircle_core::constants::EARTH_RADIUS_M;
use mapcircle_core::DistanceUnits;

use crate::coord::LngLat;
use crate::port::GeodesyPort;

/// Great-circle geodesy on a sphere of mean earth radius.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spherical;

impl GeodesyPort for Spherical {
    fn destination(
        &self,
        origin: LngLat,
        distance: f64,
        bearing: f64,
        units: DistanceUnits,
    ) -> LngLat {
        let lon1 = origin.lng.to_radians();
        let lat1 = origin.lat.to_radians();
        let theta = bearing.to_radians();
        let delta = units.to_meters(distance) / EARTH_RADIUS_M;

        let lat2 = (lat1.sin() * delta.cos() + lat1.cos() * delta.sin() * theta.cos()).asin();
        let lon2 = lon1
            + (theta.sin() * delta.sin() * lat1.cos())
                .atan2(delta.cos() - lat1.sin() * lat2.sin());

        LngLat::new(lon2.to_degrees(), lat2.to_degrees())
    }

    fn bearing(&self, from: LngLat, to: LngLat) -> f64 {
        let lat1 = from.lat.to_radians();
        let lat2 = to.lat.to_radians();
        let d_lon = (to.lng - from.lng).to_radians();

        let y = d_lon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lon.cos();
        y.atan2(x).to_degrees()
    }

    fn distance(&self, from: LngLat, to: LngLat, units: DistanceUnits) -> f64 {
        let lat1 = from.lat.to_radians();
        let lat2 = to.lat.to_radians();
        let d_lat = lat2 - lat1;
        let d_lon = (to.lng - from.lng).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        let meters = 2.0 * EARTH_RADIUS_M * a.sqrt().atan2((1.0 - a).sqrt());
        units.from_meters(meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geojson::Geometry;
    use proptest::prelude::*;

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn test_destination_due_north_keeps_longitude() {
        let origin = LngLat::new(10.0, 0.0);
        let p = Spherical.destination(origin, 111.195, 0.0, DistanceUnits::Kilometers);
        assert_close(p.lng, 10.0, 1e-9);
        assert_close(p.lat, 1.0, 1e-4);
    }

    #[test]
    fn test_bearing_cardinal_directions() {
        let origin = LngLat::new(0.0, 0.0);
        assert_close(Spherical.bearing(origin, LngLat::new(0.0, 1.0)), 0.0, 1e-9);
        assert_close(Spherical.bearing(origin, LngLat::new(1.0, 0.0)), 90.0, 1e-9);
        assert_close(Spherical.bearing(origin, LngLat::new(0.0, -1.0)), 180.0, 1e-9);
        assert_close(Spherical.bearing(origin, LngLat::new(-1.0, 0.0)), -90.0, 1e-9);
    }

    #[test]
    fn test_distance_one_degree_at_equator() {
        let d = Spherical.distance(
            LngLat::new(0.0, 0.0),
            LngLat::new(1.0, 0.0),
            DistanceUnits::Meters,
        );
        assert_close(d, 111_195.08, 0.1);
    }

    #[test]
    fn test_circle_ring_is_closed_and_on_radius() {
        let center = LngLat::new(-75.343, 39.984);
        let geometry = Spherical.circle(center, 300.0, 64, DistanceUnits::Meters);
        let ring = geometry.exterior_ring().unwrap();
        assert_eq!(ring.len(), 65);
        assert_eq!(ring.first(), ring.last());
        for coords in ring {
            let d = Spherical.distance(center, LngLat::from(*coords), DistanceUnits::Meters);
            assert_close(d, 300.0, 1e-6);
        }
    }

    #[test]
    fn test_bbox_polygon_covers_bbox() {
        let geometry = Spherical.circle(LngLat::new(0.0, 0.0), 1000.0, 64, DistanceUnits::Meters);
        let bbox = Spherical.bbox(&geometry).unwrap();
        match Spherical.bbox_polygon(bbox) {
            Geometry::Polygon { coordinates } => {
                assert_eq!(coordinates[0].len(), 5);
                assert_eq!(coordinates[0][0], [bbox.west, bbox.south]);
                assert_eq!(coordinates[0][2], [bbox.east, bbox.north]);
            }
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    proptest! {
        #[test]
        fn test_destination_distance_agree(
            lng in -170.0f64..170.0,
            lat in -80.0f64..80.0,
            meters in 10.0f64..1.1e6,
            bearing in -180.0f64..180.0,
        ) {
            let origin = LngLat::new(lng, lat);
            let p = Spherical.destination(origin, meters, bearing, DistanceUnits::Meters);
            let back = Spherical.distance(origin, p, DistanceUnits::Meters);
            prop_assert!((back - meters).abs() < 1e-3 * meters.max(1.0));
        }
    }
}
