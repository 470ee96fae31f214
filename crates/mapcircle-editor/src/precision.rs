//! Polygon step count policy.

use mapcircle_core::constants::{BASE_POLYGON_STEPS, MIN_REFINE_ZOOM};

/// Number of polygon vertices used to approximate a circle.
///
/// Without refinement this is a constant [`BASE_POLYGON_STEPS`]. With
/// refinement the count grows with `sqrt(radius / 4) * zoom`, never dropping
/// below the base count. Zoom is clamped to [`MIN_REFINE_ZOOM`].
pub fn steps(radius: f64, zoom: f64, refine: bool) -> u32 {
    if !refine {
        return BASE_POLYGON_STEPS;
    }
    let zoom = if zoom.is_finite() {
        zoom.max(MIN_REFINE_ZOOM)
    } else {
        MIN_REFINE_ZOOM
    };
    let radius = if radius.is_finite() { radius.max(0.0) } else { 0.0 };
    let scaled = ((radius * 0.25).sqrt() * zoom).round();
    if scaled <= f64::from(BASE_POLYGON_STEPS) {
        BASE_POLYGON_STEPS
    } else if scaled >= f64::from(u32::MAX) {
        u32::MAX
    } else {
        scaled as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrefined_is_constant() {
        assert_eq!(steps(10.0, 1.0, false), 64);
        assert_eq!(steps(1.1e6, 22.0, false), 64);
    }

    #[test]
    fn test_refined_floor() {
        assert_eq!(steps(10.0, 1.0, true), 64);
        assert_eq!(steps(300.0, 0.0, true), 64);
        assert_eq!(steps(300.0, -5.0, true), 64);
    }

    #[test]
    fn test_refined_grows_with_zoom_and_radius() {
        // sqrt(250_000 * 0.25) = 250
        assert_eq!(steps(250_000.0, 1.0, true), 250);
        assert_eq!(steps(250_000.0, 2.0, true), 500);
        assert!(steps(500_000.0, 2.0, true) > steps(250_000.0, 2.0, true));
    }

    #[test]
    fn test_refined_monotonic() {
        let mut last = 0;
        for zoom in 0..23 {
            let s = steps(100_000.0, f64::from(zoom), true);
            assert!(s >= last);
            last = s;
        }
    }
}
