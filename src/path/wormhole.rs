//! The hardcoded wormhole curve.

use glam::Vec3;

use super::CatmullRomCurve;
use crate::error::WormholeError;

/// Control points of the wormhole loop: a trefoil knot squashed along Y so
/// the tube never intersects itself.
pub const WORMHOLE_CONTROL_POINTS: [[f32; 3]; 16] = [
    [0.000, 0.000, -4.000],
    [7.188, -2.310, -1.961],
    [10.828, -1.768, 2.828],
    [9.352, 0.957, 7.188],
    [4.000, 2.500, 8.000],
    [-1.961, 0.957, 4.126],
    [-5.172, -1.768, -2.828],
    [-4.126, -2.310, -9.352],
    [0.000, 0.000, -12.000],
    [4.126, 2.310, -9.352],
    [5.172, 1.768, -2.828],
    [1.961, -0.957, 4.126],
    [-4.000, -2.500, 8.000],
    [-9.352, -0.957, 7.188],
    [-10.828, 1.768, 2.828],
    [-7.188, 2.310, -1.961],
];

/// Build the closed curve the camera flies through.
///
/// # Errors
///
/// Returns [`WormholeError::Path`] if the control points are malformed.
pub fn wormhole_path() -> Result<CatmullRomCurve, WormholeError> {
    let points = WORMHOLE_CONTROL_POINTS
        .iter()
        .copied()
        .map(Vec3::from_array)
        .collect();
    CatmullRomCurve::new(points, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::PathProvider;

    #[test]
    fn wormhole_is_a_closed_loop() {
        let path = wormhole_path().unwrap();
        assert!(path.is_closed());
        assert!(path.point_at(0.0).distance(path.point_at(1.0)) < 1e-4);
        assert!(path.length() > 50.0);
        assert_eq!(
            path.control_points().len(),
            WORMHOLE_CONTROL_POINTS.len()
        );
    }

    #[test]
    fn strands_stay_clear_of_each_other() {
        // Samples far apart along the curve must not come closer than two
        // tube diameters, or the wireframe tube would cut through itself.
        let path = wormhole_path().unwrap();
        let samples: Vec<Vec3> =
            (0..400).map(|i| path.point_at(i as f32 / 400.0)).collect();
        for (i, a) in samples.iter().enumerate() {
            for (j, b) in samples.iter().enumerate().skip(i + 40) {
                if j + 40 > samples.len() + i {
                    continue;
                }
                assert!(a.distance(*b) > 1.2, "samples {i} and {j} collide");
            }
        }
    }
}
