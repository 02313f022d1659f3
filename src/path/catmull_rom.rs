//! Centripetal Catmull-Rom spline.

use glam::Vec3;

use super::{ArcLengthTable, PathProvider};
use crate::error::WormholeError;

/// Number of chord samples in the arc-length lookup table.
const ARC_LENGTH_DIVISIONS: usize = 200;

/// Knot spacing exponent applied to squared chord length (alpha = 0.5).
const CENTRIPETAL_EXPONENT: f32 = 0.25;

/// Knot intervals shorter than this are treated as coincident points.
const MIN_KNOT_INTERVAL: f32 = 1e-4;

/// Centripetal Catmull-Rom curve through a list of control points.
///
/// The curve passes through every control point. A closed curve wraps the
/// last point back to the first.
#[derive(Debug, Clone)]
pub struct CatmullRomCurve {
    points: Vec<Vec3>,
    closed: bool,
    arc_lengths: ArcLengthTable,
}

impl CatmullRomCurve {
    /// Build a curve through `points`.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Path`] for fewer than two points or for
    /// points with non-finite coordinates.
    pub fn new(points: Vec<Vec3>, closed: bool) -> Result<Self, WormholeError> {
        if points.len() < 2 {
            return Err(WormholeError::Path(format!(
                "a curve needs at least 2 control points, got {}",
                points.len()
            )));
        }
        if let Some(i) = points.iter().position(|p| !p.is_finite()) {
            return Err(WormholeError::Path(format!(
                "control point {i} is not finite: {}",
                points[i]
            )));
        }

        let mut curve = Self {
            points,
            closed,
            arc_lengths: ArcLengthTable::build(1, |_| Vec3::ZERO),
        };
        curve.arc_lengths =
            ArcLengthTable::build(ARC_LENGTH_DIVISIONS, |t| curve.evaluate(t));
        Ok(curve)
    }

    /// The control points the curve passes through.
    #[must_use]
    pub fn control_points(&self) -> &[Vec3] {
        &self.points
    }

    /// Approximate length of the curve.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.arc_lengths.total_length()
    }

    fn evaluate(&self, t: f32) -> Vec3 {
        let points = &self.points;
        let l = points.len();
        let t = if self.closed { t } else { t.clamp(0.0, 1.0) };

        let spans = if self.closed { l } else { l - 1 };
        let p = spans as f32 * t;
        let mut index = p.floor() as i64;
        let mut weight = p - index as f32;

        if self.closed {
            index = index.rem_euclid(l as i64);
        } else if weight == 0.0 && index == l as i64 - 1 {
            index = l as i64 - 2;
            weight = 1.0;
        }
        let index = index as usize;

        let p1 = points[index % l];
        let p2 = points[(index + 1) % l];
        let p0 = if self.closed || index > 0 {
            points[(index + l - 1) % l]
        } else {
            points[0] * 2.0 - points[1]
        };
        let p3 = if self.closed || index + 2 < l {
            points[(index + 2) % l]
        } else {
            points[l - 1] * 2.0 - points[l - 2]
        };

        let mut dt0 = p0.distance_squared(p1).powf(CENTRIPETAL_EXPONENT);
        let mut dt1 = p1.distance_squared(p2).powf(CENTRIPETAL_EXPONENT);
        let mut dt2 = p2.distance_squared(p3).powf(CENTRIPETAL_EXPONENT);
        if dt1 < MIN_KNOT_INTERVAL {
            dt1 = 1.0;
        }
        if dt0 < MIN_KNOT_INTERVAL {
            dt0 = dt1;
        }
        if dt2 < MIN_KNOT_INTERVAL {
            dt2 = dt1;
        }

        // Tangents for the non-uniform parameterization, rescaled to [0, 1]
        let m1 = ((p1 - p0) / dt0 - (p2 - p0) / (dt0 + dt1)
            + (p2 - p1) / dt1)
            * dt1;
        let m2 = ((p2 - p1) / dt1 - (p3 - p1) / (dt1 + dt2)
            + (p3 - p2) / dt2)
            * dt1;

        hermite_point(p1, m1, p2, m2, weight)
    }
}

impl PathProvider for CatmullRomCurve {
    fn point(&self, t: f32) -> Vec3 {
        self.evaluate(t)
    }

    fn point_at(&self, u: f32) -> Vec3 {
        self.evaluate(self.arc_lengths.u_to_t(u))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Cubic Hermite interpolation between `p0` and `p1`.
fn hermite_point(p0: Vec3, m0: Vec3, p1: Vec3, m1: Vec3, t: f32) -> Vec3 {
    let t2 = t * t;
    let t3 = t2 * t;
    let c2 = -3.0 * p0 + 3.0 * p1 - 2.0 * m0 - m1;
    let c3 = 2.0 * p0 - 2.0 * p1 + m0 + m1;
    p0 + m0 * t + c2 * t2 + c3 * t3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<Vec3> {
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(4.0, 0.0, 4.0),
            Vec3::new(0.0, 0.0, 4.0),
        ]
    }

    #[test]
    fn rejects_too_few_points() {
        let err = CatmullRomCurve::new(vec![Vec3::ONE], true).unwrap_err();
        assert!(matches!(err, WormholeError::Path(_)));
        assert!(CatmullRomCurve::new(Vec::new(), false).is_err());
    }

    #[test]
    fn rejects_non_finite_points() {
        let points = vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)];
        assert!(CatmullRomCurve::new(points, false).is_err());
    }

    #[test]
    fn closed_curve_passes_through_control_points() {
        let curve = CatmullRomCurve::new(square(), true).unwrap();
        assert_eq!(curve.control_points(), square().as_slice());
        for (i, expected) in square().iter().enumerate() {
            let p = curve.point(i as f32 / 4.0);
            assert!(p.distance(*expected) < 1e-5, "point {i}: {p}");
        }
        assert!(curve.point(1.0).distance(curve.point(0.0)) < 1e-5);
    }

    #[test]
    fn open_curve_ends_at_last_point() {
        let curve = CatmullRomCurve::new(square(), false).unwrap();
        assert!(!curve.is_closed());
        assert!(curve.point(0.0).distance(Vec3::ZERO) < 1e-5);
        assert!(curve.point(1.0).distance(Vec3::new(0.0, 0.0, 4.0)) < 1e-5);
        // Parameters past the end are clamped on open curves
        assert!(curve.point(1.5).distance(curve.point(1.0)) < 1e-6);
    }

    #[test]
    fn closed_curve_wraps_parameters() {
        let curve = CatmullRomCurve::new(square(), true).unwrap();
        assert!(curve.point(1.25).distance(curve.point(0.25)) < 1e-4);
        assert!(curve.point(-0.25).distance(curve.point(0.75)) < 1e-4);
    }

    #[test]
    fn arc_length_samples_are_evenly_spaced() {
        let curve = CatmullRomCurve::new(square(), true).unwrap();
        let steps: Vec<f32> = (0..50)
            .map(|i| {
                let a = curve.point_at(i as f32 / 50.0);
                let b = curve.point_at((i + 1) as f32 / 50.0);
                a.distance(b)
            })
            .collect();
        let min = steps.iter().copied().fold(f32::MAX, f32::min);
        let max = steps.iter().copied().fold(0.0, f32::max);
        assert!(max / min < 1.05, "min {min}, max {max}");
    }

    #[test]
    fn sampled_points_include_both_ends() {
        let curve = CatmullRomCurve::new(square(), true).unwrap();
        let points = curve.points(200);
        assert_eq!(points.len(), 201);
        assert!(points[0].distance(points[200]) < 1e-5);
    }

    #[test]
    fn coincident_points_do_not_produce_nan() {
        let points = vec![Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::X];
        let curve = CatmullRomCurve::new(points, false).unwrap();
        for i in 0..=20 {
            assert!(curve.point(i as f32 / 20.0).is_finite());
        }
    }

    #[test]
    fn tangent_follows_travel_direction() {
        let curve = CatmullRomCurve::new(square(), true).unwrap();
        let tangent = curve.tangent_at(0.125);
        assert!((tangent.length() - 1.0).abs() < 1e-4);
        // Between the first two corners the curve heads along +X
        assert!(tangent.x > 0.9, "tangent {tangent}");
    }
}
