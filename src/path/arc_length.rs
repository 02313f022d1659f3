//! Arc-length reparameterization.

use glam::Vec3;

/// Cumulative chord lengths of a curve sampled at evenly spaced raw
/// parameters. Maps normalized arc length `u` back to the raw parameter `t`.
#[derive(Debug, Clone)]
pub struct ArcLengthTable {
    lengths: Vec<f32>,
}

impl ArcLengthTable {
    /// Sample `point` at `divisions + 1` raw parameters and accumulate the
    /// distances between neighbours.
    pub fn build(divisions: usize, point: impl Fn(f32) -> Vec3) -> Self {
        let divisions = divisions.max(1);
        let mut lengths = Vec::with_capacity(divisions + 1);
        lengths.push(0.0);

        let mut last = point(0.0);
        let mut sum = 0.0;
        for d in 1..=divisions {
            let current = point(d as f32 / divisions as f32);
            sum += current.distance(last);
            lengths.push(sum);
            last = current;
        }

        Self { lengths }
    }

    /// Approximate length of the whole curve.
    #[must_use]
    pub fn total_length(&self) -> f32 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    /// Cumulative lengths, one per sample.
    #[must_use]
    pub fn lengths(&self) -> &[f32] {
        &self.lengths
    }

    /// Raw parameter at normalized arc length `u` (clamped to `[0, 1]`).
    #[must_use]
    pub fn u_to_t(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let il = self.lengths.len();
        let total = self.total_length();
        if il < 2 || total <= 0.0 {
            return u;
        }

        let target = u * total;
        // Last sample whose cumulative length does not exceed the target.
        let i = self
            .lengths
            .partition_point(|&l| l <= target)
            .saturating_sub(1)
            .min(il - 2);

        let before = self.lengths[i];
        if before == target {
            return i as f32 / (il - 1) as f32;
        }

        let segment = self.lengths[i + 1] - before;
        let fraction = if segment > 0.0 {
            (target - before) / segment
        } else {
            0.0
        };
        (i as f32 + fraction) / (il - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_line_maps_linearly() {
        let table = ArcLengthTable::build(10, |t| Vec3::new(t * 4.0, 0.0, 0.0));
        assert!((table.total_length() - 4.0).abs() < 1e-5);
        assert!((table.u_to_t(0.25) - 0.25).abs() < 1e-5);
        assert!((table.u_to_t(0.5) - 0.5).abs() < 1e-5);
        assert_eq!(table.u_to_t(0.0), 0.0);
        assert!((table.u_to_t(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn uneven_speed_is_compensated() {
        // Parameter speed grows with t: the second half of the parameter
        // range covers three quarters of the distance.
        let table = ArcLengthTable::build(200, |t| Vec3::new(t * t, 0.0, 0.0));
        let t = table.u_to_t(0.25);
        assert!((t - 0.5).abs() < 1e-3, "t = {t}");
    }

    #[test]
    fn out_of_range_is_clamped() {
        let table = ArcLengthTable::build(4, |t| Vec3::new(0.0, t, 0.0));
        assert_eq!(table.u_to_t(-1.0), 0.0);
        assert!((table.u_to_t(2.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn degenerate_curve_falls_back_to_identity() {
        let table = ArcLengthTable::build(8, |_| Vec3::ONE);
        assert_eq!(table.total_length(), 0.0);
        assert_eq!(table.u_to_t(0.3), 0.3);
        assert_eq!(table.lengths().len(), 9);
    }
}
