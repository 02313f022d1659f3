//! Parametric 3D paths.
//!
//! A [`PathProvider`] can be queried two ways: by raw curve parameter
//! ([`PathProvider::point`]) or by normalized arc length
//! ([`PathProvider::point_at`]). The tube mesh and the camera both use the
//! arc-length form, so equal steps in the parameter cover equal distances
//! along the curve.

mod arc_length;
mod catmull_rom;
mod frames;
mod wormhole;

use glam::Vec3;

pub use arc_length::ArcLengthTable;
pub use catmull_rom::CatmullRomCurve;
pub use frames::FrenetFrames;
pub use wormhole::{wormhole_path, WORMHOLE_CONTROL_POINTS};

/// Parameter offset used for central-difference tangents.
const TANGENT_DELTA: f32 = 1e-4;

/// A curve in 3D space sampled by a normalized parameter in `[0, 1]`.
pub trait PathProvider {
    /// Point at raw curve parameter `t`.
    fn point(&self, t: f32) -> Vec3;

    /// Point at normalized arc length `u`.
    fn point_at(&self, u: f32) -> Vec3;

    /// Whether the end of the curve joins its start.
    fn is_closed(&self) -> bool;

    /// `divisions + 1` evenly spaced samples of [`point`](Self::point),
    /// endpoints included.
    fn points(&self, divisions: usize) -> Vec<Vec3> {
        let divisions = divisions.max(1);
        (0..=divisions)
            .map(|d| self.point(d as f32 / divisions as f32))
            .collect()
    }

    /// Unit tangent at normalized arc length `u`.
    fn tangent_at(&self, u: f32) -> Vec3 {
        let u0 = (u - TANGENT_DELTA).max(0.0);
        let u1 = (u + TANGENT_DELTA).min(1.0);
        (self.point_at(u1) - self.point_at(u0)).normalize_or_zero()
    }

    /// Parallel-transport frames at `segments + 1` evenly spaced arc-length
    /// positions.
    fn frenet_frames(&self, segments: usize) -> FrenetFrames {
        FrenetFrames::compute(self, segments)
    }
}
