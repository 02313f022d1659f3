//! Moving frames along a path for sweeping cross-sections.

use glam::{Quat, Vec3};

use super::PathProvider;

/// Below this length the cross product of two tangents is treated as zero
/// (the tangents are parallel and the frame is carried over unchanged).
const PARALLEL_EPSILON: f32 = 1e-6;

/// Tangent, normal and binormal vectors at evenly spaced arc-length
/// positions along a path.
///
/// Normals are parallel-transported from the first sample, so the frame does
/// not flip on inflections the way a curvature-based Frenet frame does. On
/// closed paths the accumulated twist is spread evenly over all samples so
/// the last frame matches the first.
#[derive(Debug, Clone)]
pub struct FrenetFrames {
    /// Unit tangents.
    pub tangents: Vec<Vec3>,
    /// Unit normals, perpendicular to the tangents.
    pub normals: Vec<Vec3>,
    /// Unit binormals (`tangent × normal`).
    pub binormals: Vec<Vec3>,
}

impl FrenetFrames {
    /// Compute frames at `segments + 1` positions along `path`.
    pub fn compute<P: PathProvider + ?Sized>(path: &P, segments: usize) -> Self {
        let segments = segments.max(1);
        let tangents: Vec<Vec3> = (0..=segments)
            .map(|i| path.tangent_at(i as f32 / segments as f32))
            .collect();

        let mut normals = Vec::with_capacity(segments + 1);
        let mut binormals = Vec::with_capacity(segments + 1);

        // Initial normal: perpendicular to the tangent, built from the axis
        // the tangent points along the least.
        let t0 = tangents[0];
        let axis = least_aligned_axis(t0);
        let side = t0.cross(axis).normalize_or_zero();
        let n0 = t0.cross(side);
        normals.push(n0);
        binormals.push(t0.cross(n0));

        for i in 1..=segments {
            let prev_t = tangents[i - 1];
            let t = tangents[i];
            let mut normal = normals[i - 1];

            let rotation_axis = prev_t.cross(t);
            if rotation_axis.length() > PARALLEL_EPSILON {
                let theta = prev_t.dot(t).clamp(-1.0, 1.0).acos();
                normal = Quat::from_axis_angle(rotation_axis.normalize(), theta)
                    * normal;
            }

            normals.push(normal);
            binormals.push(t.cross(normal));
        }

        if path.is_closed() {
            let first = normals[0];
            let last = normals[segments];
            let mut theta =
                first.dot(last).clamp(-1.0, 1.0).acos() / segments as f32;
            if tangents[0].dot(first.cross(last)) > 0.0 {
                theta = -theta;
            }

            for i in 1..=segments {
                let twist = Quat::from_axis_angle(
                    tangents[i].normalize_or_zero(),
                    theta * i as f32,
                );
                normals[i] = twist * normals[i];
                binormals[i] = tangents[i].cross(normals[i]);
            }
        }

        Self {
            tangents,
            normals,
            binormals,
        }
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tangents.len()
    }

    /// Whether there are no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tangents.is_empty()
    }
}

/// Unit axis the vector `v` has the smallest absolute component along.
fn least_aligned_axis(v: Vec3) -> Vec3 {
    let abs = v.abs();
    if abs.x <= abs.y && abs.x <= abs.z {
        Vec3::X
    } else if abs.y <= abs.z {
        Vec3::Y
    } else {
        Vec3::Z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::wormhole_path;

    fn assert_orthonormal(frames: &FrenetFrames, i: usize) {
        let t = frames.tangents[i];
        let n = frames.normals[i];
        let b = frames.binormals[i];
        assert!((t.length() - 1.0).abs() < 1e-3, "tangent {i}");
        assert!((n.length() - 1.0).abs() < 1e-3, "normal {i}");
        assert!((b.length() - 1.0).abs() < 1e-3, "binormal {i}");
        assert!(t.dot(n).abs() < 1e-2, "t·n at {i}");
        assert!(t.dot(b).abs() < 1e-2, "t·b at {i}");
        assert!(n.dot(b).abs() < 1e-2, "n·b at {i}");
    }

    #[test]
    fn frames_are_orthonormal() {
        let path = wormhole_path().unwrap();
        let frames = path.frenet_frames(222);
        assert_eq!(frames.len(), 223);
        for i in 0..frames.len() {
            assert_orthonormal(&frames, i);
        }
    }

    #[test]
    fn closed_path_frames_meet_at_the_seam() {
        let path = wormhole_path().unwrap();
        let frames = path.frenet_frames(222);
        let first = frames.normals[0];
        let last = frames.normals[222];
        assert!(first.dot(last) > 0.99, "seam twist: {}", first.dot(last));
    }

    #[test]
    fn least_aligned_axis_picks_smallest_component() {
        assert_eq!(least_aligned_axis(Vec3::new(0.1, 0.9, 0.4)), Vec3::X);
        assert_eq!(least_aligned_axis(Vec3::new(0.9, 0.1, 0.4)), Vec3::Y);
        assert_eq!(least_aligned_axis(Vec3::new(0.9, 0.4, -0.1)), Vec3::Z);
    }
}
