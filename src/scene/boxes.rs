//! Small rotated boxes scattered around the path.

use std::f32::consts::PI;

use glam::{EulerRot, Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::color::hsl_to_linear;
use super::TriangleMesh;
use crate::path::PathProvider;

/// Extra random path offset added to each box's evenly spaced slot.
const SLOT_JITTER: f32 = 0.1;

/// Hue of the box at the start of the loop; it decreases along the path.
const START_HUE: f32 = 0.7;

/// One placed box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedBox {
    /// Normalized path position the box was placed at, in `[0, 1)`.
    pub phase: f32,
    /// Box center.
    pub position: Vec3,
    /// Box orientation.
    pub rotation: Quat,
    /// Linear RGB edge color.
    pub color: [f32; 3],
}

impl PlacedBox {
    /// Transform a local-space point into world space.
    #[must_use]
    pub fn transform(&self, local: Vec3) -> Vec3 {
        self.rotation * local + self.position
    }
}

/// Random source for box placement: seeded when `seed` is set, otherwise
/// drawn from the operating system.
#[must_use]
pub fn scatter_rng(seed: Option<u64>) -> StdRng {
    seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64)
}

/// Place `count` boxes along `path`.
///
/// Box `i` starts at slot `i / count`, nudged forward by up to
/// [`SLOT_JITTER`], then shifted on X and Z by `rand - jitter_bias`.
pub fn scatter_boxes<P: PathProvider + ?Sized, R: Rng>(
    path: &P,
    count: usize,
    jitter_bias: f32,
    rng: &mut R,
) -> Vec<PlacedBox> {
    (0..count)
        .map(|i| {
            let slot = i as f32 / count as f32;
            let phase = (slot + rng.random::<f32>() * SLOT_JITTER) % 1.0;
            let mut position = path.point_at(phase);
            position.x += rng.random::<f32>() - jitter_bias;
            position.z += rng.random::<f32>() - jitter_bias;
            let rotation = Quat::from_euler(
                EulerRot::XYZ,
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
                rng.random::<f32>() * PI,
            );
            PlacedBox {
                phase,
                position,
                rotation,
                color: hsl_to_linear(START_HUE - phase, 1.0, 0.5),
            }
        })
        .collect()
}

/// Axis-aligned cube of edge `size` centered at the origin, four vertices
/// per face, wound counter-clockwise when seen from outside.
#[must_use]
pub fn box_mesh(size: f32) -> TriangleMesh {
    // (normal, u, v) with u × v = normal
    const FACES: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::X, Vec3::Y, Vec3::Z),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::Z, Vec3::X),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::Y, Vec3::X),
    ];
    let half = size * 0.5;

    let mut positions = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in FACES {
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push((normal + u * su + v * sv) * half);
        }
        indices.extend_from_slice(&[
            base,
            base + 1,
            base + 2,
            base,
            base + 2,
            base + 3,
        ]);
    }
    TriangleMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::wormhole_path;

    #[test]
    fn same_seed_same_layout() {
        let path = wormhole_path().unwrap();
        let a = scatter_boxes(&path, 55, 0.4, &mut scatter_rng(Some(7)));
        let b = scatter_boxes(&path, 55, 0.4, &mut scatter_rng(Some(7)));
        let c = scatter_boxes(&path, 55, 0.4, &mut scatter_rng(Some(8)));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn boxes_stay_near_their_slot() {
        let path = wormhole_path().unwrap();
        let boxes = scatter_boxes(&path, 55, 0.4, &mut scatter_rng(Some(1)));
        assert_eq!(boxes.len(), 55);
        for (i, b) in boxes.iter().enumerate() {
            assert!((0.0..1.0).contains(&b.phase));
            let slot = i as f32 / 55.0;
            let ahead = (b.phase - slot).rem_euclid(1.0);
            assert!(ahead < SLOT_JITTER + 1e-6, "box {i} drifted {ahead}");

            let on_path = path.point_at(b.phase);
            let offset = b.position - on_path;
            assert_eq!(offset.y, 0.0);
            assert!((-0.41..0.61).contains(&offset.x));
            assert!((-0.41..0.61).contains(&offset.z));
        }
    }

    #[test]
    fn color_follows_phase() {
        let path = wormhole_path().unwrap();
        let boxes = scatter_boxes(&path, 10, 0.4, &mut scatter_rng(Some(3)));
        for b in boxes {
            assert_eq!(b.color, hsl_to_linear(0.7 - b.phase, 1.0, 0.5));
        }
    }

    #[test]
    fn rotation_is_rigid() {
        let placed = PlacedBox {
            phase: 0.0,
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_euler(EulerRot::XYZ, 1.0, 2.0, 3.0),
            color: [1.0; 3],
        };
        let a = placed.transform(Vec3::X);
        let b = placed.transform(Vec3::ZERO);
        assert!((a.distance(b) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn box_mesh_is_a_closed_cube() {
        let mesh = box_mesh(2.0);
        assert_eq!(mesh.positions.len(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for p in &mesh.positions {
            assert_eq!(p.abs(), Vec3::ONE);
        }
    }
}
