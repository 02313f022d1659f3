//! Circular cross-sections swept along a path.

use std::f32::consts::TAU;

use super::TriangleMesh;
use crate::path::PathProvider;

/// Sweep a circle of `radius` along `path`.
///
/// Produces `tubular_segments + 1` rings of `radial_segments + 1` vertices
/// (the seam vertex of each ring is duplicated). On closed paths the last
/// ring repeats the first so the mesh joins without a gap.
pub fn build_tube<P: PathProvider + ?Sized>(
    path: &P,
    tubular_segments: usize,
    radius: f32,
    radial_segments: usize,
) -> TriangleMesh {
    let tubular = tubular_segments.max(1);
    let radial = radial_segments.max(3);
    let frames = path.frenet_frames(tubular);
    let closed = path.is_closed();

    let ring_len = radial + 1;
    let mut positions = Vec::with_capacity((tubular + 1) * ring_len);

    for i in 0..=tubular {
        let ring = if closed && i == tubular { 0 } else { i };
        let center = path.point_at(ring as f32 / tubular as f32);
        let normal = frames.normals[ring];
        let binormal = frames.binormals[ring];

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let sin = v.sin();
            let cos = -v.cos();
            let dir = (normal * cos + binormal * sin).normalize_or_zero();
            positions.push(center + dir * radius);
        }
    }

    let mut indices = Vec::with_capacity(tubular * radial * 6);
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = (ring_len * (j - 1) + (i - 1)) as u32;
            let b = (ring_len * j + (i - 1)) as u32;
            let c = (ring_len * j + i) as u32;
            let d = (ring_len * (j - 1) + i) as u32;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }

    TriangleMesh { positions, indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::wormhole_path;

    #[test]
    fn counts_match_segment_layout() {
        let path = wormhole_path().unwrap();
        let mesh = build_tube(&path, 222, 0.6, 16);
        assert_eq!(mesh.positions.len(), 223 * 17);
        assert_eq!(mesh.indices.len(), 222 * 16 * 6);
        assert_eq!(mesh.triangle_count(), 222 * 16 * 2);
        let max = mesh.indices.iter().copied().max().unwrap() as usize;
        assert!(max < mesh.positions.len());
    }

    #[test]
    fn vertices_sit_on_the_radius() {
        let path = wormhole_path().unwrap();
        let mesh = build_tube(&path, 64, 0.6, 8);
        for (ring, chunk) in mesh.positions.chunks(9).enumerate() {
            let center = path.point_at((ring % 64) as f32 / 64.0);
            for p in chunk {
                let r = p.distance(center);
                assert!((r - 0.6).abs() < 1e-3, "ring {ring}: r = {r}");
            }
        }
    }

    #[test]
    fn closed_tube_repeats_first_ring() {
        let path = wormhole_path().unwrap();
        let mesh = build_tube(&path, 32, 0.5, 6);
        let ring = 7;
        let first = &mesh.positions[..ring];
        let last = &mesh.positions[mesh.positions.len() - ring..];
        assert_eq!(first, last);
    }
}
