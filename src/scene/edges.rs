//! Feature-edge extraction from triangle meshes.
//!
//! An edge is kept when it borders only one triangle or when the two
//! triangles sharing it meet at more than a threshold angle. Vertices are
//! matched by quantized position, so meshes with duplicated seam vertices
//! still pair their edges up.

use glam::Vec3;
use rustc_hash::{FxHashMap, FxHashSet};

use super::TriangleMesh;

/// Positions are matched after rounding to this many steps per unit.
const MERGE_PRECISION: f32 = 1e4;

type VertexKey = [i64; 3];

fn vertex_key(p: Vec3) -> VertexKey {
    [
        (p.x * MERGE_PRECISION).round() as i64,
        (p.y * MERGE_PRECISION).round() as i64,
        (p.z * MERGE_PRECISION).round() as i64,
    ]
}

struct HalfEdge {
    start: Vec3,
    end: Vec3,
    normal: Vec3,
    paired: bool,
}

/// Line segments along the feature edges of `mesh`.
///
/// Segments are returned in a deterministic order: creased edges as they
/// are found, then edges that border a single triangle.
#[must_use]
pub fn feature_edges(mesh: &TriangleMesh, threshold_deg: f32) -> Vec<[Vec3; 2]> {
    let threshold_dot = threshold_deg.to_radians().cos();

    let mut open: Vec<HalfEdge> = Vec::new();
    let mut lookup: FxHashMap<(VertexKey, VertexKey), usize> =
        FxHashMap::default();
    let mut segments = Vec::new();

    for tri in mesh.indices.chunks_exact(3) {
        let corners = [
            mesh.positions[tri[0] as usize],
            mesh.positions[tri[1] as usize],
            mesh.positions[tri[2] as usize],
        ];
        let keys = corners.map(vertex_key);
        if keys[0] == keys[1] || keys[1] == keys[2] || keys[2] == keys[0] {
            continue;
        }
        let normal = face_normal(corners);

        for j in 0..3 {
            let next = (j + 1) % 3;
            let forward = (keys[j], keys[next]);
            let reverse = (keys[next], keys[j]);

            if let Some(&slot) = lookup.get(&reverse) {
                let twin = &mut open[slot];
                if !twin.paired {
                    if normal.dot(twin.normal) <= threshold_dot {
                        segments.push([corners[j], corners[next]]);
                    }
                    twin.paired = true;
                    continue;
                }
            }
            if !lookup.contains_key(&forward) {
                let _ = lookup.insert(forward, open.len());
                open.push(HalfEdge {
                    start: corners[j],
                    end: corners[next],
                    normal,
                    paired: false,
                });
            }
        }
    }

    segments.extend(
        open.iter()
            .filter(|edge| !edge.paired)
            .map(|edge| [edge.start, edge.end]),
    );
    segments
}

/// Every distinct triangle edge of `mesh`, by index.
#[must_use]
pub fn wireframe_edges(mesh: &TriangleMesh) -> Vec<[Vec3; 2]> {
    let mut seen: FxHashSet<(u32, u32)> = FxHashSet::default();
    let mut segments = Vec::new();
    for tri in mesh.indices.chunks_exact(3) {
        for j in 0..3 {
            let a = tri[j];
            let b = tri[(j + 1) % 3];
            if seen.insert((a.min(b), a.max(b))) {
                segments.push([
                    mesh.positions[a as usize],
                    mesh.positions[b as usize],
                ]);
            }
        }
    }
    segments
}

fn face_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (c - b).cross(a - b).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use glam::Quat;

    use super::*;
    use crate::scene::boxes::box_mesh;

    #[test]
    fn cube_has_twelve_edges() {
        let mesh = box_mesh(1.0);
        let edges = feature_edges(&mesh, 0.2);
        assert_eq!(edges.len(), 12);
        for [a, b] in &edges {
            assert!((a.distance(*b) - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn rotated_cube_still_has_twelve_edges() {
        let rotation = Quat::from_euler(glam::EulerRot::XYZ, 0.3, 1.1, 2.0);
        let mut mesh = box_mesh(0.075);
        for p in &mut mesh.positions {
            *p = rotation * *p + Vec3::new(3.0, -1.0, 2.0);
        }
        assert_eq!(feature_edges(&mesh, 0.2).len(), 12);
    }

    #[test]
    fn flat_quad_keeps_only_its_border() {
        let mesh = TriangleMesh {
            positions: vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::Y,
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        };
        let edges = feature_edges(&mesh, 1.0);
        assert_eq!(edges.len(), 4);
        // Diagonal is coplanar and dropped
        assert!(!edges.iter().any(|[a, b]| {
            (a.distance(*b) - std::f32::consts::SQRT_2).abs() < 1e-5
        }));
    }

    #[test]
    fn folded_quad_keeps_the_crease() {
        let mesh = TriangleMesh {
            positions: vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::new(1.0, 1.0, 0.5),
                Vec3::Y,
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
        };
        assert_eq!(feature_edges(&mesh, 1.0).len(), 5);
        assert_eq!(feature_edges(&mesh, 89.0).len(), 4);
    }

    #[test]
    fn degenerate_triangles_are_skipped() {
        let mesh = TriangleMesh {
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 1e-6)],
            indices: vec![0, 1, 2],
        };
        assert!(feature_edges(&mesh, 0.2).is_empty());
    }

    #[test]
    fn wireframe_counts_shared_edges_once() {
        let mesh = box_mesh(1.0);
        // 6 faces * (4 sides + 1 diagonal); each face has its own vertices
        assert_eq!(wireframe_edges(&mesh).len(), 30);
    }
}
