//! Static scene geometry for the fly-through.
//!
//! Everything here is built once on the CPU before the first frame: the
//! tube swept along the path, its feature edges, the optional centerline
//! and the scattered boxes. The result is a flat list of colored line
//! segments that the line renderer uploads as-is.

/// Randomly placed decorative boxes.
pub mod boxes;
/// HSL and sRGB conversions.
pub mod color;
/// Feature-edge and wireframe extraction.
pub mod edges;
/// Tube mesh generation.
pub mod tube;

use glam::Vec3;

use crate::options::{DisplayOptions, SceneOptions};
use crate::path::PathProvider;

/// Box edges are always drawn in this color when the solid wireframe layer
/// is enabled.
const BOX_WIREFRAME_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// Indexed triangle mesh used as input to edge extraction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Three indices per triangle.
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    /// Number of triangles.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// One end of a colored line segment.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LineVertex {
    /// World-space position.
    pub position: [f32; 3],
    /// Linear RGB color.
    pub color: [f32; 3],
}

/// Sizes of the assembled scene, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SceneStats {
    /// Vertices in the tube mesh.
    pub tube_vertices: usize,
    /// Triangles in the tube mesh.
    pub tube_triangles: usize,
    /// Feature edges drawn along the tube.
    pub tube_edges: usize,
    /// Decorative boxes placed.
    pub boxes: usize,
    /// Line segments in total.
    pub segments: usize,
}

/// The finished scene: a line list plus counts.
#[derive(Debug, Clone, Default)]
pub struct SceneGeometry {
    /// Pairs of vertices, one pair per segment.
    pub lines: Vec<LineVertex>,
    /// What went into [`Self::lines`].
    pub stats: SceneStats,
}

impl SceneGeometry {
    fn push_segment(&mut self, [a, b]: [Vec3; 2], color: [f32; 3]) {
        self.lines.push(LineVertex {
            position: a.to_array(),
            color,
        });
        self.lines.push(LineVertex {
            position: b.to_array(),
            color,
        });
    }

    fn extend(&mut self, segments: &[[Vec3; 2]], color: [f32; 3]) {
        self.lines.reserve(segments.len() * 2);
        for &segment in segments {
            self.push_segment(segment, color);
        }
    }

    /// Number of line segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.lines.len() / 2
    }
}

/// Build every enabled layer of the scene around `path`.
pub fn assemble<P: PathProvider + ?Sized>(
    path: &P,
    scene: &SceneOptions,
    display: &DisplayOptions,
) -> SceneGeometry {
    let mut geometry = SceneGeometry::default();

    let tube = tube::build_tube(
        path,
        scene.tubular_segments,
        scene.tube_radius,
        scene.radial_segments,
    );
    geometry.stats.tube_vertices = tube.positions.len();
    geometry.stats.tube_triangles = tube.triangle_count();

    if display.show_tube_edges {
        let edges = edges::feature_edges(&tube, scene.edge_threshold_deg);
        geometry.stats.tube_edges = edges.len();
        geometry.extend(&edges, scene.tube_color);
    }
    if display.show_tube_wireframe {
        geometry.extend(&edges::wireframe_edges(&tube), scene.tube_color);
    }
    if display.show_centerline {
        let points = path.points(scene.centerline_divisions);
        for pair in points.windows(2) {
            geometry.push_segment([pair[0], pair[1]], scene.centerline_color);
        }
    }

    let mut rng = boxes::scatter_rng(scene.seed);
    let placed =
        boxes::scatter_boxes(path, scene.box_count, scene.jitter_bias, &mut rng);
    geometry.stats.boxes = placed.len();

    let cube = boxes::box_mesh(scene.box_size);
    let cube_edges = edges::feature_edges(&cube, scene.edge_threshold_deg);
    let cube_wireframe = edges::wireframe_edges(&cube);
    for b in &placed {
        if display.show_box_edges {
            for &[p, q] in &cube_edges {
                geometry.push_segment([b.transform(p), b.transform(q)], b.color);
            }
        }
        if display.show_box_wireframe {
            for &[p, q] in &cube_wireframe {
                geometry.push_segment(
                    [b.transform(p), b.transform(q)],
                    BOX_WIREFRAME_COLOR,
                );
            }
        }
    }

    geometry.stats.segments = geometry.segment_count();
    geometry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path::wormhole_path;

    fn seeded() -> SceneOptions {
        SceneOptions {
            seed: Some(2024),
            ..SceneOptions::default()
        }
    }

    #[test]
    fn default_layers() {
        let path = wormhole_path().unwrap();
        let geometry = assemble(&path, &seeded(), &DisplayOptions::default());
        let stats = geometry.stats;
        assert_eq!(stats.tube_vertices, 223 * 17);
        assert_eq!(stats.tube_triangles, 222 * 16 * 2);
        assert_eq!(stats.boxes, 55);
        assert!(stats.tube_edges > 0);
        assert_eq!(stats.segments, stats.tube_edges + 55 * 12);
        assert_eq!(geometry.lines.len(), stats.segments * 2);
    }

    #[test]
    fn optional_layers_add_segments() {
        let path = wormhole_path().unwrap();
        let options = seeded();
        let base = assemble(&path, &options, &DisplayOptions::default());
        let display = DisplayOptions {
            show_centerline: true,
            show_box_wireframe: true,
            ..DisplayOptions::default()
        };
        let full = assemble(&path, &options, &display);
        assert_eq!(
            full.segment_count(),
            base.segment_count() + 200 + 55 * 30
        );
        let red = full
            .lines
            .iter()
            .filter(|v| v.color == [1.0, 0.0, 0.0])
            .count();
        assert!(red >= 400);
    }

    #[test]
    fn seeded_scene_is_reproducible() {
        let path = wormhole_path().unwrap();
        let a = assemble(&path, &seeded(), &DisplayOptions::default());
        let b = assemble(&path, &seeded(), &DisplayOptions::default());
        assert_eq!(a.lines, b.lines);
    }

    #[test]
    fn everything_off_leaves_nothing_to_draw() {
        let path = wormhole_path().unwrap();
        let display = DisplayOptions {
            show_tube_edges: false,
            show_box_edges: false,
            ..DisplayOptions::default()
        };
        let geometry = assemble(&path, &seeded(), &display);
        assert!(geometry.lines.is_empty());
        assert_eq!(geometry.stats.boxes, 55);
    }

    #[test]
    fn line_vertex_layout() {
        assert_eq!(size_of::<LineVertex>(), 24);
    }
}
