use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Scene", inline)]
#[serde(default)]
/// Tube and decoration geometry, fixed at startup.
pub struct SceneOptions {
    /// Rings along the tube.
    #[schemars(title = "Tube Segments", range(min = 16, max = 1024))]
    pub tubular_segments: usize,
    /// Vertices around each tube ring.
    #[schemars(title = "Radial Segments", range(min = 3, max = 64))]
    pub radial_segments: usize,
    /// Tube radius in world units.
    #[schemars(title = "Tube Radius", range(min = 0.1, max = 2.0), extend("step" = 0.05))]
    pub tube_radius: f32,
    /// Minimum angle in degrees between adjacent faces for their shared
    /// edge to be drawn.
    #[schemars(title = "Edge Threshold", range(min = 0.0, max = 90.0), extend("step" = 0.1))]
    pub edge_threshold_deg: f32,
    /// Samples in the optional centerline.
    #[schemars(skip)]
    pub centerline_divisions: usize,
    /// Number of scattered boxes.
    #[schemars(title = "Box Count", range(min = 0, max = 500))]
    pub box_count: usize,
    /// Box edge length.
    #[schemars(title = "Box Size", range(min = 0.01, max = 0.5), extend("step" = 0.005))]
    pub box_size: f32,
    /// Offset subtracted from the uniform `[0, 1)` jitter on the X and Z
    /// axes. `0.5` centers the scatter on the path.
    #[schemars(skip)]
    pub jitter_bias: f32,
    /// Seed for box placement. `None` draws a fresh layout every run.
    #[schemars(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Color of the tube edge lines.
    #[schemars(skip)]
    pub tube_color: [f32; 3],
    /// Color of the centerline.
    #[schemars(skip)]
    pub centerline_color: [f32; 3],
}

impl Default for SceneOptions {
    fn default() -> Self {
        Self {
            tubular_segments: 222,
            radial_segments: 16,
            tube_radius: 0.6,
            edge_threshold_deg: 0.2,
            centerline_divisions: 200,
            box_count: 55,
            box_size: 0.075,
            jitter_bias: 0.4,
            seed: None,
            tube_color: [1.0, 1.0, 1.0],
            centerline_color: [1.0, 0.0, 0.0],
        }
    }
}
