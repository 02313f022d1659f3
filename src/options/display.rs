use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Display", inline)]
#[serde(default)]
/// Which line layers are drawn.
pub struct DisplayOptions {
    /// Feature edges of the tube.
    #[schemars(title = "Tube Edges")]
    pub show_tube_edges: bool,
    /// Every triangle edge of the tube.
    #[schemars(title = "Tube Wireframe")]
    pub show_tube_wireframe: bool,
    /// The sampled path itself.
    #[schemars(title = "Centerline")]
    pub show_centerline: bool,
    /// Colored outlines of the scattered boxes.
    #[schemars(title = "Box Edges")]
    pub show_box_edges: bool,
    /// White triangle wireframe of the scattered boxes.
    #[schemars(title = "Box Wireframe")]
    pub show_box_wireframe: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_tube_edges: true,
            show_tube_wireframe: false,
            show_centerline: false,
            show_box_edges: true,
            show_box_wireframe: false,
        }
    }
}
