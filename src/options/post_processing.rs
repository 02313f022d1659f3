use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Effects", inline)]
#[serde(default)]
/// Fog, bloom and tone mapping parameters.
pub struct PostProcessingOptions {
    /// Luminance above which pixels contribute to bloom.
    #[schemars(title = "Bloom Threshold", range(min = 0.0, max = 1.0), extend("step" = 0.001))]
    pub bloom_threshold: f32,
    /// Bloom contribution multiplier.
    #[schemars(title = "Bloom Strength", range(min = 0.0, max = 5.0), extend("step" = 0.05))]
    pub bloom_strength: f32,
    /// Blend between tight (0) and wide (1) bloom.
    #[schemars(title = "Bloom Radius", range(min = 0.0, max = 1.0), extend("step" = 0.01))]
    pub bloom_radius: f32,
    /// Exposure multiplier applied before tone mapping.
    #[schemars(title = "Exposure", range(min = 0.1, max = 3.0), extend("step" = 0.05))]
    pub exposure: f32,
    /// Density of the exponential-squared fog.
    #[schemars(title = "Fog Density", range(min = 0.0, max = 2.0), extend("step" = 0.01))]
    pub fog_density: f32,
    /// Fog and background color.
    #[schemars(skip)]
    pub fog_color: [f32; 3],
}

impl Default for PostProcessingOptions {
    fn default() -> Self {
        Self {
            bloom_threshold: 0.002,
            bloom_strength: 3.5,
            bloom_radius: 0.0,
            exposure: 1.0,
            fog_density: 0.9,
            fog_color: [0.0, 0.0, 0.0],
        }
    }
}
