use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::camera::follower::FollowerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Flight", inline)]
#[serde(default)]
/// How fast the camera travels around the loop.
pub struct FlightOptions {
    /// Multiplier applied to elapsed wall-clock time.
    #[schemars(title = "Speed", range(min = 0.0, max = 3.0), extend("step" = 0.05))]
    pub speed_factor: f64,
    /// Scaled milliseconds per full traversal of the loop.
    #[schemars(title = "Loop Duration (ms)", range(min = 1000.0, max = 120000.0), extend("step" = 500.0))]
    pub loop_duration_ms: f64,
    /// Path fraction between the camera and the point it looks at.
    #[schemars(title = "Look Ahead", range(min = 0.001, max = 0.1), extend("step" = 0.001))]
    pub look_ahead: f32,
}

impl Default for FlightOptions {
    fn default() -> Self {
        let config = FollowerConfig::default();
        Self {
            speed_factor: config.speed_factor,
            loop_duration_ms: config.loop_duration_ms,
            look_ahead: config.look_ahead,
        }
    }
}

impl FlightOptions {
    /// Follower configuration for these options (not yet validated).
    #[must_use]
    pub fn follower_config(&self) -> FollowerConfig {
        FollowerConfig {
            speed_factor: self.speed_factor,
            loop_duration_ms: self.loop_duration_ms,
            look_ahead: self.look_ahead,
        }
    }
}
