//! Read-only queries and live option updates for [`FlythroughEngine`].

use super::FlythroughEngine;
use crate::camera::follower::CameraPose;
use crate::error::WormholeError;
use crate::options::{Options, PostProcessingOptions};
use crate::path::CatmullRomCurve;
use crate::scene::SceneStats;

// ── Queries ──

impl FlythroughEngine {
    /// The options the engine was built with.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Counts describing the assembled scene.
    #[must_use]
    pub fn scene_stats(&self) -> SceneStats {
        self.stats
    }

    /// The pose applied by the last [`update`](Self::update).
    #[must_use]
    pub fn pose(&self) -> &CameraPose {
        &self.pose
    }

    /// The curve the camera follows.
    #[must_use]
    pub fn path(&self) -> &CatmullRomCurve {
        &self.path
    }

    /// Smoothed frames per second.
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.frame_timing.fps()
    }

    /// Surface size in pixels.
    #[must_use]
    pub fn size(&self) -> (u32, u32) {
        (self.context.width(), self.context.height())
    }
}

// ── Live updates ──

impl FlythroughEngine {
    /// Replace fog, bloom and exposure settings without rebuilding the scene.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::InvalidOptions`] if the new values do not
    /// validate. The previous settings stay active in that case.
    pub fn set_post_processing(
        &mut self,
        post_processing: PostProcessingOptions,
    ) -> Result<(), WormholeError> {
        let mut next = self.options.clone();
        next.post_processing = post_processing;
        next.validate()?;

        self.post_process
            .apply_options(&next.post_processing, &self.context.queue);
        self.camera_controller
            .uniform
            .set_fog(&next.post_processing);
        self.camera_controller.update_gpu(&self.context.queue);
        self.options = next;
        Ok(())
    }
}
