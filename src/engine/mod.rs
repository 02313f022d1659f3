//! The fly-through application context.
//!
//! [`FlythroughEngine`] owns everything built at startup (path, scene lines,
//! GPU passes) plus the per-frame state derived from elapsed time. The
//! viewer drives it with [`update`](FlythroughEngine::update) then
//! [`render`](FlythroughEngine::render) once per redraw.

mod accessors;

use crate::camera::controller::CameraController;
use crate::camera::follower::{CameraPathFollower, CameraPose};
use crate::error::WormholeError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::Options;
use crate::path::{wormhole_path, CatmullRomCurve};
use crate::renderer::lines::LineRenderer;
use crate::renderer::postprocess::post_process::PostProcessStack;
use crate::scene::{self, SceneStats};
use crate::util::frame_timing::FrameTiming;

/// Renders the wormhole scene from a camera that follows the path.
pub struct FlythroughEngine {
    context: RenderContext,
    camera_controller: CameraController,
    line_renderer: LineRenderer,
    post_process: PostProcessStack,
    path: CatmullRomCurve,
    follower: CameraPathFollower,
    pose: CameraPose,
    stats: SceneStats,
    options: Options,
    frame_timing: FrameTiming,
}

impl FlythroughEngine {
    /// Validate `options`, assemble the scene and create every GPU resource.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::InvalidOptions`] for unusable options,
    /// [`WormholeError::Path`] if the wormhole curve cannot be built,
    /// [`WormholeError::Gpu`] if the surface or device cannot be created and
    /// [`WormholeError::Shader`] if a shader fails to compose.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, WormholeError> {
        options.validate()?;

        let path = wormhole_path()?;
        let follower =
            CameraPathFollower::new(options.flight.follower_config())?;
        let geometry = scene::assemble(&path, &options.scene, &options.display);
        let stats = geometry.stats;
        log::info!(
            "scene: {} tube vertices, {} tube triangles, {} tube edges, {} boxes, {} line segments",
            stats.tube_vertices,
            stats.tube_triangles,
            stats.tube_edges,
            stats.boxes,
            stats.segments,
        );
        if let Some(period) = follower.period_ms() {
            log::info!("one lap every {:.1} s", period / 1000.0);
        } else {
            log::info!("speed factor is zero, the camera will not move");
        }

        let context = RenderContext::new(window, size).await?;
        let mut shader_composer = ShaderComposer::new()?;

        let mut camera_controller = CameraController::new(
            &context,
            &options.camera,
            &options.post_processing,
        );
        let line_renderer = LineRenderer::new(
            &context,
            &mut shader_composer,
            &camera_controller.layout,
            &geometry,
        )?;
        log::debug!(
            "uploaded {} line vertices",
            line_renderer.vertex_count()
        );
        let post_process = PostProcessStack::new(
            &context,
            &mut shader_composer,
            &options.post_processing,
        )?;

        let pose = follower.pose(&path, 0.0);
        camera_controller.apply_pose(&pose);
        camera_controller.update_gpu(&context.queue);

        Ok(Self {
            context,
            camera_controller,
            line_renderer,
            post_process,
            path,
            follower,
            pose,
            stats,
            options,
            frame_timing: FrameTiming::new(),
        })
    }

    /// Move the camera to where it should be `elapsed_ms` into the flight.
    pub fn update(&mut self, elapsed_ms: f64) {
        self.pose = self.follower.pose(&self.path, elapsed_ms);
        self.camera_controller.apply_pose(&self.pose);
        self.camera_controller.update_gpu(&self.context.queue);
    }

    /// Draw one frame: lines into the HDR target, then bloom and composite
    /// into the swapchain.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the next swapchain texture cannot be
    /// acquired. `Lost` and `Outdated` are fixed by calling
    /// [`resize`](Self::resize).
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        self.line_renderer.render(
            &mut encoder,
            &self.post_process.scene_view,
            &self.post_process.depth_view,
            &self.camera_controller.bind_group,
        );
        self.post_process.render(&mut encoder, &view);

        self.context.submit(encoder);
        frame.present();
        self.frame_timing.end_frame();
        Ok(())
    }

    /// Resize the surface and every size-dependent target. Zero-sized
    /// windows (minimized) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
        self.camera_controller.update_gpu(&self.context.queue);
        self.post_process.resize(&self.context);
        log::debug!("resized to {width}x{height}");
    }
}
