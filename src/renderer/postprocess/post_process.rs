use super::bloom::BloomPass;
use super::composite::CompositePass;
use super::screen_pass::ScreenPass;
use crate::error::WormholeError;
use crate::gpu::pipeline_helpers::render_texture;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::PostProcessingOptions;
use crate::renderer::pipeline_util::DEPTH_FORMAT;

/// Owns the offscreen scene targets and the bloom and composite passes.
pub(crate) struct PostProcessStack {
    _scene_texture: wgpu::Texture,
    pub scene_view: wgpu::TextureView,
    _depth_texture: wgpu::Texture,
    pub depth_view: wgpu::TextureView,
    pub bloom_pass: BloomPass,
    pub composite_pass: CompositePass,
}

impl PostProcessStack {
    /// Build the scene targets and all passes.
    pub fn new(
        context: &RenderContext,
        shader_composer: &mut ShaderComposer,
        options: &PostProcessingOptions,
    ) -> Result<Self, WormholeError> {
        let (scene_texture, scene_view) = Self::create_scene_texture(context);
        let (depth_texture, depth_view) = Self::create_depth_texture(context);

        let bloom_pass =
            BloomPass::new(context, &scene_view, options, shader_composer)?;
        let mut composite_pass = CompositePass::new(
            context,
            &scene_view,
            &bloom_pass.output_view,
            shader_composer,
        )?;
        composite_pass.params.exposure = options.exposure;
        composite_pass.params.bloom_enabled =
            if bloom_pass.is_enabled() { 1.0 } else { 0.0 };
        composite_pass.flush_params(&context.queue);

        log::debug!(
            "post-processing ready: gamma {:.3}, bloom {}",
            composite_pass.params.gamma,
            if bloom_pass.is_enabled() { "on" } else { "off" }
        );

        Ok(Self {
            _scene_texture: scene_texture,
            scene_view,
            _depth_texture: depth_texture,
            depth_view,
            bloom_pass,
            composite_pass,
        })
    }

    /// Recreate all resolution-dependent resources.
    pub fn resize(&mut self, context: &RenderContext) {
        let (scene_texture, scene_view) = Self::create_scene_texture(context);
        self._scene_texture = scene_texture;
        self.scene_view = scene_view;
        let (depth_texture, depth_view) = Self::create_depth_texture(context);
        self._depth_texture = depth_texture;
        self.depth_view = depth_view;

        self.bloom_pass.set_input_view(&self.scene_view);
        self.bloom_pass.resize(context);
        self.composite_pass
            .set_external_views(&self.scene_view, &self.bloom_pass.output_view);
        self.composite_pass.resize(context);
    }

    /// Run bloom then composite into `final_view`.
    pub fn render(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        final_view: &wgpu::TextureView,
    ) {
        self.bloom_pass.render(encoder);
        self.composite_pass.set_output_view(final_view);
        self.composite_pass.render(encoder);
    }

    /// Push post-processing option values to GPU.
    pub fn apply_options(
        &mut self,
        options: &PostProcessingOptions,
        queue: &wgpu::Queue,
    ) {
        self.bloom_pass.threshold = options.bloom_threshold;
        self.bloom_pass.strength = options.bloom_strength;
        self.bloom_pass.radius = options.bloom_radius;
        self.bloom_pass.update_params(queue);

        self.composite_pass.params.exposure = options.exposure;
        self.composite_pass.params.bloom_enabled =
            if self.bloom_pass.is_enabled() { 1.0 } else { 0.0 };
        self.composite_pass.flush_params(queue);
    }

    fn create_scene_texture(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        render_texture(
            &context.device,
            "Scene Color Texture",
            context.width(),
            context.height(),
        )
    }

    fn create_depth_texture(
        context: &RenderContext,
    ) -> (wgpu::Texture, wgpu::TextureView) {
        let texture = context.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Depth Texture"),
            size: wgpu::Extent3d {
                width: context.width().max(1),
                height: context.height().max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        (texture, view)
    }
}
