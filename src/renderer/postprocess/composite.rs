//! Composite pass: adds bloom to the scene, applies exposure and ACES filmic
//! tone mapping, and writes the display-ready image to the swapchain.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::error::WormholeError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler,
    texture_2d, uniform_buffer,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;

/// Parameters for the composite pass.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CompositeParams {
    /// Exposure multiplier for tone mapping.
    pub exposure: f32,
    /// Gamma correction exponent.
    pub gamma: f32,
    /// 1.0 to add the bloom texture, 0.0 to ignore it.
    pub bloom_enabled: f32,
    /// Padding for GPU alignment.
    pub _pad: f32,
}

impl Default for CompositeParams {
    fn default() -> Self {
        Self {
            exposure: 1.0,
            gamma: 1.0,
            bloom_enabled: 1.0,
            _pad: 0.0,
        }
    }
}

/// Gamma exponent for a surface format: sRGB surfaces encode in hardware.
#[must_use]
pub fn output_gamma(format: wgpu::TextureFormat) -> f32 {
    if format.is_srgb() {
        1.0
    } else {
        1.0 / 2.2
    }
}

/// Composite pass renderer.
pub struct CompositePass {
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,

    /// Output view (swapchain texture), set before render.
    output_view: Option<wgpu::TextureView>,
    /// Stored scene color view for bind group recreation on resize.
    scene_view: wgpu::TextureView,
    /// Stored bloom view for bind group recreation on resize.
    bloom_view: wgpu::TextureView,

    /// Tone-mapping parameters.
    pub params: CompositeParams,
    params_buffer: wgpu::Buffer,
}

impl CompositePass {
    /// Create a composite pass sampling `scene_view` and `bloom_view`.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if the composite shader fails to
    /// compose.
    pub fn new(
        context: &RenderContext,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, WormholeError> {
        let sampler = linear_sampler(&context.device, "Composite Sampler");

        let params = CompositeParams {
            gamma: output_gamma(context.format()),
            ..Default::default()
        };
        let params_buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Composite Params Buffer"),
                contents: bytemuck::cast_slice(&[params]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let bind_group_layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Composite Bind Group Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    filtering_sampler(2),
                    uniform_buffer(3),
                ],
            },
        );

        let shader = shader_composer.compose(
            &context.device,
            "Composite Shader",
            "screen/composite.wgsl",
        )?;
        let pipeline = create_screen_space_pipeline(
            &context.device,
            "Composite",
            &shader,
            context.format(),
            None,
            &[&bind_group_layout],
        );

        let bind_group = Self::create_bind_group(
            context,
            &bind_group_layout,
            scene_view,
            bloom_view,
            &sampler,
            &params_buffer,
        );

        Ok(Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            output_view: None,
            scene_view: scene_view.clone(),
            bloom_view: bloom_view.clone(),
            params,
            params_buffer,
        })
    }

    fn create_bind_group(
        context: &RenderContext,
        layout: &wgpu::BindGroupLayout,
        scene_view: &wgpu::TextureView,
        bloom_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params_buffer: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        context
            .device
            .create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some("Composite Bind Group"),
                layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(
                            scene_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(
                            bloom_view,
                        ),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::Sampler(sampler),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: params_buffer.as_entire_binding(),
                    },
                ],
            })
    }

    /// Set the output view (swapchain texture) for this frame.
    pub fn set_output_view(&mut self, view: &wgpu::TextureView) {
        self.output_view = Some(view.clone());
    }

    /// Update the external texture views used in bind group recreation.
    pub fn set_external_views(
        &mut self,
        scene: &wgpu::TextureView,
        bloom: &wgpu::TextureView,
    ) {
        self.scene_view = scene.clone();
        self.bloom_view = bloom.clone();
    }

    /// Flush the current params to the GPU buffer.
    pub fn flush_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.params_buffer,
            0,
            bytemuck::cast_slice(&[self.params]),
        );
    }
}

impl ScreenPass for CompositePass {
    fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        let Some(output_view) = &self.output_view else {
            return;
        };
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Composite Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn resize(&mut self, context: &RenderContext) {
        // Textures are owned upstream; only the bind group goes stale.
        self.bind_group = Self::create_bind_group(
            context,
            &self.bind_group_layout,
            &self.scene_view,
            &self.bloom_view,
            &self.sampler,
            &self.params_buffer,
        );
    }
}
