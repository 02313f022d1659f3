//! Bloom post-processing pass: extracts bright pixels and creates a soft
//! glow.
//!
//! Pipeline: luminance high-pass at half resolution → five progressively
//! smaller levels, each blurred with a separable Gaussian whose radius grows
//! with the level → weighted combine of all levels into one half-resolution
//! texture. The composite pass adds that texture to the scene before tone
//! mapping.

use wgpu::util::DeviceExt;

use super::screen_pass::ScreenPass;
use crate::error::WormholeError;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, draw_fullscreen, filtering_sampler,
    linear_sampler, render_texture, texture_2d, uniform_buffer, HDR_FORMAT,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::options::PostProcessingOptions;

/// Number of blur levels in the bloom chain.
pub const BLOOM_LEVELS: usize = 5;

/// Gaussian kernel radius (and sigma) per level, in texels of that level.
const KERNEL_RADII: [u32; BLOOM_LEVELS] = [3, 5, 7, 9, 11];

/// Base contribution of each level before the radius remap.
const LEVEL_FACTORS: [f32; BLOOM_LEVELS] = [1.0, 0.8, 0.6, 0.4, 0.2];

/// Width of the smoothstep above the luminance threshold.
const SMOOTH_WIDTH: f32 = 0.01;

/// Per-level combine weights with strength applied.
///
/// `radius` in `[0, 1]` shifts weight from the sharp levels toward the wide
/// ones: each factor `f` becomes `mix(f, 1.2 - f, radius)`.
#[must_use]
pub fn bloom_weights(strength: f32, radius: f32) -> [f32; BLOOM_LEVELS] {
    LEVEL_FACTORS.map(|f| strength * (f + (1.2 - f - f) * radius))
}

/// Size of each blur level: half the render size, then halved again per
/// level. Never smaller than one texel.
#[must_use]
pub fn level_sizes(width: u32, height: u32) -> [(u32, u32); BLOOM_LEVELS] {
    let mut sizes = [(1, 1); BLOOM_LEVELS];
    let mut w = width;
    let mut h = height;
    for size in &mut sizes {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        *size = (w, h);
    }
    sizes
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct ThresholdParams {
    threshold: f32,
    smooth_width: f32,
    _pad: [f32; 2],
}

/// Blur direction params, must match WGSL struct.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct BlurParams {
    texel_size: [f32; 2],
    direction: [f32; 2],
    kernel_radius: u32,
    sigma: f32,
    _pad: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct CombineParams {
    weights: [f32; 4],
    last_weight: f32,
    _pad: [f32; 3],
}

impl CombineParams {
    fn new(strength: f32, radius: f32) -> Self {
        let w = bloom_weights(strength, radius);
        Self {
            weights: [w[0], w[1], w[2], w[3]],
            last_weight: w[4],
            _pad: [0.0; 3],
        }
    }
}

/// Textures and bind groups for one blur level.
struct BloomLevel {
    _horizontal_texture: wgpu::Texture,
    horizontal_view: wgpu::TextureView,
    _vertical_texture: wgpu::Texture,
    vertical_view: wgpu::TextureView,
    // [0 = horizontal, 1 = vertical]
    bind_groups: [wgpu::BindGroup; 2],
}

/// Multi-level bloom.
pub struct BloomPass {
    threshold_pipeline: wgpu::RenderPipeline,
    threshold_layout: wgpu::BindGroupLayout,
    threshold_bind_group: wgpu::BindGroup,
    threshold_buffer: wgpu::Buffer,

    blur_pipeline: wgpu::RenderPipeline,
    blur_layout: wgpu::BindGroupLayout,

    combine_pipeline: wgpu::RenderPipeline,
    combine_layout: wgpu::BindGroupLayout,
    combine_bind_group: wgpu::BindGroup,
    combine_buffer: wgpu::Buffer,

    _bright_texture: wgpu::Texture,
    bright_view: wgpu::TextureView,
    levels: Vec<BloomLevel>,

    /// Combined bloom (half resolution), sampled by the composite pass.
    pub output_texture: wgpu::Texture,
    /// View into [`Self::output_texture`].
    pub output_view: wgpu::TextureView,

    sampler: wgpu::Sampler,
    input_view: wgpu::TextureView,

    /// Luminance below which pixels do not bloom.
    pub threshold: f32,
    /// Overall bloom multiplier. Zero disables the pass.
    pub strength: f32,
    /// Spread of the glow, `[0, 1]`.
    pub radius: f32,
    width: u32,
    height: u32,
}

impl BloomPass {
    /// Create the pass reading from the HDR scene color `input_view`.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if a bloom shader fails to compose.
    pub fn new(
        context: &RenderContext,
        input_view: &wgpu::TextureView,
        options: &PostProcessingOptions,
        shader_composer: &mut ShaderComposer,
    ) -> Result<Self, WormholeError> {
        let device = &context.device;
        let width = context.width();
        let height = context.height();
        let sampler = linear_sampler(device, "Bloom Sampler");

        let threshold_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Threshold Buffer"),
                contents: bytemuck::cast_slice(&[ThresholdParams {
                    threshold: options.bloom_threshold,
                    smooth_width: SMOOTH_WIDTH,
                    _pad: [0.0; 2],
                }]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });
        let combine_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Bloom Combine Buffer"),
                contents: bytemuck::cast_slice(&[CombineParams::new(
                    options.bloom_strength,
                    options.bloom_radius,
                )]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            });

        // Threshold and blur share the same layout shape: texture, sampler,
        // params.
        let threshold_layout = Self::create_source_layout(device, "Threshold");
        let blur_layout = Self::create_source_layout(device, "Blur");
        let combine_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Bloom Combine Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    texture_2d(2),
                    texture_2d(3),
                    texture_2d(4),
                    filtering_sampler(5),
                    uniform_buffer(6),
                ],
            });

        let threshold_shader = shader_composer.compose(
            device,
            "Bloom Threshold Shader",
            "screen/bloom_threshold.wgsl",
        )?;
        let blur_shader = shader_composer.compose(
            device,
            "Bloom Blur Shader",
            "screen/bloom_blur.wgsl",
        )?;
        let combine_shader = shader_composer.compose(
            device,
            "Bloom Combine Shader",
            "screen/bloom_combine.wgsl",
        )?;

        let threshold_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Threshold",
            &threshold_shader,
            HDR_FORMAT,
            None,
            &[&threshold_layout],
        );
        let blur_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Blur",
            &blur_shader,
            HDR_FORMAT,
            None,
            &[&blur_layout],
        );
        let combine_pipeline = create_screen_space_pipeline(
            device,
            "Bloom Combine",
            &combine_shader,
            HDR_FORMAT,
            None,
            &[&combine_layout],
        );

        let sizes = level_sizes(width, height);
        let (bright_texture, bright_view) =
            render_texture(device, "Bloom Bright", sizes[0].0, sizes[0].1);
        let (output_texture, output_view) =
            render_texture(device, "Bloom Output", sizes[0].0, sizes[0].1);
        let threshold_bind_group = Self::create_source_bind_group(
            device,
            "Bloom Threshold Bind Group",
            &threshold_layout,
            input_view,
            &sampler,
            &threshold_buffer,
        );
        let levels = Self::create_levels(
            device,
            &blur_layout,
            &bright_view,
            &sampler,
            &sizes,
        );
        let combine_bind_group = Self::create_combine_bind_group(
            device,
            &combine_layout,
            &levels,
            &sampler,
            &combine_buffer,
        );

        Ok(Self {
            threshold_pipeline,
            threshold_layout,
            threshold_bind_group,
            threshold_buffer,
            blur_pipeline,
            blur_layout,
            combine_pipeline,
            combine_layout,
            combine_bind_group,
            combine_buffer,
            _bright_texture: bright_texture,
            bright_view,
            levels,
            output_texture,
            output_view,
            sampler,
            input_view: input_view.clone(),
            threshold: options.bloom_threshold,
            strength: options.bloom_strength,
            radius: options.bloom_radius,
            width,
            height,
        })
    }

    fn create_source_layout(
        device: &wgpu::Device,
        name: &str,
    ) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some(&format!("Bloom {name} Layout")),
            entries: &[texture_2d(0), filtering_sampler(1), uniform_buffer(2)],
        })
    }

    fn create_source_bind_group(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        source: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        params: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(source),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: params.as_entire_binding(),
                },
            ],
        })
    }

    fn blur_params_buffer(
        device: &wgpu::Device,
        label: &str,
        (w, h): (u32, u32),
        direction: [f32; 2],
        kernel_radius: u32,
    ) -> wgpu::Buffer {
        let params = BlurParams {
            texel_size: [1.0 / w as f32, 1.0 / h as f32],
            direction,
            kernel_radius,
            sigma: kernel_radius as f32,
            _pad: [0.0; 2],
        };
        device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&[params]),
            usage: wgpu::BufferUsages::UNIFORM,
        })
    }

    /// Level `i` blurs horizontally from the previous level's vertical
    /// output (or the bright-pass texture for level 0), then vertically
    /// back into its own vertical texture.
    fn create_levels(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        bright_view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
        sizes: &[(u32, u32); BLOOM_LEVELS],
    ) -> Vec<BloomLevel> {
        let mut levels: Vec<BloomLevel> = Vec::with_capacity(BLOOM_LEVELS);
        for (i, &size) in sizes.iter().enumerate() {
            let (horizontal_texture, horizontal_view) = render_texture(
                device,
                &format!("Bloom Level {i} H"),
                size.0,
                size.1,
            );
            let (vertical_texture, vertical_view) = render_texture(
                device,
                &format!("Bloom Level {i} V"),
                size.0,
                size.1,
            );

            let source = levels.last().map_or(bright_view, |prev| {
                &prev.vertical_view
            });
            let h_buffer = Self::blur_params_buffer(
                device,
                &format!("Bloom Blur H Params {i}"),
                size,
                [1.0, 0.0],
                KERNEL_RADII[i],
            );
            let v_buffer = Self::blur_params_buffer(
                device,
                &format!("Bloom Blur V Params {i}"),
                size,
                [0.0, 1.0],
                KERNEL_RADII[i],
            );
            let h_bind_group = Self::create_source_bind_group(
                device,
                &format!("Bloom Blur H BG {i}"),
                layout,
                source,
                sampler,
                &h_buffer,
            );
            let v_bind_group = Self::create_source_bind_group(
                device,
                &format!("Bloom Blur V BG {i}"),
                layout,
                &horizontal_view,
                sampler,
                &v_buffer,
            );

            levels.push(BloomLevel {
                _horizontal_texture: horizontal_texture,
                horizontal_view,
                _vertical_texture: vertical_texture,
                vertical_view,
                bind_groups: [h_bind_group, v_bind_group],
            });
        }
        levels
    }

    fn create_combine_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        levels: &[BloomLevel],
        sampler: &wgpu::Sampler,
        params: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        let mut entries: Vec<wgpu::BindGroupEntry> = levels
            .iter()
            .enumerate()
            .map(|(i, level)| wgpu::BindGroupEntry {
                binding: i as u32,
                resource: wgpu::BindingResource::TextureView(
                    &level.vertical_view,
                ),
            })
            .collect();
        entries.push(wgpu::BindGroupEntry {
            binding: BLOOM_LEVELS as u32,
            resource: wgpu::BindingResource::Sampler(sampler),
        });
        entries.push(wgpu::BindGroupEntry {
            binding: BLOOM_LEVELS as u32 + 1,
            resource: params.as_entire_binding(),
        });
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bloom Combine Bind Group"),
            layout,
            entries: &entries,
        })
    }

    /// Whether the pass contributes anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.strength > 0.0
    }

    /// Point the threshold pass at a new scene color view. Call before
    /// [`ScreenPass::resize`].
    pub fn set_input_view(&mut self, view: &wgpu::TextureView) {
        self.input_view = view.clone();
    }

    /// Push threshold, strength and radius to the GPU.
    pub fn update_params(&self, queue: &wgpu::Queue) {
        queue.write_buffer(
            &self.threshold_buffer,
            0,
            bytemuck::cast_slice(&[ThresholdParams {
                threshold: self.threshold,
                smooth_width: SMOOTH_WIDTH,
                _pad: [0.0; 2],
            }]),
        );
        queue.write_buffer(
            &self.combine_buffer,
            0,
            bytemuck::cast_slice(&[CombineParams::new(
                self.strength,
                self.radius,
            )]),
        );
    }
}

impl ScreenPass for BloomPass {
    /// Threshold → blur each level → combine into the output texture.
    fn render(&self, encoder: &mut wgpu::CommandEncoder) {
        if !self.is_enabled() {
            return;
        }

        draw_fullscreen(
            encoder,
            "Bloom Threshold",
            &self.bright_view,
            &self.threshold_pipeline,
            &self.threshold_bind_group,
        );

        for level in &self.levels {
            draw_fullscreen(
                encoder,
                "Bloom Blur H",
                &level.horizontal_view,
                &self.blur_pipeline,
                &level.bind_groups[0],
            );
            draw_fullscreen(
                encoder,
                "Bloom Blur V",
                &level.vertical_view,
                &self.blur_pipeline,
                &level.bind_groups[1],
            );
        }

        draw_fullscreen(
            encoder,
            "Bloom Combine",
            &self.output_view,
            &self.combine_pipeline,
            &self.combine_bind_group,
        );
    }

    fn resize(&mut self, context: &RenderContext) {
        let device = &context.device;
        self.threshold_bind_group = Self::create_source_bind_group(
            device,
            "Bloom Threshold Bind Group",
            &self.threshold_layout,
            &self.input_view,
            &self.sampler,
            &self.threshold_buffer,
        );

        let width = context.width();
        let height = context.height();
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;

        let sizes = level_sizes(width, height);
        let (bright_texture, bright_view) =
            render_texture(device, "Bloom Bright", sizes[0].0, sizes[0].1);
        let (output_texture, output_view) =
            render_texture(device, "Bloom Output", sizes[0].0, sizes[0].1);
        self.levels = Self::create_levels(
            device,
            &self.blur_layout,
            &bright_view,
            &self.sampler,
            &sizes,
        );
        self.combine_bind_group = Self::create_combine_bind_group(
            device,
            &self.combine_layout,
            &self.levels,
            &self.sampler,
            &self.combine_buffer,
        );
        self._bright_texture = bright_texture;
        self.bright_view = bright_view;
        self.output_texture = output_texture;
        self.output_view = output_view;
    }
}
