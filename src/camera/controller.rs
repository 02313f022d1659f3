use wgpu::util::DeviceExt;

use crate::camera::core::{Camera, CameraUniform};
use crate::camera::follower::CameraPose;
use crate::gpu::render_context::RenderContext;
use crate::options::{CameraOptions, PostProcessingOptions};

/// Owns the fly-through camera and its GPU uniform.
pub struct CameraController {
    /// The camera driven by the path follower.
    pub camera: Camera,
    /// CPU copy of the uniform.
    pub uniform: CameraUniform,
    /// Uniform buffer bound at group 0 of the line pipeline.
    pub buffer: wgpu::Buffer,
    /// Layout of [`Self::bind_group`].
    pub layout: wgpu::BindGroupLayout,
    /// Bind group exposing [`Self::buffer`].
    pub bind_group: wgpu::BindGroup,
}

impl CameraController {
    /// Create the camera and upload its initial uniform.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        camera_options: &CameraOptions,
        post_options: &PostProcessingOptions,
    ) -> Self {
        let aspect = aspect_ratio(context.config.width, context.config.height);
        let camera = Camera::new(camera_options, aspect);

        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&camera);
        uniform.set_fog(post_options);

        let buffer = context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Camera Buffer"),
                contents: bytemuck::cast_slice(&[uniform]),
                usage: wgpu::BufferUsages::UNIFORM
                    | wgpu::BufferUsages::COPY_DST,
            },
        );

        let layout = context.device.create_bind_group_layout(
            &wgpu::BindGroupLayoutDescriptor {
                label: Some("Camera Bind Group Layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX
                        | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
            },
        );

        let bind_group =
            context.device.create_bind_group(&wgpu::BindGroupDescriptor {
                layout: &layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: buffer.as_entire_binding(),
                }],
                label: Some("Camera Bind Group"),
            });

        Self {
            camera,
            uniform,
            buffer,
            layout,
            bind_group,
        }
    }

    /// Move the eye and target to the follower's pose.
    pub fn apply_pose(&mut self, pose: &CameraPose) {
        self.camera.eye = pose.position;
        self.camera.target = pose.look_at;
    }

    /// Upload the current camera state.
    pub fn update_gpu(&mut self, queue: &wgpu::Queue) {
        self.uniform.update_view_proj(&self.camera);
        queue.write_buffer(
            &self.buffer,
            0,
            bytemuck::cast_slice(&[self.uniform]),
        );
    }

    /// Update the aspect ratio for a new viewport size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.aspect = aspect_ratio(width, height);
    }
}

fn aspect_ratio(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
