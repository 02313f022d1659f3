use glam::{Mat4, Vec3};

use crate::options::{CameraOptions, PostProcessingOptions};

/// Squared sine of the smallest angle between view direction and `up` that
/// still gives a usable view basis.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Perspective camera defined by eye position, target, and projection
/// parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
/// GPU uniform buffer holding the view-projection matrix, camera metadata
/// and the fog that depends on view depth.
pub struct CameraUniform {
    /// Combined view-projection matrix.
    pub view_proj: [[f32; 4]; 4],
    /// Camera world-space position.
    pub position: [f32; 3],
    /// Viewport aspect ratio.
    pub aspect: f32,
    /// Unit vector from eye toward target.
    pub forward: [f32; 3],
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Linear RGB fog color.
    pub fog_color: [f32; 3],
    /// Exponential-squared fog density.
    pub fog_density: f32,
}

impl Camera {
    /// Camera at the origin looking down -Z with the given projection.
    #[must_use]
    pub fn new(options: &CameraOptions, aspect: f32) -> Self {
        Self {
            eye: Vec3::ZERO,
            target: Vec3::NEG_Z,
            up: Vec3::Y,
            aspect,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn build_matrix(&self) -> Mat4 {
        let forward = self.forward();
        let view =
            Mat4::look_to_rh(self.eye, forward, self.view_up(forward));
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Unit view direction. Falls back to -Z when eye and target coincide.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).try_normalize().unwrap_or(Vec3::NEG_Z)
    }

    /// `up`, or a substitute axis when `forward` is (nearly) parallel to it.
    fn view_up(&self, forward: Vec3) -> Vec3 {
        if forward.cross(self.up).length_squared() > PARALLEL_EPSILON {
            self.up
        } else if forward.z.abs() < 0.9 {
            Vec3::Z
        } else {
            Vec3::X
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity view-projection and no fog.
    #[must_use]
    pub fn new() -> Self {
        Self {
            view_proj: Mat4::IDENTITY.to_cols_array_2d(),
            position: [0.0; 3],
            aspect: 1.6,
            forward: [0.0, 0.0, -1.0],
            fovy: 75.0,
            fog_color: [0.0; 3],
            fog_density: 0.0,
        }
    }

    /// Update uniform fields from the given camera's current state.
    pub fn update_view_proj(&mut self, camera: &Camera) {
        self.view_proj = camera.build_matrix().to_cols_array_2d();
        self.position = camera.eye.to_array();
        self.aspect = camera.aspect;
        self.forward = camera.forward().to_array();
        self.fovy = camera.fovy;
    }

    /// Copy fog parameters from the post-processing options.
    pub fn set_fog(&mut self, options: &PostProcessingOptions) {
        self.fog_color = options.fog_color;
        self.fog_density = options.fog_density;
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec4;

    use super::*;

    fn camera() -> Camera {
        let mut camera = Camera::new(&CameraOptions::default(), 16.0 / 9.0);
        camera.eye = Vec3::new(1.0, 2.0, 3.0);
        camera.target = Vec3::new(1.0, 2.0, -7.0);
        camera
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = camera();
        let clip = cam.build_matrix() * cam.target.extend(1.0);
        let ndc = clip / clip.w;
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&ndc.z));
    }

    #[test]
    fn points_behind_the_eye_are_clipped() {
        let cam = camera();
        let clip = cam.build_matrix() * Vec4::new(1.0, 2.0, 10.0, 1.0);
        assert!(clip.w < 0.0);
    }

    #[test]
    fn uniform_tracks_camera_and_fog() {
        let cam = camera();
        let mut uniform = CameraUniform::new();
        uniform.update_view_proj(&cam);
        uniform.set_fog(&PostProcessingOptions::default());
        assert_eq!(uniform.position, [1.0, 2.0, 3.0]);
        assert_eq!(uniform.forward, [0.0, 0.0, -1.0]);
        assert_eq!(uniform.fovy, 75.0);
        assert_eq!(uniform.fog_density, 0.9);
        assert_eq!(size_of::<CameraUniform>(), 112);
    }

    #[test]
    fn coincident_eye_and_target_keep_a_direction() {
        let mut cam = camera();
        cam.target = cam.eye;
        assert_eq!(cam.forward(), Vec3::NEG_Z);
        assert!(cam.build_matrix().is_finite());
    }

    #[test]
    fn looking_straight_up_or_down_stays_finite() {
        for dir in [Vec3::Y, Vec3::NEG_Y] {
            let mut cam = camera();
            cam.target = cam.eye + dir * 5.0;
            let matrix = cam.build_matrix();
            assert!(matrix.is_finite(), "looking along {dir}");
            let clip = matrix * cam.target.extend(1.0);
            let ndc = clip / clip.w;
            assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4);
        }
    }

    #[test]
    fn regular_views_keep_y_up() {
        let cam = camera();
        assert_eq!(cam.view_up(cam.forward()), Vec3::Y);
    }
}
