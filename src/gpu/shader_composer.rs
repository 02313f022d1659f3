use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::WormholeError;

/// Shared WGSL modules, registered in dependency order as
/// `(file_path, source)`.
const MODULES: &[(&str, &str)] = &[
    (
        "modules/fullscreen.wgsl",
        include_str!("../../assets/shaders/modules/fullscreen.wgsl"),
    ),
    (
        "modules/camera.wgsl",
        include_str!("../../assets/shaders/modules/camera.wgsl"),
    ),
    (
        "modules/color.wgsl",
        include_str!("../../assets/shaders/modules/color.wgsl"),
    ),
];

/// Every entry-point shader, addressed by its path under `assets/shaders`.
const SHADERS: &[(&str, &str)] = &[
    (
        "raster/lines.wgsl",
        include_str!("../../assets/shaders/raster/lines.wgsl"),
    ),
    (
        "screen/bloom_threshold.wgsl",
        include_str!("../../assets/shaders/screen/bloom_threshold.wgsl"),
    ),
    (
        "screen/bloom_blur.wgsl",
        include_str!("../../assets/shaders/screen/bloom_blur.wgsl"),
    ),
    (
        "screen/bloom_combine.wgsl",
        include_str!("../../assets/shaders/screen/bloom_combine.wgsl"),
    ),
    (
        "screen/composite.wgsl",
        include_str!("../../assets/shaders/screen/composite.wgsl"),
    ),
];

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads all shared WGSL modules at construction time. Consuming shaders
/// use `#import wormhole::module_name::{...}` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping WGSL re-parse at
/// runtime.
pub struct ShaderComposer {
    composer: Composer,
}

impl ShaderComposer {
    /// Register the shared modules.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] if a module fails to parse.
    pub fn new() -> Result<Self, WormholeError> {
        let mut composer = Composer::default();
        for &(file_path, source) in MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source,
                    file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    WormholeError::Shader(format!(
                        "failed to register module '{file_path}': {e}"
                    ))
                })?;
        }
        Ok(Self { composer })
    }

    /// Paths of every composable entry-point shader.
    pub fn shader_paths() -> impl Iterator<Item = &'static str> {
        SHADERS.iter().map(|&(path, _)| path)
    }

    /// Compose the shader at `path` into a `wgpu::ShaderModule` ready for
    /// pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] for an unknown path or a
    /// composition failure.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        path: &str,
    ) -> Result<wgpu::ShaderModule, WormholeError> {
        let naga_module = self.compose_naga(path)?;
        log::debug!("composed shader {path}");
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu shader
    /// module. Needs no GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`WormholeError::Shader`] for an unknown path or a
    /// composition failure.
    pub fn compose_naga(
        &mut self,
        path: &str,
    ) -> Result<naga::Module, WormholeError> {
        let source = SHADERS
            .iter()
            .find(|&&(p, _)| p == path)
            .map(|&(_, source)| source)
            .ok_or_else(|| {
                WormholeError::Shader(format!("unknown shader '{path}'"))
            })?;
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path: path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                WormholeError::Shader(format!(
                    "failed to compose '{path}': {e}"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for path in ShaderComposer::shader_paths() {
            let module = composer
                .compose_naga(path)
                .unwrap_or_else(|e| panic!("{path} failed to compose: {e}"));
            for stage in ["vs_main", "fs_main"] {
                assert!(
                    module.entry_points.iter().any(|ep| ep.name == stage),
                    "{path} is missing {stage}"
                );
            }
        }
    }

    #[test]
    fn unknown_shader_is_an_error() {
        let mut composer = ShaderComposer::new().unwrap();
        let err = composer.compose_naga("screen/ssao.wgsl").unwrap_err();
        assert!(matches!(err, WormholeError::Shader(_)));
    }
}
