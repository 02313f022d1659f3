//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, shader composition and the
//! bind group and pipeline boilerplate shared by the fullscreen passes.

/// Shared wgpu boilerplate helpers for screen-space post-process pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
