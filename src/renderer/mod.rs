//! Rendering subsystems for the fly-through.
//!
//! The line pass draws the scene into an HDR target; the post-processing
//! stack adds bloom and tone maps it onto the swapchain.

/// Depth-tested, fogged line-list renderer.
pub mod lines;
pub(crate) mod pipeline_util;
/// Bloom and tone-mapping passes.
pub mod postprocess;
