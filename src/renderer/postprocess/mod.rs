//! Post-processing effect passes.
//!
//! Provides multi-level bloom and the tone-mapping composite that writes
//! the final image to the swapchain.

/// Threshold, blur chain and level combine.
pub mod bloom;
/// Scene + bloom, exposure, ACES tone mapping, gamma.
pub mod composite;
pub(crate) mod post_process;
/// Shared interface for fullscreen passes.
pub mod screen_pass;
