//! Shared utilities for the render loop: the pausable flight clock and
//! frame timing.

/// Pausable wall clock that drives the camera.
pub mod clock;
/// Smoothed FPS with periodic debug logging.
pub mod frame_timing;
