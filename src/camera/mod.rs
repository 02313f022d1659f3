//! Camera system for the fly-through.
//!
//! A stateless follower turns elapsed time into a pose on the path; the
//! controller applies that pose to a perspective camera and its GPU uniform.

/// Camera GPU uniform owner that applies follower poses.
pub mod controller;
/// Core camera struct and GPU uniform types.
pub mod core;
/// Elapsed time to camera pose along a closed path.
pub mod follower;
