// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Camera fly-through of a wireframe wormhole, rendered with wgpu.
//!
//! A closed centripetal Catmull-Rom curve is swept into a tube whose feature
//! edges are drawn as lines, decorated with randomly scattered boxes, and
//! viewed from a camera that travels the curve at a constant rate. An HDR
//! bloom chain and ACES tone mapping finish each frame.
//!
//! # Key entry points
//!
//! - [`Viewer`] - opens a window and runs the flight until it is closed
//!   (`viewer` feature)
//! - [`FlythroughEngine`] - the per-window application context: scene,
//!   camera and GPU passes
//! - [`camera::follower::CameraPathFollower`] - elapsed time to camera pose
//! - [`scene::assemble`] - the line geometry built once at startup
//! - [`Options`] - TOML-backed configuration for every tunable value
//!
//! # Frame
//!
//! Each redraw reads the [`util::clock::FlightClock`], moves the camera to
//! the follower's pose, draws every line into an HDR target, then runs
//! bloom and composite into the swapchain.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod path;
pub mod renderer;
pub mod scene;
pub mod util;
#[cfg(feature = "viewer")]
pub mod viewer;

pub use engine::FlythroughEngine;
pub use error::WormholeError;
pub use options::Options;
#[cfg(feature = "viewer")]
pub use viewer::Viewer;
