//! Crate-level error types.

use std::fmt;

use crate::gpu::render_context::RenderContextError;

/// Errors produced by the wormhole crate.
#[derive(Debug)]
pub enum WormholeError {
    /// GPU context initialization failure.
    Gpu(RenderContextError),
    /// WGSL shader composition failure.
    Shader(String),
    /// The path control points cannot form a curve.
    Path(String),
    /// Options parsed but hold values the renderer cannot use.
    InvalidOptions(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
    /// Viewer event-loop failure.
    Viewer(String),
}

impl fmt::Display for WormholeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gpu(e) => write!(f, "GPU error: {e}"),
            Self::Shader(msg) => write!(f, "shader error: {msg}"),
            Self::Path(msg) => write!(f, "path error: {msg}"),
            Self::InvalidOptions(msg) => {
                write!(f, "invalid options: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Viewer(msg) => write!(f, "viewer error: {msg}"),
        }
    }
}

impl std::error::Error for WormholeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Gpu(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<RenderContextError> for WormholeError {
    fn from(e: RenderContextError) -> Self {
        Self::Gpu(e)
    }
}

impl From<std::io::Error> for WormholeError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
