//! Error types for the drift core.

use thiserror::Error;

/// Errors produced by drift operations.
#[derive(Debug, Error)]
pub enum DriftError {
    /// Width or height was zero when creating or resizing a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The animation was started without a drawing surface attached.
    #[error("drawing surface unavailable: attach a surface before starting the animation")]
    SurfaceUnavailable,

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A requested style preset name was not recognized.
    #[error("unknown style preset: {0}")]
    UnknownStyle(String),

    /// An I/O failure while writing a snapshot.
    #[error("{0}")]
    Io(String),
}
