#![deny(unsafe_code)]
//! Core types for the drift ambient particle system.
//!
//! Provides the `DriftError` error type, `Xorshift64Star` PRNG, color types
//! (`Srgb`, `Hsl`), JSON parameter helpers, and the `PixelSurface` drawing
//! target that the renderer and animation loop operate on.

pub mod color;
pub mod error;
pub mod params;
pub mod prng;
pub mod surface;

pub use color::{Hsl, Srgb};
pub use error::DriftError;
pub use prng::Xorshift64Star;
pub use surface::PixelSurface;
