//! PNG snapshots of a rendered surface.
//!
//! Feature-gated behind `png` (default on) so embedding hosts that present
//! the pixel buffer themselves can depend on this crate without pulling in
//! the `image` crate.

use std::path::Path;

use drift_core::{DriftError, PixelSurface};

/// Writes the surface's current pixels as a PNG image.
///
/// Returns `DriftError::InvalidDimensions` if the surface dimensions
/// overflow `u32`, or `DriftError::Io` on write failure.
pub fn write_png(surface: &PixelSurface, path: &Path) -> Result<(), DriftError> {
    let w = u32::try_from(surface.width()).map_err(|_| DriftError::InvalidDimensions)?;
    let h = u32::try_from(surface.height()).map_err(|_| DriftError::InvalidDimensions)?;
    let img = image::RgbaImage::from_raw(w, h, surface.pixels().to_vec())
        .ok_or_else(|| DriftError::Io("RGBA buffer size mismatch".into()))?;
    img.save(path).map_err(|e| DriftError::Io(e.to_string()))
}
