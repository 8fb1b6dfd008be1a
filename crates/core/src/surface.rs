//! CPU-side RGBA drawing surface.
//!
//! A [`PixelSurface`] stores `width * height` RGBA8 pixels in row-major
//! layout and offers the three primitives the frame renderer needs: clear,
//! alpha-blended filled circles, and alpha-blended one-pixel lines. Blending
//! is source-over; nothing here composites additively.

use glam::DVec2;

use crate::color::Srgb;
use crate::error::DriftError;

/// An RGBA8 pixel surface with source-over alpha blending.
#[derive(Debug, Clone)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl PixelSurface {
    /// Creates a surface of the given dimensions, filled with transparent black.
    ///
    /// Returns `DriftError::InvalidDimensions` if either dimension is zero or
    /// if the pixel buffer length would overflow `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, DriftError> {
        let len = Self::buffer_len(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Surface width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the row-major RGBA8 pixel data.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Returns the RGBA bytes of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y * self.width + x) * 4;
        Some([
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ])
    }

    /// Resizes the surface, discarding its contents.
    ///
    /// The buffer is reset to transparent black; callers are expected to
    /// clear before the next draw. Returns `DriftError::InvalidDimensions`
    /// for zero or overflowing dimensions.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), DriftError> {
        let len = Self::buffer_len(width, height)?;
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize(len, 0);
        Ok(())
    }

    /// Fills the entire surface with an opaque color.
    pub fn clear(&mut self, color: Srgb) {
        let rgba = [
            quantize(color.r),
            quantize(color.g),
            quantize(color.b),
            255,
        ];
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Draws a filled circle at `center`, blended onto the surface at `alpha`.
    ///
    /// Edges get partial coverage over a one-pixel band so small particles
    /// do not alias into squares. Pixels outside the surface are skipped.
    pub fn fill_circle(&mut self, center: DVec2, radius: f64, color: Srgb, alpha: f64) {
        if radius <= 0.0 || alpha <= 0.0 {
            return;
        }
        let x0 = (center.x - radius - 1.0).floor() as isize;
        let x1 = (center.x + radius + 1.0).ceil() as isize;
        let y0 = (center.y - radius - 1.0).floor() as isize;
        let y1 = (center.y + radius + 1.0).ceil() as isize;
        for y in y0..=y1 {
            for x in x0..=x1 {
                let sample = DVec2::new(x as f64 + 0.5, y as f64 + 0.5);
                let coverage = (radius - sample.distance(center) + 0.5).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, alpha * coverage);
                }
            }
        }
    }

    /// Draws a one-pixel line from `from` to `to`, blended at `alpha`.
    ///
    /// Steps along the major axis; each crossed pixel is blended once.
    /// Pixels outside the surface are skipped.
    pub fn stroke_line(&mut self, from: DVec2, to: DVec2, color: Srgb, alpha: f64) {
        if alpha <= 0.0 {
            return;
        }
        let delta = to - from;
        let steps = delta.x.abs().max(delta.y.abs()).ceil().max(1.0);
        let step = delta / steps;
        let mut last = None;
        for i in 0..=steps as usize {
            let point = from + step * i as f64;
            let cell = (point.x.floor() as isize, point.y.floor() as isize);
            if last == Some(cell) {
                continue;
            }
            last = Some(cell);
            self.blend_pixel(cell.0, cell.1, color, alpha);
        }
    }

    /// Source-over blend of `color` at `alpha` onto the pixel at `(x, y)`.
    ///
    /// Out-of-bounds coordinates are ignored. The destination alpha becomes
    /// opaque; the surface is meant to be cleared to an opaque background
    /// before drawing.
    fn blend_pixel(&mut self, x: isize, y: isize, color: Srgb, alpha: f64) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let a = alpha.clamp(0.0, 1.0);
        if a == 0.0 {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let blend = |dst: u8, src: f64| {
            let dst = dst as f64 / 255.0;
            quantize(src * a + dst * (1.0 - a))
        };
        self.pixels[idx] = blend(self.pixels[idx], color.r);
        self.pixels[idx + 1] = blend(self.pixels[idx + 1], color.g);
        self.pixels[idx + 2] = blend(self.pixels[idx + 2], color.b);
        self.pixels[idx + 3] = 255;
    }

    fn buffer_len(width: usize, height: usize) -> Result<usize, DriftError> {
        if width == 0 || height == 0 {
            return Err(DriftError::InvalidDimensions);
        }
        width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or(DriftError::InvalidDimensions)
    }
}

fn quantize(c: f64) -> u8 {
    (c.clamp(0.0, 1.0) * 255.0).round() as u8
}
