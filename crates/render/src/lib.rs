#![deny(unsafe_code)]
//! Frame rendering for the drift ambient background.
//!
//! [`render_frame`] draws one complete frame of a [`ParticleField`] onto a
//! [`PixelSurface`]: clear to the background, blend every particle as a
//! filled circle, then join close pairs with distance-faded lines. The
//! renderer keeps no state between calls — it reads whatever particle state
//! the field currently holds.

pub mod style;

#[cfg(feature = "png")]
pub mod snapshot;

use drift_core::PixelSurface;
use drift_field::ParticleField;

pub use style::RenderStyle;

/// Renders one frame of the field onto the surface.
///
/// Drawing order: background clear, particles (each at its own opacity),
/// then connection lines on top. All blending is source-over; side effects
/// are confined to the surface.
pub fn render_frame(surface: &mut PixelSurface, field: &ParticleField, style: &RenderStyle) {
    surface.clear(style.background);

    for particle in field.particles() {
        surface.fill_circle(
            particle.position,
            particle.radius,
            particle.color,
            particle.opacity,
        );
    }

    for connection in field.connections(style.connection_threshold) {
        if let Some(alpha) = style.line_alpha(connection.distance) {
            surface.stroke_line(connection.a, connection.b, style.stroke, alpha);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_field::{FieldParams, ParticleField};

    fn background_pixel(style: &RenderStyle) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [
            q(style.background.r),
            q(style.background.g),
            q(style.background.b),
            255,
        ]
    }

    #[test]
    fn empty_field_renders_pure_background() {
        let mut surface = PixelSurface::new(32, 32).unwrap();
        // 32x32 is far below one particle's worth of area.
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(32.0, 32.0);
        assert!(field.is_empty());

        let style = RenderStyle::indigo();
        render_frame(&mut surface, &field, &style);

        let expected = background_pixel(&style);
        for px in surface.pixels().chunks_exact(4) {
            assert_eq!(px, expected);
        }
    }

    #[test]
    fn populated_field_changes_pixels() {
        let mut surface = PixelSurface::new(400, 300).unwrap();
        let mut field = ParticleField::new(FieldParams::default(), 42);
        field.reseed(400.0, 300.0);
        assert!(!field.is_empty());

        let style = RenderStyle::indigo();
        render_frame(&mut surface, &field, &style);

        let expected = background_pixel(&style);
        let touched = surface
            .pixels()
            .chunks_exact(4)
            .filter(|px| *px != expected)
            .count();
        assert!(touched > 0, "no particle left a mark on the surface");
    }

    #[test]
    fn rendering_is_stateless_across_calls() {
        let mut field = ParticleField::new(FieldParams::default(), 7);
        field.reseed(400.0, 300.0);
        let style = RenderStyle::mono();

        let mut first = PixelSurface::new(400, 300).unwrap();
        render_frame(&mut first, &field, &style);

        // Re-render the same state onto a dirty surface; the clear must
        // erase all history.
        let mut second = PixelSurface::new(400, 300).unwrap();
        render_frame(&mut second, &field, &RenderStyle::ember());
        render_frame(&mut second, &field, &style);

        assert_eq!(first.pixels(), second.pixels());
    }

    #[test]
    fn same_seed_renders_identical_frames() {
        let style = RenderStyle::indigo();

        let mut field_a = ParticleField::new(FieldParams::default(), 99);
        field_a.reseed(640.0, 360.0);
        field_a.advance(640.0, 360.0, 0.25);
        let mut surface_a = PixelSurface::new(640, 360).unwrap();
        render_frame(&mut surface_a, &field_a, &style);

        let mut field_b = ParticleField::new(FieldParams::default(), 99);
        field_b.reseed(640.0, 360.0);
        field_b.advance(640.0, 360.0, 0.25);
        let mut surface_b = PixelSurface::new(640, 360).unwrap();
        render_frame(&mut surface_b, &field_b, &style);

        assert_eq!(surface_a.pixels(), surface_b.pixels());
    }
}
