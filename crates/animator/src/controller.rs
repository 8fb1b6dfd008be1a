//! Surface ownership and resize handling.
//!
//! A [`SurfaceController`] owns the drawing surface's pixel dimensions. On a
//! viewport resize it resizes the surface and reseeds the particle field so
//! density stays proportional to area. Rapid repeated resizes are not
//! debounced; a reseed is linear in particle count.

use drift_core::{DriftError, PixelSurface};
use drift_field::ParticleField;

/// Owns the optional drawing surface and mirrors viewport dimensions onto it.
#[derive(Debug, Default)]
pub struct SurfaceController {
    surface: Option<PixelSurface>,
}

impl SurfaceController {
    /// Creates a controller owning the given surface.
    pub fn new(surface: PixelSurface) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// Creates a controller with no surface attached. [`AnimationLoop::start`]
    /// fails until one is attached.
    ///
    /// [`AnimationLoop::start`]: crate::AnimationLoop::start
    pub fn detached() -> Self {
        Self { surface: None }
    }

    /// Attaches a surface, replacing any previous one.
    pub fn attach(&mut self, surface: PixelSurface) {
        self.surface = Some(surface);
    }

    /// Detaches and returns the surface, if any.
    pub fn detach(&mut self) -> Option<PixelSurface> {
        self.surface.take()
    }

    /// Returns true while a surface is attached.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Read-only access to the surface.
    pub fn surface(&self) -> Option<&PixelSurface> {
        self.surface.as_ref()
    }

    /// Mutable access to the surface.
    pub fn surface_mut(&mut self) -> Option<&mut PixelSurface> {
        self.surface.as_mut()
    }

    /// Current surface dimensions, if attached.
    pub fn dimensions(&self) -> Option<(usize, usize)> {
        self.surface.as_ref().map(|s| (s.width(), s.height()))
    }

    /// Applies new viewport dimensions: resizes the surface, then reseeds
    /// the field to the density the new area calls for.
    ///
    /// With no surface attached this logs and does nothing — a resize signal
    /// without a surface is stale host plumbing, not an error. Zero
    /// dimensions return `DriftError::InvalidDimensions`.
    pub fn resize(
        &mut self,
        width: usize,
        height: usize,
        field: &mut ParticleField,
    ) -> Result<(), DriftError> {
        let Some(surface) = self.surface.as_mut() else {
            log::warn!("resize to {width}x{height} ignored: no surface attached");
            return Ok(());
        };
        surface.resize(width, height)?;
        field.reseed(width as f64, height as f64);
        log::info!("surface resized to {width}x{height}, field reseeded to {}", field.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_field::FieldParams;

    fn field() -> ParticleField {
        ParticleField::new(FieldParams::default(), 42)
    }

    #[test]
    fn new_controller_is_attached() {
        let controller = SurfaceController::new(PixelSurface::new(10, 10).unwrap());
        assert!(controller.is_attached());
        assert_eq!(controller.dimensions(), Some((10, 10)));
    }

    #[test]
    fn detached_controller_has_no_surface() {
        let controller = SurfaceController::detached();
        assert!(!controller.is_attached());
        assert_eq!(controller.dimensions(), None);
    }

    #[test]
    fn attach_then_detach_round_trips_the_surface() {
        let mut controller = SurfaceController::detached();
        controller.attach(PixelSurface::new(20, 10).unwrap());
        assert!(controller.is_attached());
        let surface = controller.detach().unwrap();
        assert_eq!(surface.width(), 20);
        assert!(!controller.is_attached());
    }

    #[test]
    fn resize_updates_surface_and_reseeds_field() {
        let mut controller = SurfaceController::new(PixelSurface::new(10, 10).unwrap());
        let mut field = field();
        // floor(300 * 200 / 15000) = 4
        controller.resize(300, 200, &mut field).unwrap();
        assert_eq!(controller.dimensions(), Some((300, 200)));
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn each_resize_recomputes_the_count_from_scratch() {
        let mut controller = SurfaceController::new(PixelSurface::new(10, 10).unwrap());
        let mut field = field();
        controller.resize(3000, 2000, &mut field).unwrap();
        assert_eq!(field.len(), 100);
        controller.resize(300, 200, &mut field).unwrap();
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn resize_while_detached_is_a_noop() {
        let mut controller = SurfaceController::detached();
        let mut field = field();
        controller.resize(300, 200, &mut field).unwrap();
        assert!(field.is_empty(), "reseed must not run without a surface");
    }

    #[test]
    fn resize_to_zero_is_rejected() {
        let mut controller = SurfaceController::new(PixelSurface::new(10, 10).unwrap());
        let mut field = field();
        assert!(matches!(
            controller.resize(0, 200, &mut field),
            Err(DriftError::InvalidDimensions)
        ));
    }
}
