//! The animation loop state machine.
//!
//! One [`AnimationLoop`] owns a particle field, a surface controller, a
//! render style, and a clock. The host wires it to a [`FrameScheduler`] and
//! forwards fired callbacks to [`on_frame`](AnimationLoop::on_frame); each
//! tick advances the field, renders a frame, and requests the next callback.
//! The chain is unbounded — it ends only through [`stop`](AnimationLoop::stop)
//! or a visibility pause, never by tick count.

use drift_core::DriftError;
use drift_field::ParticleField;
use drift_render::{render_frame, RenderStyle};

use crate::clock::Clock;
use crate::controller::SurfaceController;
use crate::scheduler::{FrameHandle, FrameScheduler};

/// Lifecycle state of an [`AnimationLoop`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Not animating; no frame is scheduled.
    Idle,
    /// Ticking; exactly one frame is scheduled.
    Running,
    /// Suspended by a visibility loss; no frame is scheduled until the
    /// surface becomes visible again.
    PausedByVisibility,
}

/// Drives repeated advance/render ticks, subject to visibility and
/// lifecycle control.
///
/// Invariant: at most one frame is scheduled at any time, tracked by a
/// single [`FrameHandle`]. Cancellation replaces the handle, so a stale
/// callback the host already queued compares unequal and is dropped —
/// there is no window where a canceled tick can still draw.
pub struct AnimationLoop<C: Clock> {
    state: LoopState,
    pending: Option<FrameHandle>,
    field: ParticleField,
    controller: SurfaceController,
    style: RenderStyle,
    clock: C,
    frames: u64,
}

impl<C: Clock> AnimationLoop<C> {
    /// Creates an idle loop around the given field, surface, style, and clock.
    pub fn new(
        field: ParticleField,
        controller: SurfaceController,
        style: RenderStyle,
        clock: C,
    ) -> Self {
        Self {
            state: LoopState::Idle,
            pending: None,
            field,
            controller,
            style,
            clock,
            frames: 0,
        }
    }

    /// Starts animating: Idle → Running, scheduling the first tick.
    ///
    /// Fails with `DriftError::SurfaceUnavailable` when no drawing surface
    /// is attached; nothing is scheduled in that case. Calling `start` while
    /// Running is a no-op, and while PausedByVisibility it leaves the pause
    /// in place — the visibility signal owns resumption.
    pub fn start(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), DriftError> {
        match self.state {
            LoopState::Running | LoopState::PausedByVisibility => Ok(()),
            LoopState::Idle => {
                if !self.controller.is_attached() {
                    return Err(DriftError::SurfaceUnavailable);
                }
                self.state = LoopState::Running;
                self.pending = Some(scheduler.request_frame());
                log::info!("animation started");
                Ok(())
            }
        }
    }

    /// Stops animating: Running or PausedByVisibility → Idle, canceling any
    /// pending tick. No further draws occur until `start` is called again.
    pub fn stop(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.state == LoopState::Idle {
            return;
        }
        if let Some(handle) = self.pending.take() {
            scheduler.cancel_frame(handle);
        }
        self.state = LoopState::Idle;
        log::info!("animation stopped after {} frames", self.frames);
    }

    /// Applies a visibility transition.
    ///
    /// Hiding while Running cancels the pending tick and parks the loop;
    /// becoming visible again schedules exactly one fresh tick — elapsed
    /// hidden time is not replayed. Signals in any other state are no-ops.
    pub fn set_visible(&mut self, visible: bool, scheduler: &mut dyn FrameScheduler) {
        match (self.state, visible) {
            (LoopState::Running, false) => {
                if let Some(handle) = self.pending.take() {
                    scheduler.cancel_frame(handle);
                }
                self.state = LoopState::PausedByVisibility;
                log::debug!("animation paused: surface hidden");
            }
            (LoopState::PausedByVisibility, true) => {
                self.state = LoopState::Running;
                self.pending = Some(scheduler.request_frame());
                log::debug!("animation resumed: surface visible");
            }
            _ => {}
        }
    }

    /// Runs one tick for a fired callback.
    ///
    /// The tick only runs while Running and only for the handle this loop is
    /// actually waiting on; anything else is a stale or canceled callback
    /// and is dropped. A live tick advances the field, renders onto the
    /// surface, and schedules the next callback.
    pub fn on_frame(&mut self, handle: FrameHandle, scheduler: &mut dyn FrameScheduler) {
        if self.state != LoopState::Running || self.pending != Some(handle) {
            return;
        }
        self.pending = None;

        let Some(surface) = self.controller.surface_mut() else {
            log::warn!("drawing surface detached mid-run; stopping animation");
            self.state = LoopState::Idle;
            return;
        };

        let width = surface.width() as f64;
        let height = surface.height() as f64;
        let now = self.clock.now();
        self.field.advance(width, height, now);
        render_frame(surface, &self.field, &self.style);
        self.frames += 1;

        self.pending = Some(scheduler.request_frame());
    }

    /// Applies new viewport dimensions: resizes the surface and reseeds the
    /// field. Valid in every state; an idle loop simply renders the new
    /// field on its next start.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), DriftError> {
        self.controller.resize(width, height, &mut self.field)
    }

    /// Current lifecycle state.
    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of completed advance/render ticks.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Read-only access to the particle field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// Read-only access to the drawing surface, if attached.
    pub fn surface(&self) -> Option<&drift_core::PixelSurface> {
        self.controller.surface()
    }
}
