#![deny(unsafe_code)]
//! Animation lifecycle for the drift ambient background.
//!
//! An [`AnimationLoop`] drives a [`drift_field::ParticleField`] and the
//! frame renderer from a host-provided [`FrameScheduler`] and [`Clock`].
//! The loop is an explicit Idle/Running/PausedByVisibility state machine
//! holding at most one scheduled frame at a time; stale callbacks are
//! guaranteed no-ops. A [`SurfaceController`] owns the drawing surface and
//! reseeds the field whenever the viewport dimensions change.

pub mod animation;
pub mod clock;
pub mod controller;
pub mod scheduler;

pub use animation::{AnimationLoop, LoopState};
pub use clock::{Clock, FixedStepClock, SystemClock};
pub use controller::SurfaceController;
pub use scheduler::{FrameHandle, FrameScheduler, StepScheduler};
