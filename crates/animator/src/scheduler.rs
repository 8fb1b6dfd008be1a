//! Frame scheduling abstraction.
//!
//! The host environment owns the actual repaint timing; the animation loop
//! only knows how to request one callback before the next repaint and how to
//! cancel a request it no longer wants. Handles are unique per request, so a
//! canceled or superseded callback can be recognized and dropped even if the
//! host already queued it.

/// Opaque identifier for one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Wraps a raw handle value. Host scheduler implementations assign these;
    /// uniqueness per request is their responsibility.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle value.
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// "Invoke this callback before the next repaint" and "cancel a previously
/// scheduled invocation by handle".
pub trait FrameScheduler {
    /// Requests a single callback before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a pending request. A canceled handle must never fire.
    /// Canceling a handle that already fired or was superseded is a no-op.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Single-slot scheduler pumped by the host.
///
/// Holds at most one pending request; a new request supersedes the previous
/// one, which then never fires. The host drains due frames with
/// [`take_due`](Self::take_due) and hands them to the animation loop —
/// the CLI's headless render loop and the lifecycle tests both drive frames
/// this way.
#[derive(Debug, Default)]
pub struct StepScheduler {
    next_raw: u64,
    pending: Option<FrameHandle>,
}

impl StepScheduler {
    /// Creates a scheduler with no pending frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the due frame, if any. The handle is considered fired and can
    /// no longer be canceled.
    pub fn take_due(&mut self) -> Option<FrameHandle> {
        self.pending.take()
    }

    /// Returns true while a request is waiting to fire.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl FrameScheduler for StepScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_raw += 1;
        let handle = FrameHandle::from_raw(self.next_raw);
        self.pending = Some(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        if self.pending == Some(handle) {
            self.pending = None;
        }
    }
}
