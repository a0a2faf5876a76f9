//! Cooperative frame loop.
//!
//! The platform hands out one callback per display frame. `RenderLoop`
//! tracks the single outstanding request so that stopping (unmount) cancels
//! it exactly once and no further frames run afterwards.

#[cfg(test)]
#[path = "frame_test.rs"]
mod frame_test;

/// Source of per-frame callbacks (`requestAnimationFrame` in the browser).
pub trait FrameScheduler {
    /// Identifies an outstanding request.
    type Handle: Copy;

    /// Ask for the next frame. `None` if the platform refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Cancel an outstanding request.
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Keeps at most one frame request in flight.
pub struct RenderLoop<S: FrameScheduler> {
    scheduler: S,
    pending: Option<S::Handle>,
    running: bool,
}

impl<S: FrameScheduler> RenderLoop<S> {
    #[must_use]
    pub fn new(scheduler: S) -> Self {
        Self { scheduler, pending: None, running: false }
    }

    /// Request the first frame. Calling again while running does nothing.
    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
        self.pending = self.scheduler.request_frame();
    }

    /// Handle a delivered frame: run `step`, then request the next frame.
    ///
    /// Returns `false` (without running `step`) once the loop is stopped.
    pub fn frame(&mut self, step: impl FnOnce()) -> bool {
        self.pending = None;
        if !self.running {
            return false;
        }
        step();
        self.pending = self.scheduler.request_frame();
        true
    }

    /// Stop the loop and cancel the outstanding request, if any.
    pub fn stop(&mut self) {
        self.running = false;
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }
}

impl<S: FrameScheduler> Drop for RenderLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}
