//! Platform abstraction layer
//!
//! The game advances once per display refresh. Who delivers that refresh
//! differs per platform:
//! - Browser: `requestAnimationFrame` (`RafScheduler`)
//! - Headless runs and tests: `ManualScheduler`, pumped by the caller

use std::cell::Cell;
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
mod web;
#[cfg(target_arch = "wasm32")]
pub use web::RafScheduler;

/// Frame callback scheduling port
pub trait FrameScheduler {
    /// Ask for one callback on the next display refresh. Repeated requests
    /// before it fires collapse into one.
    fn request_frame(&mut self);

    /// Drop the pending callback, if any
    fn cancel_frame(&mut self);

    fn is_pending(&self) -> bool;
}

/// Id of an outstanding platform frame request. Clones share the slot, so
/// the frame callback can mark it fired while the scheduler still owns it.
#[derive(Debug, Clone, Default)]
pub struct FrameHandle(Rc<Cell<Option<i32>>>);

impl FrameHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a freshly issued request id
    pub fn issue(&self, id: i32) {
        self.0.set(Some(id));
    }

    /// The frame ran; its id is no longer cancellable
    pub fn fired(&self) {
        self.0.set(None);
    }

    /// Take the outstanding id for cancellation
    pub fn take(&self) -> Option<i32> {
        self.0.take()
    }

    pub fn is_pending(&self) -> bool {
        self.0.get().is_some()
    }
}

/// Scheduler driven by hand; clones share the same pending flag
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    pending: Rc<Cell<bool>>,
    requests: Rc<Cell<u64>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume the pending request. Returns whether a frame should run now.
    pub fn fire(&self) -> bool {
        self.pending.replace(false)
    }

    /// Total requests seen so far
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) {
        self.requests.set(self.requests.get() + 1);
        self.pending.set(true);
    }

    fn cancel_frame(&mut self) {
        self.pending.set(false);
    }

    fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_scheduler_fires_once_per_request() {
        let shared = ManualScheduler::new();
        let mut scheduler = shared.clone();
        assert!(!shared.fire());

        scheduler.request_frame();
        scheduler.request_frame();
        assert!(scheduler.is_pending());
        assert!(shared.fire());
        assert!(!shared.fire());
        assert_eq!(shared.requests(), 2);
    }

    #[test]
    fn test_frame_handle_clears_once_fired() {
        let handle = FrameHandle::new();
        let callback_side = handle.clone();
        handle.issue(7);
        assert!(handle.is_pending());

        callback_side.fired();
        assert!(!handle.is_pending());
        // Nothing stale left to cancel
        assert_eq!(handle.take(), None);

        handle.issue(8);
        assert_eq!(handle.take(), Some(8));
        assert!(!callback_side.is_pending());
    }

    #[test]
    fn test_cancel_clears_pending() {
        let mut scheduler = ManualScheduler::new();
        scheduler.request_frame();
        scheduler.cancel_frame();
        assert!(!scheduler.is_pending());
        assert!(!scheduler.fire());
    }
}
