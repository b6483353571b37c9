//! requestAnimationFrame scheduling

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::{FrameHandle, FrameScheduler};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Schedules the installed callback on the next animation frame. Clones
/// share the callback and the outstanding request.
#[derive(Clone)]
pub struct RafScheduler {
    callback: FrameCallback,
    handle: FrameHandle,
}

impl RafScheduler {
    pub fn new() -> Self {
        Self {
            callback: Rc::new(RefCell::new(None)),
            handle: FrameHandle::new(),
        }
    }

    /// Install the per-frame closure. The outstanding request is marked
    /// fired before `on_frame` runs, so it may request the next frame.
    pub fn install(&self, mut on_frame: impl FnMut(f64) + 'static) {
        let handle = self.handle.clone();
        *self.callback.borrow_mut() = Some(Closure::<dyn FnMut(f64)>::new(move |time: f64| {
            handle.fired();
            on_frame(time);
        }));
    }
}

impl Default for RafScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) {
        if self.handle.is_pending() {
            return;
        }
        let Some(window) = web_sys::window() else {
            return;
        };
        let slot = self.callback.borrow();
        let Some(callback) = slot.as_ref() else {
            log::warn!("Frame requested before a callback was installed");
            return;
        };
        if let Ok(id) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            self.handle.issue(id);
        }
    }

    fn cancel_frame(&mut self) {
        if let (Some(id), Some(window)) = (self.handle.take(), web_sys::window()) {
            let _ = window.cancel_animation_frame(id);
        }
    }

    fn is_pending(&self) -> bool {
        self.handle.is_pending()
    }
}
