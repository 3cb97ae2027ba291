//! Display refresh pump driven by `requestAnimationFrame`.
//!
//! The callback runs once per frame and returns whether it wants another
//! one; the pump also stops when [`FramePump::stop`] cancels the pending
//! frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// Monotonic milliseconds from `performance.now()`.
pub fn now_ms() -> u64 {
    millis(performance_now())
}

fn millis(stamp: f64) -> u64 {
    // `as` saturates: negative or NaN stamps become 0
    stamp as u64
}

type FrameClosure = Closure<dyn FnMut(f64)>;

pub struct FramePump {
    inner: Rc<PumpInner>,
}

struct PumpInner {
    closure: RefCell<Option<FrameClosure>>,
    callback: RefCell<Box<dyn FnMut(u64) -> bool>>,
    running: Cell<bool>,
    frame_id: Cell<i32>,
}

impl FramePump {
    /// `callback` gets the frame timestamp in milliseconds and returns
    /// `false` to stop rescheduling.
    pub fn new(callback: impl FnMut(u64) -> bool + 'static) -> Self {
        Self {
            inner: Rc::new(PumpInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                running: Cell::new(false),
                frame_id: Cell::new(0),
            }),
        }
    }

    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        if self.inner.closure.borrow().is_none() {
            let inner = Rc::clone(&self.inner);
            let closure = Closure::wrap(Box::new(move |stamp: f64| {
                if !inner.running.get() {
                    return;
                }
                let again = inner.callback.borrow_mut()(millis(stamp));
                if !again {
                    inner.running.set(false);
                    return;
                }
                if inner.running.get() {
                    if let Some(ref closure) = *inner.closure.borrow() {
                        let id = request_animation_frame(closure.as_ref().unchecked_ref());
                        inner.frame_id.set(id);
                    }
                }
            }) as Box<dyn FnMut(f64)>);
            *self.inner.closure.borrow_mut() = Some(closure);
        }

        if let Some(ref closure) = *self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref().unchecked_ref());
            self.inner.frame_id.set(id);
        }
        log::debug!("pump started");
    }

    /// Cancels the pending frame. Can be restarted.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.frame_id.get());
        log::debug!("pump stopped");
    }

    pub fn is_running(&self) -> bool {
        self.inner.running.get()
    }
}

impl Drop for FramePump {
    fn drop(&mut self) {
        self.stop();
        // break the closure -> inner -> closure cycle
        self.inner.closure.borrow_mut().take();
    }
}

impl std::fmt::Debug for FramePump {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FramePump")
            .field("running", &self.inner.running.get())
            .field("frame_id", &self.inner.frame_id.get())
            .finish()
    }
}
