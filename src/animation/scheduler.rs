//! Frame schedulers and clocks
//!
//! [`ManualScheduler`] and [`ManualClock`] make animations deterministic:
//! the host (or a test) advances time and pumps frames explicitly.

use crate::traits::{Clock, FrameCallback, FrameHandle, FrameScheduler};
use instant::Instant;
use std::cell::{Cell, RefCell};

/// Queue of frame callbacks run when the host calls [`ManualScheduler::run_frame`]
#[derive(Default)]
pub struct ManualScheduler {
    next_handle: Cell<u64>,
    queue: RefCell<Vec<(FrameHandle, FrameCallback)>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs every callback queued before this call. Callbacks requested while
    /// running wait for the next frame. Returns how many callbacks ran.
    pub fn run_frame(&self) -> usize {
        let batch = std::mem::take(&mut *self.queue.borrow_mut());
        let count = batch.len();
        for (_, callback) in batch {
            callback();
        }
        count
    }

    /// Number of callbacks waiting for the next frame
    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
        let handle = FrameHandle(self.next_handle.get());
        self.next_handle.set(handle.0 + 1);
        self.queue.borrow_mut().push((handle, callback));
        handle
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        self.queue.borrow_mut().retain(|(queued, _)| *queued != handle);
    }
}

/// Clock whose time only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.now.get()
    }
}

/// Wall clock measured from its creation
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

#[cfg(feature = "wasm")]
pub use web::{AnimationFrameScheduler, PerformanceClock};

#[cfg(feature = "wasm")]
mod web {
    use super::*;
    use wasm_bindgen::{closure::Closure, JsCast};

    /// Schedules frames with `window.requestAnimationFrame`
    pub struct AnimationFrameScheduler {
        window: web_sys::Window,
    }

    impl AnimationFrameScheduler {
        /// Returns `None` outside a browser window context
        pub fn new() -> Option<Self> {
            web_sys::window().map(|window| Self { window })
        }
    }

    impl FrameScheduler for AnimationFrameScheduler {
        fn request_frame(&self, callback: FrameCallback) -> FrameHandle {
            let closure = Closure::once_into_js(move || callback());
            match self
                .window
                .request_animation_frame(closure.unchecked_ref::<js_sys::Function>())
            {
                Ok(id) => FrameHandle(id as u32 as u64),
                Err(err) => {
                    log::error!("requestAnimationFrame failed: {:?}", err);
                    FrameHandle(0)
                }
            }
        }

        fn cancel_frame(&self, handle: FrameHandle) {
            if let Err(err) = self.window.cancel_animation_frame(handle.0 as u32 as i32) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
    }

    /// Reads `performance.now()`
    pub struct PerformanceClock {
        performance: web_sys::Performance,
    }

    impl PerformanceClock {
        pub fn new() -> Option<Self> {
            web_sys::window()
                .and_then(|window| window.performance())
                .map(|performance| Self { performance })
        }
    }

    impl Clock for PerformanceClock {
        fn now(&self) -> f64 {
            self.performance.now()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_manual_scheduler_runs_queued_callbacks_once() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        scheduler.request_frame(Box::new(move || counter.set(counter.get() + 1)));
        assert_eq!(scheduler.pending(), 1);

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn test_manual_scheduler_cancel() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));

        let counter = hits.clone();
        let handle = scheduler.request_frame(Box::new(move || counter.set(counter.get() + 1)));
        scheduler.cancel_frame(handle);

        assert_eq!(scheduler.run_frame(), 0);
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_callbacks_requested_during_a_frame_wait() {
        let scheduler = Rc::new(ManualScheduler::new());
        let inner = scheduler.clone();
        scheduler.request_frame(Box::new(move || {
            inner.request_frame(Box::new(|| {}));
        }));

        assert_eq!(scheduler.run_frame(), 1);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(100.0);
        clock.advance(16.0);
        assert_eq!(clock.now(), 116.0);
        clock.set(0.0);
        assert_eq!(clock.now(), 0.0);
    }
}
