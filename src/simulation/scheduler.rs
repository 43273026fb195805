//! Frame-driven repeating task
//!
//! A [`RepeatingTask`] owns an injected tick function and runs it once per
//! frame callback. The host (a render loop, a headless driver, a test) decides
//! when frames happen; the task never looks at wall-clock time. Cancellation
//! is cooperative: a [`CancelHandle`] flag is checked before each tick, so an
//! in-progress tick always completes.

use std::cell::Cell;
use std::ops::ControlFlow;
use std::rc::Rc;

/// Shared cancel flag for a [`RepeatingTask`]
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Rc<Cell<bool>>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

pub struct RepeatingTask<F>
where
    F: FnMut() -> ControlFlow<()>,
{
    tick: F,
    cancel: CancelHandle,
    frames: u64, // ticks actually executed
}

impl<F> RepeatingTask<F>
where
    F: FnMut() -> ControlFlow<()>,
{
    pub fn new(tick: F) -> Self {
        Self {
            tick,
            cancel: CancelHandle::default(),
            frames: 0,
        }
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// One frame callback: run a single tick unless cancelled
    ///
    /// A tick returning `Break` cancels the task.
    pub fn on_frame(&mut self) -> ControlFlow<()> {
        if self.cancel.is_cancelled() {
            return ControlFlow::Break(());
        }
        self.frames += 1;
        let flow = (self.tick)();
        if flow.is_break() {
            self.cancel.cancel();
        }
        flow
    }

    /// Deliver up to `max_frames` frame callbacks, stopping early on cancel
    /// Returns the number of ticks executed by this call.
    pub fn run_frames(&mut self, max_frames: u64) -> u64 {
        let start = self.frames;
        for _ in 0..max_frames {
            if self.on_frame().is_break() {
                break;
            }
        }
        self.frames - start
    }
}
