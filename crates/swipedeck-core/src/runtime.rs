use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

pub type FrameCallbackId = u64;

/// Host hook for waking the event loop when a new frame is needed.
///
/// The runtime never sleeps or spins on its own; it only records that work is
/// pending and asks the scheduler for a frame. Hosts drive the actual frames
/// by calling [`RuntimeHandle::drain_frame_callbacks`] with the frame time.
pub trait RuntimeScheduler: Send + Sync {
    fn schedule_frame(&self);
}

/// Scheduler that does nothing. Suitable for tests and for hosts that poll
/// [`Runtime::needs_frame`] themselves.
#[derive(Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}

pub(crate) struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Arc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
}

impl RuntimeInner {
    fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks
            .borrow_mut()
            .push_back(FrameCallbackEntry {
                id,
                callback: Some(callback),
            });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() {
            self.needs_frame.set(false);
        }
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        // Take the current batch before running it: callbacks re-register for
        // the next frame while we iterate, and those must not fire this frame.
        let mut callbacks = self.frame_callbacks.borrow_mut();
        let mut pending: Vec<Box<dyn FnOnce(u64) + 'static>> = Vec::with_capacity(callbacks.len());
        while let Some(mut entry) = callbacks.pop_front() {
            if let Some(callback) = entry.callback.take() {
                pending.push(callback);
            }
        }
        drop(callbacks);
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() {
            self.needs_frame.set(false);
        }
    }
}

/// Owner of the frame-callback queue. Keep one per widget host; hand out
/// [`RuntimeHandle`]s to everything that animates.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> crate::FrameClock {
        crate::FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Arc::new(DefaultScheduler))
    }
}

/// Weak handle onto a [`Runtime`]. Every operation degrades to a no-op once
/// the runtime is gone, so animation completions scheduled before teardown
/// cannot resurrect state.
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn schedule(&self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.schedule();
        }
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.inner
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Runs every callback queued for this frame with the given timestamp.
    ///
    /// Hosts call this once per vsync; tests call it with synthetic times to
    /// step animations deterministically.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.inner.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn frame_clock(&self) -> crate::FrameClock {
        crate::FrameClock::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn callbacks_fire_with_frame_time() {
        let runtime = Runtime::default();
        let handle = runtime.handle();
        let seen = Rc::new(Cell::new(0u64));
        let seen_clone = Rc::clone(&seen);

        handle
            .register_frame_callback(move |time| seen_clone.set(time))
            .expect("runtime alive");
        assert!(runtime.needs_frame());

        handle.drain_frame_callbacks(16_000_000);
        assert_eq!(seen.get(), 16_000_000);
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn callback_registered_during_drain_waits_for_next_frame() {
        let runtime = Runtime::default();
        let handle = runtime.handle();
        let count = Rc::new(Cell::new(0u32));

        let count_outer = Rc::clone(&count);
        let reregister = handle.clone();
        handle
            .register_frame_callback(move |_| {
                count_outer.set(count_outer.get() + 1);
                let count_inner = Rc::clone(&count_outer);
                let _ = reregister.register_frame_callback(move |_| {
                    count_inner.set(count_inner.get() + 1);
                });
            })
            .expect("runtime alive");

        handle.drain_frame_callbacks(0);
        assert_eq!(count.get(), 1);

        handle.drain_frame_callbacks(16_000_000);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn cancel_removes_pending_callback() {
        let runtime = Runtime::default();
        let handle = runtime.handle();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = Rc::clone(&fired);

        let id = handle
            .register_frame_callback(move |_| fired_clone.set(true))
            .expect("runtime alive");
        handle.cancel_frame_callback(id);
        handle.drain_frame_callbacks(0);

        assert!(!fired.get());
        assert!(!runtime.needs_frame());
    }

    #[test]
    fn dead_handle_is_inert() {
        let handle = {
            let runtime = Runtime::default();
            runtime.handle()
        };
        assert!(handle.register_frame_callback(|_| {}).is_none());
        assert!(!handle.has_frame_callbacks());
        handle.drain_frame_callbacks(0);
    }
}
