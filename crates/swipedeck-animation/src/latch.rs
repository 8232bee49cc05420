//! Shared completion for animations that run in parallel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Countdown latch joining several animation completions into one.
///
/// Create it with the number of animations about to start and hand each of
/// them an `arrive` call as its completion; the joined callback fires exactly
/// once, when the last animation settles. Arrivals past the count are ignored.
pub struct CompletionLatch {
    remaining: Cell<usize>,
    on_done: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl CompletionLatch {
    pub fn new(count: usize, on_done: impl FnOnce() + 'static) -> Rc<Self> {
        let latch = Rc::new(Self {
            remaining: Cell::new(count),
            on_done: RefCell::new(Some(Box::new(on_done))),
        });
        if count == 0 {
            latch.fire();
        }
        latch
    }

    pub fn arrive(&self) {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return;
        }
        self.remaining.set(remaining - 1);
        if remaining == 1 {
            self.fire();
        }
    }

    fn fire(&self) {
        if let Some(on_done) = self.on_done.borrow_mut().take() {
            on_done();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_after_last_arrival() {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = Rc::clone(&fired);
        let latch = CompletionLatch::new(2, move || fired_clone.set(true));

        latch.arrive();
        assert!(!fired.get());
        latch.arrive();
        assert!(fired.get());
    }

    #[test]
    fn fires_at_most_once() {
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let latch = CompletionLatch::new(1, move || count_clone.set(count_clone.get() + 1));

        latch.arrive();
        latch.arrive();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn zero_count_fires_immediately() {
        let fired = Rc::new(Cell::new(false));
        let fired_clone = Rc::clone(&fired);
        let _latch = CompletionLatch::new(0, move || fired_clone.set(true));
        assert!(fired.get());
    }
}
