//! Programmatic control surface: directional swipes, rewind, index jumps.
//!
//! Directional calls re-enter the same commit path a real gesture release
//! takes, using the configured threshold magnitude as the exit vector, so
//! programmatic and gestural swipes are indistinguishable downstream.

use std::rc::Rc;

use swipedeck_animation::{AnimationType, CompletionLatch};
use swipedeck_foundation::classifier::SwipeDirection;
use swipedeck_foundation::geometry::{Offset, Size};
use swipedeck_foundation::gesture_constants::OFF_SCREEN_TRAVEL_FACTOR;

use crate::error::{Result, SwiperError};
use crate::state::SwiperState;

impl<T: Clone + 'static> SwiperState<T> {
    pub fn swipe_left(&self, force_index_decrement: bool) -> Result<()> {
        let horizontal = self.inner.state.borrow().config.commit_thresholds().horizontal;
        self.programmatic_swipe(
            SwipeDirection::Left,
            Offset::new(-horizontal, 0.0),
            force_index_decrement,
        )
    }

    pub fn swipe_right(&self, force_index_decrement: bool) -> Result<()> {
        let horizontal = self.inner.state.borrow().config.commit_thresholds().horizontal;
        self.programmatic_swipe(
            SwipeDirection::Right,
            Offset::new(horizontal, 0.0),
            force_index_decrement,
        )
    }

    pub fn swipe_top(&self, force_index_decrement: bool) -> Result<()> {
        let vertical = self.inner.state.borrow().config.commit_thresholds().vertical;
        self.programmatic_swipe(
            SwipeDirection::Top,
            Offset::new(0.0, -vertical),
            force_index_decrement,
        )
    }

    pub fn swipe_bottom(&self, force_index_decrement: bool) -> Result<()> {
        let vertical = self.inner.state.borrow().config.commit_thresholds().vertical;
        self.programmatic_swipe(
            SwipeDirection::Bottom,
            Offset::new(0.0, vertical),
            force_index_decrement,
        )
    }

    fn programmatic_swipe(
        &self,
        direction: SwipeDirection,
        vector: Offset,
        force_index_decrement: bool,
    ) -> Result<()> {
        if !vector.is_finite() {
            return Err(SwiperError::DegenerateVector {
                x: vector.x,
                y: vector.y,
            });
        }
        if !self.is_mounted() {
            return Ok(());
        }
        // Inert while a commit is already in flight; the responder lock is
        // checked inside the shared commit path.
        self.swipe_card(Some(direction), vector, force_index_decrement);
        Ok(())
    }

    /// Rewinds the most recent commit: replays its exit vector in reverse and
    /// restores the previous card.
    pub fn swipe_back(&self) {
        self.swipe_back_with(|_, _| {});
    }

    /// Rewind with a completion callback receiving the restored card's index
    /// and value.
    pub fn swipe_back_with(&self, on_complete: impl FnOnce(usize, &T) + 'static) {
        if !self.is_mounted() {
            return;
        }
        let plan = {
            let mut state = self.inner.state.borrow_mut();
            if state.is_swiping_back || state.responder_locked {
                return;
            }
            let vector = match state.exit_history.pop() {
                Some(vector) => vector,
                // An infinite deck can always rewind; fall back to the
                // configured off-screen default position.
                None if state.config.infinite => state.config.previous_card_default(),
                None => return,
            };
            state.is_swiping_back = true;
            (
                state.previous_card_x.clone(),
                state.previous_card_y.clone(),
                vector,
                state.config.stack_spring,
            )
        };
        let (prev_x, prev_y, vector, spring) = plan;

        let start = vector.scaled(OFF_SCREEN_TRAVEL_FACTOR);
        prev_x.snap_to(start.x);
        prev_y.snap_to(start.y);

        let shared = Rc::downgrade(&self.inner);
        let latch = CompletionLatch::new(2, move || {
            if let Some(inner) = shared.upgrade() {
                if inner.mounted.get() {
                    SwiperState { inner }.finish_swipe_back(on_complete);
                }
            }
        });
        let latch_x = Rc::clone(&latch);
        prev_x.animate_to_with_end(0.0, AnimationType::Spring(spring), move || latch_x.arrive());
        prev_y.animate_to_with_end(0.0, AnimationType::Spring(spring), move || latch.arrive());
    }

    fn finish_swipe_back(&self, on_complete: impl FnOnce(usize, &T)) {
        let new_index = {
            let mut state = self.inner.state.borrow_mut();
            state.is_swiping_back = false;
            if state.indexes.active == 0 {
                state.deck.len() - 1
            } else {
                state.indexes.active - 1
            }
        };
        self.set_card_index(new_index, false);
        let card = self.inner.state.borrow().deck[new_index].clone();
        on_complete(new_index, &card);
    }

    /// Jumps straight to a card: no animation, no callbacks. Out-of-range
    /// targets are refused; jumps during an in-flight commit are ignored.
    pub fn jump_to_index(&self, new_index: usize) -> Result<()> {
        {
            let state = self.inner.state.borrow();
            if new_index >= state.deck.len() {
                return Err(SwiperError::IndexOutOfRange {
                    index: new_index,
                    len: state.deck.len(),
                });
            }
            if state.responder_locked {
                log::debug!("jump_to_index ignored while a swipe is in flight");
                return Ok(());
            }
        }
        self.set_card_index(new_index, false);
        Ok(())
    }

    /// Resizes the rendered stack, rebuilding the depth slots.
    pub fn set_stack_size(&self, stack_size: usize) {
        let mut state = self.inner.state.borrow_mut();
        state.config.stack_size = stack_size;
        state.stack.rebuild(stack_size);
    }

    /// Follows a host window resize; default thresholds and the off-screen
    /// rewind position track the new size.
    pub fn set_window_size(&self, window: Size) {
        self.inner.state.borrow_mut().config.window = window;
    }
}
