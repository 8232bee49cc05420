//! The swipe state machine.
//!
//! [`SwiperState`] owns the drag offset, the responder lock, and the deck
//! indexes, and drives the commit-or-cancel decision on release. It is a
//! cheap-clone handle: clones share the same underlying state, and
//! asynchronous animation completions hold only weak references guarded by a
//! mounted flag, so nothing runs against a torn-down widget.
//!
//! States cycle `idle → dragging → (committing | idle)`; a commit flings the
//! card off-screen, applies the index update, then resets back to idle. The
//! responder lock serializes gestures against an in-flight commit: grant,
//! move, and release events arriving while locked are inert.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use smallvec::SmallVec;
use swipedeck_animation::{Animatable, AnimationType, CompletionLatch, Easing, TweenSpec};
use swipedeck_core::RuntimeHandle;
use swipedeck_foundation::classifier::{classify, SwipeDirection};
use swipedeck_foundation::events::GestureEvent;
use swipedeck_foundation::geometry::Offset;
use swipedeck_foundation::gesture_constants::OFF_SCREEN_TRAVEL_FACTOR;

use crate::callbacks::SwiperCallbacks;
use crate::config::SwiperConfig;
use crate::deck::{card_indexes, CardIndexes};
use crate::error::{Result, SwiperError};
use crate::stack::StackSlots;

pub(crate) struct SwiperInner<T> {
    pub(crate) runtime: RuntimeHandle,
    pub(crate) config: SwiperConfig,
    pub(crate) deck: Vec<T>,
    /// Deck replacement that arrived while a commit was in flight; applied
    /// right after the commit's index update.
    pub(crate) pending_deck: Option<(Vec<T>, usize)>,
    pub(crate) indexes: CardIndexes,
    pub(crate) pan_x: Animatable<f32>,
    pub(crate) pan_y: Animatable<f32>,
    /// Accumulated origin of the drag. The displayed offset is always
    /// `drag_origin + pan`, so consecutive gestures compose instead of
    /// resetting the card to center.
    pub(crate) drag_origin: Offset,
    pub(crate) previous_card_x: Animatable<f32>,
    pub(crate) previous_card_y: Animatable<f32>,
    pub(crate) stack: StackSlots,
    pub(crate) responder_locked: bool,
    pub(crate) swiped_all: bool,
    pub(crate) slide_gesture: bool,
    pub(crate) is_swiping_back: bool,
    pub(crate) exit_history: SmallVec<[Offset; 4]>,
}

impl<T> SwiperInner<T> {
    pub(crate) fn flattened_offset(&self) -> Offset {
        Offset::new(
            self.drag_origin.x + self.pan_x.value(),
            self.drag_origin.y + self.pan_y.value(),
        )
    }

    /// Number of cards actually rendered behind the active one, walking the
    /// deck with wraparound in infinite mode and stopping at exhaustion
    /// otherwise.
    pub(crate) fn stacked_card_count(&self) -> usize {
        if !self.config.show_second_card || self.swiped_all {
            return 0;
        }
        let len = self.deck.len();
        let mut count = 0;
        let mut index = self.indexes.active;
        while count < self.config.stack_size.saturating_sub(1) {
            if index == len - 1 {
                if !self.config.infinite {
                    break;
                }
                index = 0;
            } else {
                index += 1;
            }
            count += 1;
        }
        count
    }
}

pub(crate) struct SwiperShared<T> {
    pub(crate) state: RefCell<SwiperInner<T>>,
    pub(crate) callbacks: RefCell<SwiperCallbacks<T>>,
    pub(crate) key_extractor: RefCell<Option<Box<dyn Fn(&T) -> String>>>,
    pub(crate) mounted: Cell<bool>,
}

/// The swipeable card-deck state holder.
pub struct SwiperState<T: Clone + 'static> {
    pub(crate) inner: Rc<SwiperShared<T>>,
}

enum ReleaseOutcome {
    Inert,
    Commit {
        direction: SwipeDirection,
        exit: Offset,
    },
    Cancel,
}

impl<T: Clone + 'static> SwiperState<T> {
    /// Creates the widget state over a non-empty deck.
    pub fn new(runtime: RuntimeHandle, cards: Vec<T>, config: SwiperConfig) -> Result<Self> {
        if cards.is_empty() {
            return Err(SwiperError::EmptyDeck);
        }
        if config.initial_index >= cards.len() {
            return Err(SwiperError::IndexOutOfRange {
                index: config.initial_index,
                len: cards.len(),
            });
        }

        let indexes = card_indexes(config.initial_index, cards.len());
        let previous_default = config.previous_card_default();
        let stack = StackSlots::new(
            runtime.clone(),
            config.stack_size,
            config.stack_separation,
            config.stack_scale_step,
            config.stack_spring,
        );

        let inner = SwiperInner {
            pan_x: Animatable::new(0.0, runtime.clone()),
            pan_y: Animatable::new(0.0, runtime.clone()),
            previous_card_x: Animatable::new(previous_default.x, runtime.clone()),
            previous_card_y: Animatable::new(previous_default.y, runtime.clone()),
            drag_origin: Offset::ZERO,
            deck: cards,
            pending_deck: None,
            indexes,
            stack,
            responder_locked: false,
            swiped_all: false,
            slide_gesture: false,
            is_swiping_back: false,
            exit_history: SmallVec::new(),
            config,
            runtime,
        };

        Ok(Self {
            inner: Rc::new(SwiperShared {
                state: RefCell::new(inner),
                callbacks: RefCell::new(SwiperCallbacks::default()),
                key_extractor: RefCell::new(None),
                mounted: Cell::new(true),
            }),
        })
    }

    /// Replaces the whole callback set.
    pub fn set_callbacks(&self, callbacks: SwiperCallbacks<T>) {
        *self.inner.callbacks.borrow_mut() = callbacks;
    }

    /// Edits the callback set in place.
    pub fn configure_callbacks(&self, configure: impl FnOnce(&mut SwiperCallbacks<T>)) {
        configure(&mut self.inner.callbacks.borrow_mut());
    }

    pub fn set_key_extractor(&self, extractor: impl Fn(&T) -> String + 'static) {
        *self.inner.key_extractor.borrow_mut() = Some(Box::new(extractor));
    }

    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.get()
    }

    /// Feeds one gesture event through the state machine.
    pub fn handle_event(&self, event: GestureEvent) {
        match event {
            GestureEvent::Start => self.grant(),
            GestureEvent::Move { delta } => self.drag_by(delta.x, delta.y),
            GestureEvent::End | GestureEvent::Cancel => self.release(),
        }
    }

    /// Gesture start: captures the current offset as the new drag origin and
    /// zeroes the instantaneous offset. Inert while a commit is in flight,
    /// because the fling animation owns the pan values.
    pub fn grant(&self) {
        if !self.is_mounted() {
            return;
        }
        self.invoke_simple(|c| &mut c.on_drag_start);
        let pan = {
            let mut state = self.inner.state.borrow_mut();
            if state.responder_locked {
                return;
            }
            state.drag_origin = state.flattened_offset();
            (state.pan_x.clone(), state.pan_y.clone())
        };
        // snap_to notifies listeners synchronously, so the state borrow must
        // be released first.
        pan.0.snap_to(0.0);
        pan.1.snap_to(0.0);
    }

    /// Accumulates a drag delta, gated per axis by configuration.
    pub fn drag_by(&self, dx: f32, dy: f32) {
        if !self.is_mounted() {
            return;
        }
        let moved = {
            let state = self.inner.state.borrow();
            if state.responder_locked {
                None
            } else {
                let dx = if state.config.horizontal_swipe { dx } else { 0.0 };
                let dy = if state.config.vertical_swipe { dy } else { 0.0 };
                Some((state.pan_x.clone(), state.pan_y.clone(), dx, dy))
            }
        };
        let Some((pan_x, pan_y, dx, dy)) = moved else {
            return;
        };
        pan_x.snap_to(pan_x.value() + dx);
        pan_y.snap_to(pan_y.value() + dy);

        let flat = {
            let mut state = self.inner.state.borrow_mut();
            let flat = state.flattened_offset();
            if flat.x.abs() > state.config.tap_dead_zone || flat.y.abs() > state.config.tap_dead_zone
            {
                state.slide_gesture = true;
            }
            flat
        };
        self.invoke_swiping(flat.x, flat.y);
    }

    /// Gesture end: decides commit or cancel, and detects taps.
    pub fn release(&self) {
        if !self.is_mounted() {
            return;
        }
        self.invoke_simple(|c| &mut c.on_drag_end);

        let (outcome, tap_index) = {
            let mut state = self.inner.state.borrow_mut();
            if state.responder_locked {
                // Late release for a gesture whose commit is already flying;
                // only the accumulated origin needs clearing.
                state.drag_origin = Offset::ZERO;
                (ReleaseOutcome::Inert, None)
            } else {
                let flat = state.flattened_offset();
                let direction = classify(flat.x, flat.y, state.config.commit_thresholds());
                let outcome = match direction {
                    Some(direction) if state.config.direction_enabled(direction) => {
                        ReleaseOutcome::Commit {
                            direction,
                            exit: flat,
                        }
                    }
                    _ => ReleaseOutcome::Cancel,
                };
                let tap_index = if !state.slide_gesture && !state.swiped_all {
                    Some(state.indexes.active)
                } else {
                    None
                };
                state.slide_gesture = false;
                (outcome, tap_index)
            }
        };

        match outcome {
            ReleaseOutcome::Inert => {}
            ReleaseOutcome::Commit { direction, exit } => {
                self.swipe_card(Some(direction), exit, false)
            }
            ReleaseOutcome::Cancel => self.reset_top_card(),
        }

        if let Some(index) = tap_index {
            self.invoke_tap(index);
        }
    }

    /// Cancel path: spring the card back to center.
    fn reset_top_card(&self) {
        let (pan_x, pan_y, flat, spring) = {
            let mut state = self.inner.state.borrow_mut();
            let flat = state.flattened_offset();
            state.drag_origin = Offset::ZERO;
            (
                state.pan_x.clone(),
                state.pan_y.clone(),
                flat,
                state.config.reset_spring,
            )
        };
        // Fold the accumulated origin into the instantaneous values so the
        // spring runs over the full displayed offset.
        pan_x.snap_to(flat.x);
        pan_y.snap_to(flat.y);
        pan_x.animate_to(0.0, AnimationType::Spring(spring));
        pan_y.animate_to(0.0, AnimationType::Spring(spring));
        self.invoke_simple(|c| &mut c.on_swipe_aborted);
    }

    /// Commit path: lock, shift the stack, fling off-screen, then apply the
    /// index update from the animation completion.
    pub(crate) fn swipe_card(
        &self,
        direction: Option<SwipeDirection>,
        exit: Offset,
        force_index_decrement: bool,
    ) {
        let plan = {
            let mut state = self.inner.state.borrow_mut();
            if state.responder_locked || state.swiped_all {
                return;
            }
            state.responder_locked = true;
            let flat = state.flattened_offset();
            state.drag_origin = Offset::ZERO;
            (
                state.pan_x.clone(),
                state.pan_y.clone(),
                flat,
                state.config.swipe_animation_duration,
            )
        };
        self.animate_stack();

        let (pan_x, pan_y, flat, duration) = plan;
        pan_x.snap_to(flat.x);
        pan_y.snap_to(flat.y);

        let target = exit.scaled(OFF_SCREEN_TRAVEL_FACTOR);
        let tween = AnimationType::Tween(TweenSpec::new(duration, Easing::EaseInOut));
        let shared = Rc::downgrade(&self.inner);
        let latch = CompletionLatch::new(2, move || {
            if let Some(inner) = shared.upgrade() {
                if inner.mounted.get() {
                    SwiperState { inner }.finish_commit(direction, exit, force_index_decrement);
                }
            }
        });
        let latch_x = Rc::clone(&latch);
        pan_x.animate_to_with_end(target.x, tween, move || latch_x.arrive());
        pan_y.animate_to_with_end(target.y, tween, move || latch.arrive());
    }

    fn animate_stack(&self) {
        let state = self.inner.state.borrow();
        if !state.config.show_second_card || state.swiped_all {
            return;
        }
        // animate_to defers every notification to the frame clock, so it is
        // safe under the state borrow.
        let occupied = state.stacked_card_count();
        state.stack.shift_forward(occupied);
    }

    fn finish_commit(
        &self,
        direction: Option<SwipeDirection>,
        exit: Offset,
        force_index_decrement: bool,
    ) {
        let must_decrement = {
            let mut state = self.inner.state.borrow_mut();
            state.exit_history.push(exit);
            force_index_decrement
                || direction
                    .map(|direction| state.config.goes_back(direction))
                    .unwrap_or(false)
        };
        if must_decrement {
            self.decrement_index(direction);
        } else {
            self.increment_index(direction);
        }
    }

    /// Advance past the swiped card, handling deck exhaustion.
    fn increment_index(&self, direction: Option<SwipeDirection>) {
        let (swiped_index, card) = {
            let state = self.inner.state.borrow();
            (
                state.indexes.active,
                state.deck[state.indexes.active].clone(),
            )
        };
        self.invoke_swiped(swiped_index, &card, direction);

        let (mut new_index, infinite) = {
            let state = self.inner.state.borrow();
            (state.indexes.active + 1, state.config.infinite)
        };
        let mut swiped_all = false;
        let deck_len = self.inner.state.borrow().deck.len();
        if new_index == deck_len {
            if infinite {
                new_index = 0;
            } else {
                // The collaborator may append more cards in response.
                let mut deck = std::mem::take(&mut self.inner.state.borrow_mut().deck);
                Self::take_and_call(&self.inner.callbacks, |c| &mut c.on_swiped_all, |cb| {
                    cb(&mut deck)
                });
                let len_after = deck.len();
                self.inner.state.borrow_mut().deck = deck;
                if new_index >= len_after {
                    swiped_all = true;
                    new_index = len_after;
                }
            }
        }
        self.set_card_index(new_index, swiped_all);
    }

    /// Go back to the previous card after a "goes back" commit.
    fn decrement_index(&self, direction: Option<SwipeDirection>) {
        let (swiped_index, card) = {
            let state = self.inner.state.borrow();
            (
                state.indexes.active,
                state.deck[state.indexes.active].clone(),
            )
        };
        self.invoke_swiped(swiped_index, &card, direction);

        let new_index = {
            let state = self.inner.state.borrow();
            if state.indexes.active == 0 {
                state.deck.len() - 1
            } else {
                state.indexes.active - 1
            }
        };
        self.set_card_index(new_index, false);
    }

    /// Applies an index update and resets the transient gesture state.
    ///
    /// `new_index == deck_len` together with `swiped_all` marks the exhausted
    /// deck; rewind and deck updates clear it.
    pub(crate) fn set_card_index(&self, new_index: usize, swiped_all: bool) {
        if !self.is_mounted() {
            return;
        }
        {
            let mut state = self.inner.state.borrow_mut();
            let deck_len = state.deck.len();
            state.indexes = card_indexes(new_index, deck_len);
            state.swiped_all = swiped_all;
            state.responder_locked = false;
        }
        self.reset_pan_and_previous();

        let pending = self.inner.state.borrow_mut().pending_deck.take();
        if let Some((cards, index)) = pending {
            self.apply_deck(cards, index);
        }
    }

    fn reset_pan_and_previous(&self) {
        let (pan_x, pan_y, prev_x, prev_y, previous_default, stack) = {
            let mut state = self.inner.state.borrow_mut();
            state.drag_origin = Offset::ZERO;
            (
                state.pan_x.clone(),
                state.pan_y.clone(),
                state.previous_card_x.clone(),
                state.previous_card_y.clone(),
                state.config.previous_card_default(),
                state.stack.clone(),
            )
        };
        pan_x.snap_to(0.0);
        pan_y.snap_to(0.0);
        prev_x.snap_to(previous_default.x);
        prev_y.snap_to(previous_default.y);
        stack.snap_to_rest();
    }

    /// Replaces the deck. While a commit is in flight the replacement is
    /// deferred until the commit's index update lands, so indexes cannot
    /// corrupt mid-swipe.
    pub fn set_cards(&self, cards: Vec<T>, new_index: Option<usize>) -> Result<()> {
        if cards.is_empty() {
            return Err(SwiperError::EmptyDeck);
        }
        let index = new_index.unwrap_or_else(|| self.inner.state.borrow().config.initial_index);
        if index >= cards.len() {
            return Err(SwiperError::IndexOutOfRange {
                index,
                len: cards.len(),
            });
        }
        let locked = self.inner.state.borrow().responder_locked;
        if locked {
            log::debug!("deck update deferred until the in-flight swipe completes");
            self.inner.state.borrow_mut().pending_deck = Some((cards, index));
        } else {
            self.apply_deck(cards, index);
        }
        Ok(())
    }

    fn apply_deck(&self, cards: Vec<T>, index: usize) {
        let mut state = self.inner.state.borrow_mut();
        state.deck = cards;
        state.indexes = card_indexes(index, state.deck.len());
        state.swiped_all = false;
        state.responder_locked = false;
        state.slide_gesture = false;
    }

    /// Marks the widget as gone: pending animation completions become no-ops
    /// and every value listener detaches.
    pub fn unmount(&self) {
        self.inner.mounted.set(false);
        let (values, stack) = {
            let state = self.inner.state.borrow();
            (
                [
                    state.pan_x.clone(),
                    state.pan_y.clone(),
                    state.previous_card_x.clone(),
                    state.previous_card_y.clone(),
                ],
                state.stack.clone(),
            )
        };
        for value in values {
            value.stop();
            value.clear_listeners();
        }
        stack.teardown();
    }

    // ---- callback plumbing ----------------------------------------------

    /// Takes a callback out of its slot, calls it, and puts it back unless
    /// the callback replaced itself meanwhile. Keeps user code running with
    /// no internal borrow held.
    fn take_and_call<F: ?Sized>(
        callbacks: &RefCell<SwiperCallbacks<T>>,
        pick: fn(&mut SwiperCallbacks<T>) -> &mut Option<Box<F>>,
        call: impl FnOnce(&mut Box<F>),
    ) {
        let taken = pick(&mut callbacks.borrow_mut()).take();
        if let Some(mut callback) = taken {
            call(&mut callback);
            let mut guard = callbacks.borrow_mut();
            let slot = pick(&mut guard);
            if slot.is_none() {
                *slot = Some(callback);
            }
        }
    }

    fn invoke_simple(&self, pick: fn(&mut SwiperCallbacks<T>) -> &mut Option<Box<dyn FnMut()>>) {
        Self::take_and_call(&self.inner.callbacks, pick, |cb| cb());
    }

    fn invoke_swiping(&self, x: f32, y: f32) {
        Self::take_and_call(&self.inner.callbacks, |c| &mut c.on_swiping, |cb| cb(x, y));
    }

    fn invoke_tap(&self, index: usize) {
        Self::take_and_call(&self.inner.callbacks, |c| &mut c.on_tap_card, |cb| cb(index));
    }

    /// Any-swipe callback first, direction-specific callback second; the
    /// caller applies the index update only after both have returned.
    fn invoke_swiped(&self, index: usize, card: &T, direction: Option<SwipeDirection>) {
        Self::take_and_call(&self.inner.callbacks, |c| &mut c.on_swiped, |cb| {
            cb(index, card)
        });
        let pick: fn(&mut SwiperCallbacks<T>) -> &mut Option<Box<dyn FnMut(usize, &T)>> =
            match direction {
                Some(SwipeDirection::Left) => |c| &mut c.on_swiped_left,
                Some(SwipeDirection::Right) => |c| &mut c.on_swiped_right,
                Some(SwipeDirection::Top) => |c| &mut c.on_swiped_top,
                Some(SwipeDirection::Bottom) => |c| &mut c.on_swiped_bottom,
                None => return,
            };
        Self::take_and_call(&self.inner.callbacks, pick, |cb| cb(index, card));
    }
}

impl<T: Clone + 'static> Clone for SwiperState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod tests;
