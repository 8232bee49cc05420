//! Queries the render collaborator paints from.
//!
//! The widget never draws; the host iterates [`SwiperState::stack_entries`],
//! offsets the active card by [`SwiperState::card_offset`], and selects an
//! overlay label from [`SwiperState::overlay_direction`].

use swipedeck_core::RuntimeHandle;
use swipedeck_foundation::classifier::{classify, SwipeDirection};
use swipedeck_foundation::geometry::{Offset, Rect};

use crate::deck::CardIndexes;
use crate::state::SwiperState;

/// One card of the rendered stack, front to back.
#[derive(Clone, Debug, PartialEq)]
pub struct StackEntry {
    pub card_index: usize,
    /// 0 is the active card; deeper entries recede.
    pub depth: usize,
    pub vertical_offset: f32,
    pub scale: f32,
}

impl<T: Clone + 'static> SwiperState<T> {
    pub fn runtime(&self) -> RuntimeHandle {
        self.inner.state.borrow().runtime.clone()
    }

    /// Displayed offset of the active card: accumulated origin plus the
    /// instantaneous pan.
    pub fn card_offset(&self) -> Offset {
        self.inner.state.borrow().flattened_offset()
    }

    /// Which overlay label the current drag selects, if any. Derived from
    /// the live offset against the overlay thresholds; never stored.
    pub fn overlay_direction(&self) -> Option<SwipeDirection> {
        let state = self.inner.state.borrow();
        let flat = state.flattened_offset();
        classify(flat.x, flat.y, state.config.overlay_thresholds())
    }

    pub fn indexes(&self) -> CardIndexes {
        self.inner.state.borrow().indexes
    }

    pub fn active_index(&self) -> usize {
        self.inner.state.borrow().indexes.active
    }

    pub fn deck_len(&self) -> usize {
        self.inner.state.borrow().deck.len()
    }

    pub fn card(&self, index: usize) -> Option<T> {
        self.inner.state.borrow().deck.get(index).cloned()
    }

    /// True once the deck has been exhausted; the stack renders empty until
    /// cards are appended or the index is reset.
    pub fn has_swiped_all(&self) -> bool {
        self.inner.state.borrow().swiped_all
    }

    /// True while a commit's off-screen fling is still running.
    pub fn is_locked(&self) -> bool {
        self.inner.state.borrow().responder_locked
    }

    pub fn is_swiping_back(&self) -> bool {
        self.inner.state.borrow().is_swiping_back
    }

    /// Current position of the rewind card visual.
    pub fn previous_card_offset(&self) -> Offset {
        let state = self.inner.state.borrow();
        Offset::new(
            state.previous_card_x.value(),
            state.previous_card_y.value(),
        )
    }

    pub fn shows_swipe_back_card(&self) -> bool {
        self.inner.state.borrow().config.show_swipe_back_card
    }

    /// Frame of the active card inside the host window.
    pub fn card_layout(&self) -> Rect {
        self.inner.state.borrow().config.card_layout()
    }

    /// Render key for a card: the configured extractor, or the index.
    pub fn card_key(&self, index: usize) -> String {
        let extractor = self.inner.key_extractor.borrow();
        match (extractor.as_ref(), self.inner.state.borrow().deck.get(index)) {
            (Some(extract), Some(card)) => extract(card),
            _ => index.to_string(),
        }
    }

    /// The stack to paint, active card first, walking the deck with
    /// wraparound in infinite mode. Empty once the deck is exhausted.
    pub fn stack_entries(&self) -> Vec<StackEntry> {
        let state = self.inner.state.borrow();
        let mut entries = Vec::new();
        if state.swiped_all {
            return entries;
        }

        let len = state.deck.len();
        let mut index = state.indexes.active;
        let mut depth = 0;
        while depth < state.config.stack_size && (depth == 0 || state.config.show_second_card) {
            let (vertical_offset, scale) = if depth == 0 {
                (0.0, 1.0)
            } else {
                state.stack.current(depth - 1)
            };
            entries.push(StackEntry {
                card_index: index,
                depth,
                vertical_offset,
                scale,
            });

            if index == len - 1 {
                if !state.config.infinite {
                    break;
                }
                index = 0;
            } else {
                index += 1;
            }
            depth += 1;
        }
        entries
    }
}
