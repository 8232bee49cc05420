//! Notification callbacks exposed to the widget's collaborator.

/// Callbacks fired by [`SwiperState`](crate::SwiperState).
///
/// All are optional. For any committed swipe, `on_swiped` fires before the
/// direction-specific callback, and the index update is applied only after
/// both have returned. Callbacks may call back into the widget; they run with
/// no internal borrow held.
pub struct SwiperCallbacks<T> {
    /// Live drag offset, fired on every move.
    pub on_swiping: Option<Box<dyn FnMut(f32, f32)>>,
    /// Any committed swipe, with the index and card swiped away.
    pub on_swiped: Option<Box<dyn FnMut(usize, &T)>>,
    pub on_swiped_left: Option<Box<dyn FnMut(usize, &T)>>,
    pub on_swiped_right: Option<Box<dyn FnMut(usize, &T)>>,
    pub on_swiped_top: Option<Box<dyn FnMut(usize, &T)>>,
    pub on_swiped_bottom: Option<Box<dyn FnMut(usize, &T)>>,
    /// The deck is exhausted. Receives the deck mutably so more cards can be
    /// appended in response; the widget re-checks the length afterwards. The
    /// callback must leave at least one card in place.
    pub on_swiped_all: Option<Box<dyn FnMut(&mut Vec<T>)>>,
    /// A release fell short of the thresholds and the card sprang back.
    pub on_swipe_aborted: Option<Box<dyn FnMut()>>,
    /// A release that never left the dead zone, with the active index.
    pub on_tap_card: Option<Box<dyn FnMut(usize)>>,
    pub on_drag_start: Option<Box<dyn FnMut()>>,
    pub on_drag_end: Option<Box<dyn FnMut()>>,
}

impl<T> SwiperCallbacks<T> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T> Default for SwiperCallbacks<T> {
    fn default() -> Self {
        Self {
            on_swiping: None,
            on_swiped: None,
            on_swiped_left: None,
            on_swiped_right: None,
            on_swiped_top: None,
            on_swiped_bottom: None,
            on_swiped_all: None,
            on_swipe_aborted: None,
            on_tap_card: None,
            on_drag_start: None,
            on_drag_end: None,
        }
    }
}
