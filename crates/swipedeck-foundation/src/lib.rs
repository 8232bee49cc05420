//! Input-side primitives for Swipedeck: geometry, gesture events, shared
//! gesture constants, and the pure swipe-direction classifier.

pub mod classifier;
pub mod events;
pub mod geometry;
pub mod gesture_constants;

pub use classifier::{classify, SwipeDirection, SwipeThresholds};
pub use events::{GestureEvent, GesturePhase};
pub use geometry::{Offset, Rect, Size};
