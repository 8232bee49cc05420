//! Robot-style testing harness for Swipedeck.
//!
//! [`SwiperRobot`] owns a runtime and a widget state, performs gestures the
//! way a pointer would (granular move steps, then release), and steps frames
//! deterministically so tests can observe every phase of a swipe.

pub mod assertions;
pub mod robot;

pub use assertions::{assert_approx_eq, assert_offset_approx_eq};
pub use robot::SwiperRobot;
