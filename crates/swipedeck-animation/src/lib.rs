//! Animation driver for Swipedeck.
//!
//! Scalar values animate through timed tweens or spring physics, advanced by
//! the runtime's frame clock. Completion is delivered through one-shot
//! callbacks; chained sequences (fling off-screen, then advance the deck) are
//! built by nesting those callbacks, and simultaneous animations share a
//! [`CompletionLatch`].

pub mod animation;
pub mod latch;

pub use animation::{
    Animatable, AnimationType, Easing, Lerp, SpringScalar, SpringSpec, TweenSpec,
};
pub use latch::CompletionLatch;
