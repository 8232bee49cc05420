//! Core runtime services for Swipedeck.
//!
//! Everything here is single-threaded and event-driven: state transitions
//! happen on the host's UI queue, and animations advance through frame
//! callbacks drained by the host (or by tests, deterministically).

pub mod frame_clock;
pub mod runtime;
pub mod subscription;

pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use runtime::{DefaultScheduler, FrameCallbackId, Runtime, RuntimeHandle, RuntimeScheduler};
pub use subscription::{SubscriptionId, Subscriptions};
