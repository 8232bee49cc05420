//! Programmatic gesture driver for a [`SwiperState`].

use swipedeck_core::Runtime;
use swipedeck_foundation::events::GestureEvent;
use swipedeck_foundation::geometry::Offset;
use swipedeck_ui::{Result, SwiperConfig, SwiperState};

/// Frame period used when stepping time, ~60 FPS.
pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound of frames [`SwiperRobot::settle`] will step before giving up,
/// so a runaway animation fails the test instead of hanging it.
const SETTLE_FRAME_LIMIT: u32 = 4_000;

/// Drives a swiper with synthetic gestures and deterministic frame time.
pub struct SwiperRobot<T: Clone + 'static> {
    runtime: Runtime,
    state: SwiperState<T>,
    time_nanos: u64,
}

impl<T: Clone + 'static> SwiperRobot<T> {
    /// Builds a runtime and widget state over the given deck.
    pub fn new(cards: Vec<T>, config: SwiperConfig) -> Result<Self> {
        let runtime = Runtime::default();
        let state = SwiperState::new(runtime.handle(), cards, config)?;
        Ok(Self {
            runtime,
            state,
            time_nanos: 0,
        })
    }

    pub fn state(&self) -> &SwiperState<T> {
        &self.state
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    /// Performs a full drag to `(dx, dy)` in smooth steps, without releasing.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        self.drag_in_steps(dx, dy, 10);
    }

    pub fn drag_in_steps(&mut self, dx: f32, dy: f32, steps: u32) {
        self.state.handle_event(GestureEvent::Start);
        for _ in 0..steps.max(1) {
            let delta = Offset::new(dx / steps.max(1) as f32, dy / steps.max(1) as f32);
            self.state.handle_event(GestureEvent::Move { delta });
            self.advance_frames(1);
        }
    }

    pub fn release(&mut self) {
        self.state.handle_event(GestureEvent::End);
    }

    /// Drag, release, and settle every animation the release started.
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        self.drag(dx, dy);
        self.release();
        self.settle();
    }

    /// A press-and-release that never leaves the dead zone.
    pub fn tap(&mut self) {
        self.state.handle_event(GestureEvent::Start);
        self.state.handle_event(GestureEvent::Move {
            delta: Offset::new(1.0, 0.0),
        });
        self.state.handle_event(GestureEvent::End);
        self.settle();
    }

    /// Steps the frame clock by whole frames.
    pub fn advance_frames(&mut self, frames: u32) {
        let handle = self.runtime.handle();
        for _ in 0..frames {
            self.time_nanos += FRAME_NANOS;
            handle.drain_frame_callbacks(self.time_nanos);
        }
    }

    /// Steps frames until no animation wants another one.
    pub fn settle(&mut self) {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while handle.has_frame_callbacks() {
            self.advance_frames(1);
            frames += 1;
            assert!(
                frames < SETTLE_FRAME_LIMIT,
                "animations did not settle within {} frames",
                SETTLE_FRAME_LIMIT
            );
        }
    }
}
