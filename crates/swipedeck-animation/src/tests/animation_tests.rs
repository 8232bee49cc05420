use super::*;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use swipedeck_core::Runtime;

const FRAME_NANOS: u64 = 16_666_667; // ~60 FPS

fn drive_frames(runtime: &Runtime, frames: u32) -> u64 {
    let handle = runtime.handle();
    let mut time = 0u64;
    for _ in 0..frames {
        time += FRAME_NANOS;
        handle.drain_frame_callbacks(time);
    }
    time
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::Linear.transform(0.0), 0.0);
    assert_eq!(Easing::Linear.transform(0.5), 0.5);
    assert_eq!(Easing::Linear.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::Linear,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowIn,
    ];

    for easing in easings {
        let start = easing.transform(0.0);
        let end = easing.transform(1.0);
        assert!(
            (start - 0.0).abs() < 0.01,
            "Start should be ~0 for {:?}",
            easing
        );
        assert!((end - 1.0).abs() < 0.01, "End should be ~1 for {:?}", easing);
    }
}

#[test]
fn tween_spec_default_matches_card_travel() {
    let spec = TweenSpec::default();
    assert_eq!(spec.duration_millis, 350);
    assert_eq!(spec.easing, Easing::FastOutSlowIn);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn spring_spec_default_is_under_damped() {
    let spec = SpringSpec::default();
    assert_eq!(spec.friction, 7.0);
    assert_eq!(spec.tension, 40.0);
    // Damping ratio friction / (2 * sqrt(tension)) stays below critical.
    assert!(spec.friction < 2.0 * spec.tension.sqrt());
}

#[test]
fn tween_interpolates_and_reaches_target() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    value.animate_to(100.0, AnimationType::Tween(TweenSpec::linear(160)));

    let samples = Rc::new(RefCell::new(Vec::new()));
    let samples_clone = Rc::clone(&samples);
    value.add_listener(move |v| samples_clone.borrow_mut().push(*v));

    drive_frames(&runtime, 20);

    let samples = samples.borrow();
    assert!(
        samples.iter().any(|v| *v > 0.0 && *v < 100.0),
        "tween should report intermediate values, got {:?}",
        samples
    );
    assert_eq!(value.value(), 100.0);
    assert!(!value.is_running());
}

#[test]
fn tween_completion_fires_exactly_once() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    let completions = Rc::new(Cell::new(0u32));
    let completions_clone = Rc::clone(&completions);

    value.animate_to_with_end(50.0, AnimationType::Tween(TweenSpec::linear(100)), move || {
        completions_clone.set(completions_clone.get() + 1);
    });

    drive_frames(&runtime, 30);
    assert_eq!(completions.get(), 1);
}

#[test]
fn interrupted_animation_drops_completion() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    let stale_fired = Rc::new(Cell::new(false));
    let stale_clone = Rc::clone(&stale_fired);

    value.animate_to_with_end(100.0, AnimationType::Tween(TweenSpec::linear(500)), move || {
        stale_clone.set(true);
    });
    drive_frames(&runtime, 3);

    // Interrupt mid-flight; the first completion must never fire.
    value.animate_to(-100.0, AnimationType::Tween(TweenSpec::linear(100)));
    drive_frames(&runtime, 30);

    assert!(!stale_fired.get());
    assert_eq!(value.value(), -100.0);
}

#[test]
fn snap_to_cancels_and_notifies() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    let last_seen = Rc::new(Cell::new(f32::NAN));
    let last_clone = Rc::clone(&last_seen);
    value.add_listener(move |v| last_clone.set(*v));

    value.animate_to(100.0, AnimationType::Tween(TweenSpec::linear(500)));
    value.snap_to(25.0);

    drive_frames(&runtime, 5);
    assert_eq!(value.value(), 25.0);
    assert_eq!(last_seen.get(), 25.0);
    assert!(!value.is_running());
}

#[test]
fn spring_settles_exactly_on_target() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    value.animate_to(200.0, AnimationType::Spring(SpringSpec::default()));

    // Default spring is under-damped; give it a few simulated seconds.
    drive_frames(&runtime, 600);

    assert_eq!(value.value(), 200.0);
    assert!(!value.is_running());
}

#[test]
fn spring_overshoots_before_settling() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    let peak = Rc::new(Cell::new(0.0f32));
    let peak_clone = Rc::clone(&peak);
    value.add_listener(move |v| {
        if *v > peak_clone.get() {
            peak_clone.set(*v);
        }
    });

    value.animate_to(100.0, AnimationType::Spring(SpringSpec::default()));
    drive_frames(&runtime, 600);

    assert!(
        peak.get() > 100.0,
        "under-damped spring should overshoot, peaked at {}",
        peak.get()
    );
}

#[test]
fn removed_listener_stops_observing() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    let count = Rc::new(Cell::new(0u32));
    let count_clone = Rc::clone(&count);
    let id = value.add_listener(move |_| count_clone.set(count_clone.get() + 1));

    value.snap_to(1.0);
    value.remove_listener(id);
    value.snap_to(2.0);

    assert_eq!(count.get(), 1);
}

#[test]
fn dropping_runtime_halts_animation_silently() {
    let runtime = Runtime::default();
    let value = Animatable::new(0.0f32, runtime.handle());
    let completed = Rc::new(Cell::new(false));
    let completed_clone = Rc::clone(&completed);
    value.animate_to_with_end(100.0, AnimationType::Tween(TweenSpec::linear(100)), move || {
        completed_clone.set(true);
    });

    let handle = runtime.handle();
    drop(runtime);
    handle.drain_frame_callbacks(FRAME_NANOS);

    assert!(!completed.get());
    assert_eq!(value.value(), 0.0);
}
