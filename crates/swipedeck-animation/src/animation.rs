//! Tween and spring animation of scalar values.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use swipedeck_core::{
    FrameCallbackRegistration, RuntimeHandle, SubscriptionId, Subscriptions,
};

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

/// Trait for values that can participate in spring animations.
pub trait SpringScalar: Lerp + Clone {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Progress of `current` along the start→target travel, as a fraction.
    fn travel_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let start_val = start.to_f32();
        let target_val = target.to_f32();
        let current_val = current.to_f32();

        if (target_val - start_val).abs() < f32::EPSILON {
            1.0
        } else {
            (current_val - start_val) / (target_val - start_val)
        }
    }
}

impl SpringScalar for f32 {
    fn to_f32(&self) -> f32 {
        *self
    }
}

impl SpringScalar for f64 {
    fn to_f32(&self) -> f32 {
        *self as f32
    }
}

/// Easing curves for tween animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Accelerate quickly, settle slowly. The default for card travel.
    FastOutSlowIn,
}

impl Easing {
    /// Apply the easing function to a linear fraction in `[0, 1]`.
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::Linear => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowIn => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
        }
    }
}

/// Cubic bezier curve evaluation for easing.
fn cubic_bezier(x1: f32, y1: f32, x2: f32, y2: f32, fraction: f32) -> f32 {
    if fraction <= 0.0 {
        return 0.0;
    }
    if fraction >= 1.0 {
        return 1.0;
    }

    let cx = 3.0 * x1;
    let bx = 3.0 * (x2 - x1) - cx;
    let ax = 1.0 - cx - bx;

    let cy = 3.0 * y1;
    let by = 3.0 * (y2 - y1) - cy;
    let ay = 1.0 - cy - by;

    let sample = |a: f32, b: f32, c: f32, t: f32| ((a * t + b) * t + c) * t;
    let derivative = |a: f32, b: f32, c: f32, t: f32| (3.0 * a * t + 2.0 * b) * t + c;

    // Newton-Raphson for the parametric `t` matching the x fraction, with a
    // bisection fallback when the derivative degenerates.
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = fraction;
        for _ in 0..16 {
            let delta = sample(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                hi = t;
            } else {
                lo = t;
            }
            t = 0.5 * (lo + hi);
        }
    }

    sample(ay, by, cy, t)
}

/// Timed animation specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
    /// Delay before starting in milliseconds.
    pub delay_millis: u64,
}

impl TweenSpec {
    pub fn new(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::new(duration_millis, Easing::Linear)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for TweenSpec {
    fn default() -> Self {
        Self::new(350, Easing::FastOutSlowIn)
    }
}

/// Spring animation configuration.
///
/// Parameterized by friction (damping) and tension (stiffness) acting on the
/// travel fraction, so the feel of a spring is independent of how far the
/// value has to move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping coefficient. Higher values kill oscillation sooner.
    pub friction: f32,
    /// Stiffness constant. Higher values pull toward the target harder.
    pub tension: f32,
    /// Velocity magnitude (fraction/sec) below which the spring may settle.
    pub velocity_threshold: f32,
    /// Distance from the target (fraction of total travel) below which the
    /// spring may settle.
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn new(friction: f32, tension: f32) -> Self {
        Self {
            friction,
            tension,
            velocity_threshold: 0.005,
            position_threshold: 0.001,
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::new(7.0, 40.0)
    }
}

/// Animation type specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(TweenSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(TweenSpec::default())
    }
}

struct AnimatableInner<T: SpringScalar + 'static> {
    runtime: RuntimeHandle,
    current: T,
    /// Spring velocity in travel-fraction units per second.
    velocity: f32,
    start: T,
    target: T,
    animation: AnimationType,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    on_end: Option<Box<dyn FnOnce()>>,
}

struct AnimatableShared<T: SpringScalar + 'static> {
    cell: RefCell<AnimatableInner<T>>,
    listeners: Subscriptions<T>,
}

/// Animated scalar value holder.
///
/// Clones share the same underlying value, like the gesture offset shared
/// between a widget and its render layer. A new `animate_to`/`snap_to` call
/// interrupts whatever was running and drops its pending completion callback,
/// so a superseded animation can never fire a stale completion.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<AnimatableShared<T>>,
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation: AnimationType::default(),
            start_time_nanos: None,
            registration: None,
            on_end: None,
        };
        Self {
            inner: Rc::new(AnimatableShared {
                cell: RefCell::new(inner),
                listeners: Subscriptions::new(),
            }),
        }
    }

    /// Animate to the target value using the specified animation.
    pub fn animate_to(&self, target: T, animation: AnimationType) {
        self.begin(target, animation, None);
    }

    /// Animate to the target, invoking `on_end` once when the animation
    /// settles. The callback is dropped unfired if the animation is
    /// interrupted by another `animate_to` or `snap_to`.
    pub fn animate_to_with_end(
        &self,
        target: T,
        animation: AnimationType,
        on_end: impl FnOnce() + 'static,
    ) {
        self.begin(target, animation, Some(Box::new(on_end)));
    }

    fn begin(&self, target: T, animation: AnimationType, on_end: Option<Box<dyn FnOnce()>>) {
        {
            let mut inner = self.inner.cell.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.on_end = on_end;
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation = animation;
            inner.start_time_nanos = None;
            inner.velocity = 0.0;
        }
        Self::schedule_frame(&self.inner);
    }

    /// Snap immediately to the target value without animating.
    pub fn snap_to(&self, target: T) {
        {
            let mut inner = self.inner.cell.borrow_mut();
            if let Some(registration) = inner.registration.take() {
                registration.cancel();
            }
            inner.on_end = None;
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            inner.start_time_nanos = None;
            inner.velocity = 0.0;
        }
        self.inner.listeners.notify(&target);
    }

    pub fn value(&self) -> T {
        self.inner.cell.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.cell.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.cell.borrow().animation
    }

    pub fn is_running(&self) -> bool {
        self.inner.cell.borrow().registration.is_some()
    }

    /// Observe value changes. Listeners fire on every animated step and on
    /// `snap_to`, in subscription order.
    pub fn add_listener(&self, listener: impl Fn(&T) + 'static) -> SubscriptionId {
        self.inner.listeners.subscribe(listener)
    }

    pub fn remove_listener(&self, id: SubscriptionId) {
        self.inner.listeners.unsubscribe(id);
    }

    pub fn clear_listeners(&self) {
        self.inner.listeners.clear();
    }

    /// Cancels any in-flight animation, leaving the value where it is. The
    /// pending completion callback is dropped unfired.
    pub fn stop(&self) {
        let mut inner = self.inner.cell.borrow_mut();
        if let Some(registration) = inner.registration.take() {
            registration.cancel();
        }
        inner.on_end = None;
        inner.start_time_nanos = None;
        inner.velocity = 0.0;
    }

    fn schedule_frame(this: &Rc<AnimatableShared<T>>) {
        let runtime = {
            let inner = this.cell.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak: Weak<AnimatableShared<T>> = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        this.cell.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<AnimatableShared<T>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut finished: Option<Box<dyn FnOnce()>> = None;
        let mut changed: Option<T> = None;

        {
            let mut inner = this.cell.borrow_mut();
            inner.registration = None;

            match inner.animation {
                AnimationType::Tween(spec) => {
                    let start_time = inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let elapsed_nanos = frame_time_nanos.saturating_sub(*start_time);
                    let delay_nanos = spec.delay_millis * 1_000_000;

                    if elapsed_nanos < delay_nanos {
                        schedule_next = true;
                    } else {
                        let play_time = elapsed_nanos - delay_nanos;
                        let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                        let linear_progress =
                            (play_time as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                        let progress = spec.easing.transform(linear_progress);

                        let new_value = inner.start.lerp(&inner.target, progress);
                        inner.current = new_value.clone();

                        if linear_progress >= 1.0 {
                            inner.current = inner.target.clone();
                            inner.start = inner.target.clone();
                            inner.start_time_nanos = None;
                            finished = inner.on_end.take();
                        } else {
                            schedule_next = true;
                        }
                        changed = Some(inner.current.clone());
                    }
                }
                AnimationType::Spring(spec) => {
                    let start_time = inner.start_time_nanos.get_or_insert(frame_time_nanos);
                    let dt = frame_time_nanos.saturating_sub(*start_time) as f32 / 1_000_000_000.0;
                    inner.start_time_nanos = Some(frame_time_nanos);

                    if dt <= 0.0 {
                        schedule_next = true;
                    } else {
                        // Semi-implicit Euler on the travel fraction, with a
                        // fixed sub-step for stability across long frames.
                        let mut simulated = 0.0f32;
                        let step_size: f32 = 0.016;
                        let mut progress = <T as SpringScalar>::travel_progress(
                            &inner.start,
                            &inner.target,
                            &inner.current,
                        );

                        while simulated < dt {
                            let step = step_size.min(dt - simulated);
                            let displacement = progress - 1.0;
                            let acceleration =
                                -spec.tension * displacement - spec.friction * inner.velocity;
                            inner.velocity += acceleration * step;
                            progress += inner.velocity * step;
                            simulated += step;
                        }

                        inner.current = inner.start.lerp(&inner.target, progress.clamp(-1.0, 2.0));

                        let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                        let near_target = (progress - 1.0).abs() < spec.position_threshold;

                        if at_rest && near_target {
                            inner.current = inner.target.clone();
                            inner.start = inner.target.clone();
                            inner.start_time_nanos = None;
                            inner.velocity = 0.0;
                            finished = inner.on_end.take();
                        } else {
                            schedule_next = true;
                        }
                        changed = Some(inner.current.clone());
                    }
                }
            }
        }

        if let Some(value) = changed {
            this.listeners.notify(&value);
        }
        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some(on_end) = finished {
            on_end();
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
