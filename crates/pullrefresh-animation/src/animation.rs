//! Animatable values driven by frame callbacks.
//!
//! Note: [`Animatable`] uses camelCase for `animateTo`/`snapTo` to keep API parity
//! with Jetpack Compose.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::rc::Rc;

use pullrefresh_core::{FrameCallbackRegistration, MutableState, MutationToken, RuntimeHandle, State};

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
pub trait SpringScalar: Lerp + Clone + PartialEq {
    /// Convert the value to `f32` for physics calculations.
    fn to_f32(&self) -> f32;

    /// Compute the current progress between the start and target values.
    fn spring_progress(start: &Self, target: &Self, current: &Self) -> f32 {
        let start_val = start.to_f32();
        let target_val = target.to_f32();
        let current_val = current.to_f32();

        if (target_val - start_val).abs() < f32::EPSILON {
            1.0
        } else {
            (current_val - start_val) / (target_val - start_val)
        }
    }

    /// Whether the current value is close enough to the target to stop the spring.
    fn is_near_target(current: &Self, target: &Self, threshold: f32) -> bool {
        (current.to_f32() - target.to_f32()).abs() < threshold
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

/// Easing functions matching Jetpack Compose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Jetpack Compose: LinearEasing
    LinearEasing,
    EaseIn,
    EaseOut,
    EaseInOut,
    /// Material design standard curve.
    /// Jetpack Compose: FastOutSlowInEasing
    FastOutSlowInEasing,
    /// Jetpack Compose: LinearOutSlowInEasing
    LinearOutSlowInEasing,
    /// Jetpack Compose: FastOutLinearEasing
    FastOutLinearEasing,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    pub fn transform(&self, fraction: f32) -> f32 {
        match self {
            Easing::LinearEasing => fraction,
            Easing::EaseIn => cubic_bezier(0.42, 0.0, 1.0, 1.0, fraction),
            Easing::EaseOut => cubic_bezier(0.0, 0.0, 0.58, 1.0, fraction),
            Easing::EaseInOut => cubic_bezier(0.42, 0.0, 0.58, 1.0, fraction),
            Easing::FastOutSlowInEasing => cubic_bezier(0.4, 0.0, 0.2, 1.0, fraction),
            Easing::LinearOutSlowInEasing => cubic_bezier(0.0, 0.0, 0.2, 1.0, fraction),
            Easing::FastOutLinearEasing => cubic_bezier(0.4, 0.0, 1.0, 1.0, fraction),
        }
    }
}

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

    fn sample_curve(a: f32, b: f32, c: f32, t: f32) -> f32 {
        ((a * t + b) * t + c) * t
    }

    fn sample_derivative(a: f32, b: f32, c: f32, t: f32) -> f32 {
        (3.0 * a * t + 2.0 * b) * t + c
    }

    // Newton-Raphson for the parametric `t` at this x, clamped to [0, 1].
    let mut t = fraction;
    let mut converged = false;
    for _ in 0..8 {
        let x = sample_curve(ax, bx, cx, t) - fraction;
        if x.abs() < 1e-6 {
            converged = true;
            break;
        }
        let dx = sample_derivative(ax, bx, cx, t);
        if dx.abs() < 1e-6 {
            break;
        }
        t = (t - x / dx).clamp(0.0, 1.0);
    }

    if !converged {
        let mut t0 = 0.0;
        let mut t1 = 1.0;
        t = fraction;
        for _ in 0..16 {
            let delta = sample_curve(ax, bx, cx, t) - fraction;
            if delta.abs() < 1e-6 {
                break;
            }
            if delta > 0.0 {
                t1 = t;
            } else {
                t0 = t;
            }
            t = 0.5 * (t0 + t1);
        }
    }

    sample_curve(ay, by, cy, t)
}

/// Tween parameters: duration, easing and start delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(300, Easing::FastOutSlowInEasing)
    }
}

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 = critically damped, < 1.0 = bouncy, > 1.0 = over-damped.
    pub damping_ratio: f32,
    pub stiffness: f32,
    pub velocity_threshold: f32,
    pub position_threshold: f32,
}

impl SpringSpec {
    pub fn default_spring() -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness: 1500.0,
            velocity_threshold: 0.01,
            position_threshold: 0.001,
        }
    }

    pub fn bouncy() -> Self {
        Self {
            damping_ratio: 0.5,
            ..Self::default_spring()
        }
    }

    pub fn stiff() -> Self {
        Self {
            stiffness: 3000.0,
            ..Self::default_spring()
        }
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimationType {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl Default for AnimationType {
    fn default() -> Self {
        AnimationType::Tween(AnimationSpec::default())
    }
}

/// Why an animation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationEndReason {
    /// Reached its target.
    Finished,
    /// Superseded by `snapTo`, a newer `animateTo`, `stop`, or a cancelled guard.
    Interrupted,
    /// Stopped at a lower or upper bound before reaching its target.
    BoundReached,
}

/// Longest integration step for springs; keeps stiff presets stable at any frame rate.
const SPRING_MAX_STEP_SECONDS: f32 = 0.001;

type EndListener = Box<dyn FnOnce(AnimationEndReason)>;

/// Generic animatable value holder.
pub struct Animatable<T: SpringScalar + 'static> {
    inner: Rc<RefCell<AnimatableInner<T>>>,
}

struct AnimatableInner<T: SpringScalar + 'static> {
    state: MutableState<T>,
    runtime: RuntimeHandle,
    current: T,
    velocity: f32,
    start: T,
    target: T,
    animation_type: AnimationType,
    start_time_nanos: Option<u64>,
    registration: Option<FrameCallbackRegistration>,
    guard: Option<MutationToken>,
    on_end: Option<EndListener>,
    lower_bound: Option<T>,
    upper_bound: Option<T>,
}

impl<T: SpringScalar + 'static> AnimatableInner<T> {
    /// Stop the running animation, returning its end listener for the caller to invoke.
    fn halt(&mut self) -> Option<EndListener> {
        if let Some(registration) = self.registration.take() {
            registration.cancel();
        }
        self.start_time_nanos = None;
        self.velocity = 0.0;
        self.guard = None;
        self.on_end.take()
    }

    /// `value` coerced into the bounds, and whether it had to move.
    fn coerce_in_bounds(&self, value: T) -> (T, bool) {
        let raw = value.to_f32();
        if let Some(lower) = &self.lower_bound {
            if raw < lower.to_f32() {
                return (lower.clone(), true);
            }
        }
        if let Some(upper) = &self.upper_bound {
            if raw > upper.to_f32() {
                return (upper.clone(), true);
            }
        }
        (value, false)
    }
}

impl<T: SpringScalar + 'static> Animatable<T> {
    pub fn new(initial: T, runtime: RuntimeHandle) -> Self {
        let inner = AnimatableInner {
            state: MutableState::with_runtime(initial.clone(), runtime.clone()),
            runtime,
            current: initial.clone(),
            velocity: 0.0,
            start: initial.clone(),
            target: initial,
            animation_type: AnimationType::default(),
            start_time_nanos: None,
            registration: None,
            guard: None,
            on_end: None,
            lower_bound: None,
            upper_bound: None,
        };
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// Animate to `target`; any running animation is interrupted.
    pub fn animateTo(&self, target: T, animation: AnimationType) {
        self.start_animation(target, animation, None, None);
    }

    /// Animate to `target` while `guard` stays active, reporting the outcome to `on_end`.
    ///
    /// The guard is checked before every step; once it is no longer active the
    /// animation stops where it is and `on_end` receives
    /// [`AnimationEndReason::Interrupted`].
    pub fn animateToGuarded(
        &self,
        target: T,
        animation: AnimationType,
        guard: MutationToken,
        on_end: impl FnOnce(AnimationEndReason) + 'static,
    ) {
        self.start_animation(target, animation, Some(guard), Some(Box::new(on_end)));
    }

    fn start_animation(
        &self,
        target: T,
        animation: AnimationType,
        guard: Option<MutationToken>,
        on_end: Option<EndListener>,
    ) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.start = inner.current.clone();
            inner.target = target;
            inner.animation_type = animation;
            inner.guard = guard;
            inner.on_end = on_end;
            interrupted
        };
        if let Some(listener) = interrupted {
            listener(AnimationEndReason::Interrupted);
        }
        Self::schedule_frame(&self.inner);
    }

    /// Set the range the value may occupy. `None` leaves that side open.
    ///
    /// A running animation that crosses a bound stops there with
    /// [`AnimationEndReason::BoundReached`]; the current value is coerced in immediately.
    pub fn updateBounds(&self, lower_bound: Option<T>, upper_bound: Option<T>) {
        let (state, coerced) = {
            let mut inner = self.inner.borrow_mut();
            inner.lower_bound = lower_bound;
            inner.upper_bound = upper_bound;
            let (current, moved) = inner.coerce_in_bounds(inner.current.clone());
            inner.current = current.clone();
            (inner.state.clone(), moved.then_some(current))
        };
        if let Some(value) = coerced {
            state.set_value(value);
        }
    }

    pub fn lower_bound(&self) -> Option<T> {
        self.inner.borrow().lower_bound.clone()
    }

    pub fn upper_bound(&self) -> Option<T> {
        self.inner.borrow().upper_bound.clone()
    }

    /// Snap immediately to `target` coerced into the bounds, interrupting any running animation.
    pub fn snapTo(&self, target: T) {
        let (state, interrupted, target) = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            let (target, _) = inner.coerce_in_bounds(target);
            inner.current = target.clone();
            inner.start = target.clone();
            inner.target = target.clone();
            (inner.state.clone(), interrupted, target)
        };
        state.set_value(target);
        if let Some(listener) = interrupted {
            listener(AnimationEndReason::Interrupted);
        }
    }

    /// Stop at the current value.
    pub fn stop(&self) {
        let interrupted = {
            let mut inner = self.inner.borrow_mut();
            let interrupted = inner.halt();
            inner.target = inner.current.clone();
            inner.start = inner.current.clone();
            interrupted
        };
        if let Some(listener) = interrupted {
            listener(AnimationEndReason::Interrupted);
        }
    }

    pub fn value(&self) -> T {
        self.inner.borrow().current.clone()
    }

    pub fn target(&self) -> T {
        self.inner.borrow().target.clone()
    }

    pub fn animation_type(&self) -> AnimationType {
        self.inner.borrow().animation_type
    }

    pub fn is_running(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    /// Observable view of the current value.
    pub fn state(&self) -> State<T> {
        self.inner.borrow().state.as_state()
    }

    fn schedule_frame(this: &Rc<RefCell<AnimatableInner<T>>>) {
        let runtime = {
            let inner = this.borrow();
            if inner.registration.is_some() {
                return;
            }
            inner.runtime.clone()
        };
        let weak = Rc::downgrade(this);
        let registration = runtime.frame_clock().with_frame_nanos(move |time| {
            if let Some(strong) = weak.upgrade() {
                Self::on_frame(&strong, time);
            }
        });
        if !registration.is_active() {
            log::warn!("animation not scheduled: runtime is gone");
        }
        this.borrow_mut().registration = Some(registration);
    }

    fn on_frame(this: &Rc<RefCell<AnimatableInner<T>>>, frame_time_nanos: u64) {
        let mut schedule_next = false;
        let mut ended = None;
        let state;
        let published;
        {
            let mut inner = this.borrow_mut();
            inner.registration = None;
            state = inner.state.clone();

            if inner.guard.as_ref().is_some_and(|guard| !guard.is_active()) {
                log::trace!("animation guard cancelled; stopping at current value");
                inner.target = inner.current.clone();
                inner.start = inner.current.clone();
                ended = inner.halt().map(|listener| (listener, AnimationEndReason::Interrupted));
                published = inner.current.clone();
            } else {
                match inner.animation_type {
                    AnimationType::Tween(spec) => {
                        let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
                        let delay_nanos = spec.delay_millis * 1_000_000;

                        if elapsed_nanos < delay_nanos {
                            schedule_next = true;
                        } else {
                            let animation_elapsed = elapsed_nanos - delay_nanos;
                            let duration_nanos = (spec.duration_millis * 1_000_000).max(1);
                            let linear_progress =
                                (animation_elapsed as f32 / duration_nanos as f32).clamp(0.0, 1.0);
                            let progress = spec.easing.transform(linear_progress);
                            inner.current = inner.start.lerp(&inner.target, progress);

                            if linear_progress >= 1.0 {
                                inner.current = inner.target.clone();
                            } else {
                                schedule_next = true;
                            }
                        }
                    }
                    AnimationType::Spring(spec) => {
                        let start_time = *inner.start_time_nanos.get_or_insert(frame_time_nanos);
                        let dt = frame_time_nanos.saturating_sub(start_time) as f32 / 1_000_000_000.0;

                        if dt == 0.0 {
                            schedule_next = true;
                        } else {
                            // Semi-implicit Euler over progress in [0, 1] toward the target.
                            // Damped springs (ratio >= 1) never pass the target.
                            let stiffness = spec.stiffness;
                            let damping = 2.0 * spec.damping_ratio * stiffness.sqrt();
                            let max_progress = if spec.damping_ratio >= 1.0 { 1.0 } else { 2.0 };
                            let mut prev_time = 0.0f32;

                            while prev_time < dt {
                                let step = SPRING_MAX_STEP_SECONDS.min(dt - prev_time);
                                let current_progress = <T as SpringScalar>::spring_progress(
                                    &inner.start,
                                    &inner.target,
                                    &inner.current,
                                );
                                let displacement = current_progress - 1.0;
                                let spring_force =
                                    -stiffness * displacement - damping * inner.velocity;
                                inner.velocity += spring_force * step;
                                let new_progress = (current_progress + inner.velocity * step)
                                    .clamp(0.0, max_progress);
                                if new_progress >= max_progress && inner.velocity > 0.0 {
                                    inner.velocity = 0.0;
                                }
                                inner.current = inner.start.lerp(&inner.target, new_progress);
                                prev_time += step;
                            }
                            // Restart the integration window from this frame.
                            inner.start_time_nanos = Some(frame_time_nanos);

                            let at_rest = inner.velocity.abs() < spec.velocity_threshold;
                            let near_target = <T as SpringScalar>::is_near_target(
                                &inner.current,
                                &inner.target,
                                spec.position_threshold,
                            );
                            if at_rest && near_target {
                                inner.current = inner.target.clone();
                            } else {
                                schedule_next = true;
                            }
                        }
                    }
                }

                let mut reason = AnimationEndReason::Finished;
                let (coerced, hit_bound) = inner.coerce_in_bounds(inner.current.clone());
                if hit_bound {
                    log::trace!("animation reached a bound before its target");
                    inner.current = coerced;
                    inner.target = inner.current.clone();
                    schedule_next = false;
                    reason = AnimationEndReason::BoundReached;
                }

                if !schedule_next {
                    inner.start = inner.target.clone();
                    ended = inner.halt().map(|listener| (listener, reason));
                }
                published = inner.current.clone();
            }
        }

        state.set_value(published);
        if schedule_next {
            Self::schedule_frame(this);
        }
        if let Some((listener, reason)) = ended {
            listener(reason);
        }
    }
}

impl<T: SpringScalar + 'static> Clone for Animatable<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
