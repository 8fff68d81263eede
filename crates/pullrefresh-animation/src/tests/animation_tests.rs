use super::*;

use pullrefresh_core::{MutatePriority, MutatorMutex, Runtime};
use std::cell::RefCell;
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(runtime: &Runtime, frames: usize) {
    let handle = runtime.handle();
    let mut frame_time = handle.last_frame_nanos().unwrap_or(0);
    for _ in 0..frames {
        if !handle.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
    }
}

#[test]
fn tween_interpolates_over_time_and_ends_at_target() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    let observed = Rc::new(RefCell::new(Vec::new()));
    let state = animatable.state();
    state
        .subscribe({
            let observed = Rc::clone(&observed);
            let state = state.clone();
            move || observed.borrow_mut().push(state.get())
        })
        .forget();

    animatable.animateTo(100.0, AnimationType::Tween(AnimationSpec::linear(100)));
    assert!(animatable.is_running());
    pump(&runtime, 32);

    let observed = observed.borrow();
    assert!(observed.iter().any(|value| *value > 0.0 && *value < 100.0));
    assert_eq!(*observed.last().expect("values published"), 100.0);
    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), 100.0);
}

#[test]
fn end_listener_reports_finished() {
    let runtime = Runtime::headless();
    let mutex = MutatorMutex::new();
    let animatable = Animatable::new(10.0f32, runtime.handle());
    let reason = Rc::new(RefCell::new(None));

    let token = mutex.try_acquire(MutatePriority::Default).expect("free");
    animatable.animateToGuarded(0.0, AnimationType::default(), token, {
        let reason = Rc::clone(&reason);
        move |end| *reason.borrow_mut() = Some(end)
    });
    pump(&runtime, 64);

    assert_eq!(*reason.borrow(), Some(AnimationEndReason::Finished));
    assert_eq!(animatable.value(), 0.0);
}

#[test]
fn cancelled_guard_stops_animation_on_next_frame() {
    let runtime = Runtime::headless();
    let mutex = MutatorMutex::new();
    let animatable = Animatable::new(100.0f32, runtime.handle());
    let reason = Rc::new(RefCell::new(None));

    let token = mutex.try_acquire(MutatePriority::Default).expect("free");
    animatable.animateToGuarded(0.0, AnimationType::Tween(AnimationSpec::linear(300)), token, {
        let reason = Rc::clone(&reason);
        move |end| *reason.borrow_mut() = Some(end)
    });
    pump(&runtime, 3);
    let paused_at = animatable.value();
    assert!(paused_at < 100.0 && paused_at > 0.0);

    let _drag = mutex.try_acquire(MutatePriority::UserInput).expect("pre-empts");
    pump(&runtime, 10);

    assert_eq!(*reason.borrow(), Some(AnimationEndReason::Interrupted));
    assert_eq!(animatable.value(), paused_at);
    assert!(!animatable.is_running());
}

#[test]
fn snap_interrupts_running_animation() {
    let runtime = Runtime::headless();
    let mutex = MutatorMutex::new();
    let animatable = Animatable::new(50.0f32, runtime.handle());
    let reason = Rc::new(RefCell::new(None));

    let token = mutex.try_acquire(MutatePriority::Default).expect("free");
    animatable.animateToGuarded(0.0, AnimationType::default(), token, {
        let reason = Rc::clone(&reason);
        move |end| *reason.borrow_mut() = Some(end)
    });
    animatable.snapTo(75.0);

    assert_eq!(*reason.borrow(), Some(AnimationEndReason::Interrupted));
    assert_eq!(animatable.value(), 75.0);
    assert_eq!(animatable.state().get(), 75.0);
    assert!(!runtime.handle().has_frame_callbacks());
}

#[test]
fn spring_settles_on_target() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(0.0f32, runtime.handle());
    animatable.animateTo(1.0, AnimationType::Spring(SpringSpec::default()));
    pump(&runtime, 600);

    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), 1.0);
}

fn every_spring_preset() -> [(&'static str, SpringSpec); 3] {
    [
        ("default", SpringSpec::default_spring()),
        ("bouncy", SpringSpec::bouncy()),
        ("stiff", SpringSpec::stiff()),
    ]
}

/// Runs to completion and returns the values seen after each frame.
fn run_spring(from: f32, to: f32, spring: SpringSpec) -> (Animatable<f32>, Vec<f32>) {
    let runtime = Runtime::headless();
    let handle = runtime.handle();
    let animatable = Animatable::new(from, runtime.handle());
    animatable.animateTo(to, AnimationType::Spring(spring));

    let mut frame_time = handle.last_frame_nanos().unwrap_or(0);
    let mut seen = Vec::new();
    while handle.has_frame_callbacks() && seen.len() < 600 {
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
        seen.push(animatable.value());
    }
    (animatable, seen)
}

#[test]
fn every_spring_preset_converges_to_target() {
    for (name, spring) in every_spring_preset() {
        for (from, to) in [(0.0, 100.0), (100.0, 0.0)] {
            let (animatable, seen) = run_spring(from, to, spring);
            assert!(seen.len() < 600, "{name} {from}->{to}: never settled");
            assert!(!animatable.is_running(), "{name} {from}->{to}");
            assert_eq!(animatable.value(), to, "{name} {from}->{to}");
        }
    }
}

#[test]
fn damped_springs_never_overshoot() {
    for (name, spring) in every_spring_preset() {
        if spring.damping_ratio < 1.0 {
            continue;
        }
        let (_, rising) = run_spring(0.0, 100.0, spring);
        assert!(
            rising.iter().all(|value| (0.0..=100.0).contains(value)),
            "{name}: rising pass left [0, 100]: {rising:?}"
        );
        assert!(rising.windows(2).all(|pair| pair[1] >= pair[0]), "{name}: not monotonic");

        let (_, falling) = run_spring(100.0, 0.0, spring);
        assert!(
            falling.iter().all(|value| (0.0..=100.0).contains(value)),
            "{name}: falling pass left [0, 100]: {falling:?}"
        );
    }
}

#[test]
fn bouncy_spring_overshoots_before_settling() {
    let (_, seen) = run_spring(0.0, 100.0, SpringSpec::bouncy());
    assert!(seen.iter().any(|value| *value > 100.0));
    assert_eq!(seen.last().copied(), Some(100.0));
}

#[test]
fn stiff_spring_settles_faster_than_default() {
    let (_, stiff) = run_spring(0.0, 100.0, SpringSpec::stiff());
    let (_, default) = run_spring(0.0, 100.0, SpringSpec::default_spring());
    assert!(stiff.len() < default.len());
}

#[test]
fn spring_stops_at_lower_bound() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(50.0f32, runtime.handle());
    animatable.updateBounds(Some(0.0), None);
    let reason = Rc::new(RefCell::new(None));
    let mutex = MutatorMutex::new();
    let token = mutex
        .try_acquire(MutatePriority::Default)
        .expect("mutex is free");
    animatable.animateToGuarded(0.0, AnimationType::Spring(SpringSpec::bouncy()), token, {
        let reason = Rc::clone(&reason);
        move |end| *reason.borrow_mut() = Some(end)
    });
    pump(&runtime, 600);

    assert!(!animatable.is_running());
    assert_eq!(animatable.value(), 0.0);
    assert_eq!(*reason.borrow(), Some(AnimationEndReason::BoundReached));
}

#[test]
fn bounds_coerce_snaps_and_current_value() {
    let runtime = Runtime::headless();
    let animatable = Animatable::new(-5.0f32, runtime.handle());
    animatable.updateBounds(Some(0.0), Some(10.0));
    assert_eq!(animatable.value(), 0.0);
    assert_eq!(animatable.state().get(), 0.0);

    animatable.snapTo(25.0);
    assert_eq!(animatable.value(), 10.0);
    assert_eq!(animatable.lower_bound(), Some(0.0));
    assert_eq!(animatable.upper_bound(), Some(10.0));
}

#[test]
fn easing_linear_is_identity() {
    assert_eq!(Easing::LinearEasing.transform(0.0), 0.0);
    assert_eq!(Easing::LinearEasing.transform(0.5), 0.5);
    assert_eq!(Easing::LinearEasing.transform(1.0), 1.0);
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::LinearEasing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::LinearOutSlowInEasing,
        Easing::FastOutLinearEasing,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start ~0 for {:?}", easing);
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end ~1 for {:?}", easing);
    }
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, 300);
    assert_eq!(spec.easing, Easing::FastOutSlowInEasing);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn spring_presets_differ_from_default() {
    assert_eq!(SpringSpec::default().damping_ratio, 1.0);
    assert!(SpringSpec::bouncy().damping_ratio < 1.0);
    assert!(SpringSpec::stiff().stiffness > SpringSpec::default().stiffness);
}
