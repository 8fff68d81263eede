use super::*;
use std::cell::Cell;
use std::rc::Rc;

#[test]
fn observers_run_only_on_change() {
    let state = MutableState::new(0.0f32);
    let calls = Rc::new(Cell::new(0));
    let _subscription = {
        let calls = Rc::clone(&calls);
        state.subscribe(move || calls.set(calls.get() + 1))
    };

    state.set_value(1.0);
    state.set_value(1.0);
    state.update(|value| *value += 0.0);
    state.update(|value| *value += 2.0);

    assert_eq!(state.get(), 3.0);
    assert_eq!(calls.get(), 2);
}

#[test]
fn dropping_subscription_stops_notifications() {
    let state = MutableState::new(false);
    let calls = Rc::new(Cell::new(0));
    let subscription = {
        let calls = Rc::clone(&calls);
        state.subscribe(move || calls.set(calls.get() + 1))
    };

    state.set_value(true);
    drop(subscription);
    state.set_value(false);

    assert_eq!(calls.get(), 1);
}

#[test]
fn observers_may_read_the_state_they_observe() {
    let state = MutableState::new(1);
    let seen = Rc::new(Cell::new(0));
    let reader = state.as_state();
    state
        .subscribe({
            let seen = Rc::clone(&seen);
            move || seen.set(reader.get())
        })
        .forget();

    state.set_value(7);
    assert_eq!(seen.get(), 7);
}

#[test]
fn change_requests_a_frame_from_the_runtime() {
    let runtime = Runtime::headless();
    let state = MutableState::with_runtime(0u32, runtime.handle());
    assert!(!runtime.handle().needs_frame());

    state.set_value(5);
    assert!(runtime.handle().needs_frame());
    assert_eq!(state.as_state().with(|value| *value), 5);
}
