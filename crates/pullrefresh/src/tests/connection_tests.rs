use super::*;

use pullrefresh_core::Runtime;
use pullrefresh_foundation::{NestedScrollConnection, NestedScrollSource};
use pullrefresh_ui_graphics::{Density, Offset, Velocity};
use std::cell::Cell;
use std::rc::Rc;

fn connection(
    state: &PullRefreshState,
    refreshes: &Rc<Cell<u32>>,
) -> PullRefreshNestedScrollConnection {
    let offsets = PullRefreshConfig::default().resolve(Density::default());
    let refreshes = Rc::clone(refreshes);
    PullRefreshNestedScrollConnection::new(
        state.clone(),
        offsets,
        DEFAULT_HYSTERESIS_FACTOR,
        Rc::new(move || refreshes.set(refreshes.get() + 1)),
    )
}

fn pull(connection: &mut PullRefreshNestedScrollConnection, delta: f32) -> Offset {
    connection.on_post_scroll(Offset::ZERO, Offset::vertical(delta), NestedScrollSource::Drag)
}

#[test]
fn damping_falls_toward_max() {
    let mut previous = damping_rate(0.0, 240.0);
    assert_eq!(previous, 1.0);
    for step in 1..=24 {
        let rate = damping_rate(step as f32 * 10.0, 240.0);
        assert!(rate < previous, "rate must strictly decrease at step {step}");
        previous = rate;
    }
    assert!(damping_rate(240.0, 240.0).abs() < 1e-6);
    assert!(damping_rate(500.0, 240.0).abs() < 1e-6);
}

#[test]
fn repeated_pulls_stay_below_naive_sum() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);

    let mut naive = 0.0;
    for step in 0..3 {
        naive += 50.0;
        pull(&mut connection, 50.0);
        let offset = state.pull_offset();
        assert!(offset <= naive);
        if step > 0 {
            assert!(offset < naive, "damping engages after the first step");
        }
    }
    assert!(state.pull_offset() < 240.0);
}

#[test]
fn post_scroll_reports_applied_delta() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);

    assert_eq!(pull(&mut connection, 50.0), Offset::vertical(50.0));
    let consumed = pull(&mut connection, 50.0);
    assert!(consumed.y < 50.0);
    assert_eq!(state.pull_offset(), 50.0 + consumed.y);
    assert_eq!(pull(&mut connection, -20.0), Offset::ZERO);
}

#[test]
fn pre_scroll_pulls_back_up_before_the_child_scrolls() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);
    pull(&mut connection, 30.0);

    let consumed = connection.on_pre_scroll(Offset::vertical(-50.0), NestedScrollSource::Drag);

    assert_eq!(consumed, Offset::vertical(-30.0));
    assert_eq!(state.pull_offset(), 0.0);
    assert_eq!(
        connection.on_pre_scroll(Offset::vertical(-10.0), NestedScrollSource::Drag),
        Offset::ZERO
    );
    assert_eq!(
        connection.on_pre_scroll(Offset::vertical(10.0), NestedScrollSource::Drag),
        Offset::ZERO
    );
}

#[test]
fn fling_sourced_deltas_pass_through() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);

    let consumed = connection.on_post_scroll(
        Offset::ZERO,
        Offset::vertical(40.0),
        NestedScrollSource::Fling,
    );

    assert_eq!(consumed, Offset::ZERO);
    assert_eq!(state.pull_offset(), 0.0);
}

#[test]
fn release_below_trigger_swallows_velocity() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);
    pull(&mut connection, 60.0);

    let consumed = connection.on_pre_fling(Velocity::vertical(900.0));

    assert_eq!(consumed, Velocity::vertical(900.0));
    assert!(!state.is_pulling());
    assert!(!state.is_refreshing());
    assert_eq!(refreshes.get(), 0);
}

#[test]
fn release_past_trigger_refreshes_and_passes_velocity() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);
    pull(&mut connection, 200.0);
    assert!(state.pull_offset() >= 120.0);

    let consumed = connection.on_pre_fling(Velocity::vertical(900.0));

    assert_eq!(consumed, Velocity::ZERO);
    assert!(state.is_refreshing());
    assert_eq!(refreshes.get(), 1);
}

#[test]
fn release_without_pull_passes_velocity() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);

    assert_eq!(connection.on_pre_fling(Velocity::vertical(-700.0)), Velocity::ZERO);
}

#[test]
fn disabled_connection_consumes_nothing() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::new(Cell::new(0));
    let mut connection = connection(&state, &refreshes);
    pull(&mut connection, 150.0);
    connection.set_enabled(false);

    assert_eq!(pull(&mut connection, 40.0), Offset::ZERO);
    assert_eq!(
        connection.on_pre_scroll(Offset::vertical(-40.0), NestedScrollSource::Drag),
        Offset::ZERO
    );
    assert_eq!(connection.on_pre_fling(Velocity::vertical(500.0)), Velocity::ZERO);
    assert_eq!(
        connection.on_post_fling(Velocity::ZERO, Velocity::vertical(500.0)),
        Velocity::ZERO
    );
    assert!(!state.is_pulling());
    assert!(!state.is_refreshing());
    assert_eq!(refreshes.get(), 0);
}
