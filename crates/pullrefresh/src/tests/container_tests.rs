use super::*;

use pullrefresh_animation::{AnimationSpec, AnimationType};
use pullrefresh_core::Runtime;
use pullrefresh_foundation::{NestedScrollSource, ScrollState, ScrollableNode};
use pullrefresh_ui_graphics::{Density, Dp, Offset, Velocity};
use std::cell::Cell;
use std::rc::Rc;

const FRAME_NANOS: u64 = 16_666_667;

fn pump(runtime: &Runtime, max_frames: usize) {
    let handle = runtime.handle();
    let mut frame_time = handle.last_frame_nanos().unwrap_or(0);
    for _ in 0..max_frames {
        handle.drain_ui();
        if !handle.has_frame_callbacks() {
            break;
        }
        frame_time += FRAME_NANOS;
        handle.drain_frame_callbacks(frame_time);
    }
    handle.drain_ui();
}

fn container(
    runtime: &Runtime,
    refreshes: &Rc<Cell<u32>>,
) -> PullRefresh<IndicatorParams, &'static str> {
    let state = PullRefreshState::new(false, runtime.handle());
    let refreshes = Rc::clone(refreshes);
    let config = PullRefreshConfig::default().with_settle_animation(AnimationType::Tween(
        AnimationSpec::linear(150),
    ));
    PullRefresh::new(
        state,
        move || refreshes.set(refreshes.get() + 1),
        config,
        Density::default(),
        |params| params,
        || "content",
    )
}

#[test]
fn render_offsets_content_and_indicator() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let mut container = container(&runtime, &refreshes);
    container.state().apply_scroll_delta(60.0, 240.0);

    let frame = container.render();

    assert_eq!(frame.content_offset_y, 60.0);
    assert_eq!(frame.indicator_offset_y, 60.0);
    assert_eq!(frame.indicator_top(40.0), 20.0);
    assert_eq!(frame.content, "content");
    assert_eq!(frame.indicator.trigger_offset_px, 120.0);
    assert!(frame.indicator.is_pulling);
}

#[test]
fn offsets_follow_density() {
    let runtime = Runtime::headless();
    let state = PullRefreshState::new(false, runtime.handle());
    let container = PullRefresh::new(
        state,
        || {},
        PullRefreshConfig::default().with_refresh_trigger_offset(Dp(80.0)),
        Density::new(2.0),
        |_| (),
        || (),
    );

    let offsets = container.offsets();
    assert_eq!(offsets.trigger_px, 160.0);
    assert_eq!(offsets.refreshing_px, 200.0);
    assert_eq!(offsets.max_px, 480.0);
}

#[test]
fn release_past_trigger_settles_at_refreshing_offset() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let container = container(&runtime, &refreshes);
    let connection = container.connection();
    let mut list = ScrollableNode::with_parent(ScrollState::new(1_000.0), connection);

    list.scroll_by(Offset::vertical(200.0));
    list.fling(Velocity::vertical(1_200.0));
    pump(&runtime, 60);

    assert_eq!(refreshes.get(), 1);
    assert!(container.state().is_refreshing());
    assert_eq!(container.state().pull_offset(), 100.0);
    assert_eq!(list.last_fling_velocity(), Some(Velocity::vertical(1_200.0)));

    container.state().set_refreshing(false);
    pump(&runtime, 60);

    assert_eq!(container.state().pull_offset(), 0.0);
    assert_eq!(refreshes.get(), 1);
}

#[test]
fn release_below_trigger_settles_home_without_fling() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let container = container(&runtime, &refreshes);
    let mut list = ScrollableNode::with_parent(ScrollState::new(1_000.0), container.connection());

    list.scroll_by(Offset::vertical(70.0));
    assert_eq!(container.state().pull_offset(), 70.0);
    list.fling(Velocity::vertical(800.0));
    pump(&runtime, 60);

    assert_eq!(refreshes.get(), 0);
    assert_eq!(container.state().pull_offset(), 0.0);
    assert_eq!(list.last_fling_velocity(), Some(Velocity::ZERO));
}

#[test]
fn drag_during_settle_takes_over() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let container = container(&runtime, &refreshes);
    let mut list = ScrollableNode::with_parent(ScrollState::new(1_000.0), container.connection());
    let handle = runtime.handle();

    list.scroll_by(Offset::vertical(90.0));
    list.fling(Velocity::ZERO);
    handle.drain_ui();
    assert!(container.state().is_animating());
    handle.drain_frame_callbacks(FRAME_NANOS);
    handle.drain_frame_callbacks(2 * FRAME_NANOS);
    handle.drain_frame_callbacks(3 * FRAME_NANOS);
    let mid = container.state().pull_offset();
    assert!(mid > 0.0 && mid < 90.0);

    list.scroll_by(Offset::vertical(5.0));
    let after_drag = container.state().pull_offset();
    pump(&runtime, 30);

    assert!(after_drag > mid);
    assert_eq!(container.state().pull_offset(), after_drag);
    assert!(container.state().is_pulling());
    assert!(!container.state().is_animating());
}

#[test]
fn external_refresh_moves_to_refreshing_offset() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let container = container(&runtime, &refreshes);
    pump(&runtime, 5);

    container.state().set_refreshing(true);
    pump(&runtime, 60);

    assert_eq!(container.state().pull_offset(), 100.0);
    assert_eq!(refreshes.get(), 0);
}

#[test]
fn disabled_container_ignores_drags() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let mut container = container(&runtime, &refreshes);
    container.set_pull_enabled(false);
    let connection = container.connection();

    let consumed = connection.borrow_mut().on_post_scroll(
        Offset::ZERO,
        Offset::vertical(80.0),
        NestedScrollSource::Drag,
    );

    assert_eq!(consumed, Offset::ZERO);
    assert_eq!(container.state().pull_offset(), 0.0);
    assert!(!container.config().pull_enabled);
}

#[test]
fn replaced_refresh_callback_is_used() {
    let runtime = Runtime::headless();
    let refreshes = Rc::new(Cell::new(0));
    let mut container = container(&runtime, &refreshes);
    let replaced = Rc::new(Cell::new(0));
    container.set_on_refresh({
        let replaced = Rc::clone(&replaced);
        move || replaced.set(replaced.get() + 1)
    });
    let mut list = ScrollableNode::with_parent(ScrollState::new(0.0), container.connection());

    list.scroll_by(Offset::vertical(150.0));
    list.fling(Velocity::ZERO);

    assert_eq!(refreshes.get(), 0);
    assert_eq!(replaced.get(), 1);
}
