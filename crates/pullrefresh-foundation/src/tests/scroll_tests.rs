use super::*;
use crate::nested_scroll::NestedScrollConnection;
use std::cell::RefCell;
use std::rc::Rc;

/// Parent that takes every leftover delta and every fling.
#[derive(Default)]
struct GreedyParent {
    post_seen: Vec<(Offset, Offset)>,
}

impl NestedScrollConnection for GreedyParent {
    fn on_post_scroll(
        &mut self,
        consumed: Offset,
        available: Offset,
        _source: NestedScrollSource,
    ) -> Offset {
        self.post_seen.push((consumed, available));
        available
    }

    fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        available
    }
}

#[test]
fn scroll_state_clamps_to_bounds() {
    let mut state = ScrollState::new(300.0);
    assert!(state.is_at_top());
    assert_eq!(state.consume_drag(-120.0), -120.0);
    assert_eq!(state.value(), 120.0);
    assert_eq!(state.consume_drag(200.0), 120.0, "only scrolls back to the top");
    assert!(state.is_at_top());
    state.scroll_to(1_000.0);
    assert_eq!(state.value(), 300.0);
}

#[test]
fn list_consumes_first_and_parent_gets_leftover() {
    let parent = Rc::new(RefCell::new(GreedyParent::default()));
    let shared: SharedConnection = parent.clone();
    let mut state = ScrollState::new(500.0);
    state.scroll_to(30.0);
    let mut node = ScrollableNode::with_parent(state, shared);

    let consumed = node.scroll_by(Offset::vertical(50.0));

    assert_eq!(consumed, Offset::vertical(50.0));
    assert!(node.state().is_at_top());
    assert_eq!(
        parent.borrow().post_seen,
        vec![(Offset::vertical(30.0), Offset::vertical(20.0))]
    );
}

#[test]
fn parent_taking_the_fling_leaves_list_nothing() {
    let shared: SharedConnection = Rc::new(RefCell::new(GreedyParent::default()));
    let mut node = ScrollableNode::with_parent(ScrollState::new(500.0), shared);

    node.fling(Velocity::vertical(1200.0));
    assert_eq!(node.last_fling_velocity(), Some(Velocity::ZERO));
}

#[test]
fn fling_velocity_is_clamped_without_parent() {
    let mut node = ScrollableNode::new(ScrollState::new(500.0));
    let kept = node.fling(Velocity::vertical(20_000.0));
    assert_eq!(kept, Velocity::vertical(MAX_FLING_VELOCITY));
}
