//! Vertical scroll state for a child list and the node that routes its drags
//! through the nested scroll protocol.

use pullrefresh_ui_graphics::{Offset, Velocity};

use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::nested_scroll::{NestedScrollDispatcher, NestedScrollSource, SharedConnection};

/// Scroll position of a vertically scrolling child, `0` being the top.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    value: f32,
    max_value: f32,
}

impl ScrollState {
    pub fn new(max_value: f32) -> Self {
        Self {
            value: 0.0,
            max_value: max_value.max(0.0),
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn max_value(&self) -> f32 {
        self.max_value
    }

    pub fn is_at_top(&self) -> bool {
        self.value <= 0.0
    }

    pub fn scroll_to(&mut self, value: f32) {
        self.value = value.clamp(0.0, self.max_value);
    }

    /// Apply a pointer delta and return the part the list consumed.
    ///
    /// Dragging down (positive) moves the list toward its top.
    pub fn consume_drag(&mut self, delta: f32) -> f32 {
        let old = self.value;
        self.value = (old - delta).clamp(0.0, self.max_value);
        old - self.value
    }
}

/// A scrollable child with an optional nested scroll parent.
pub struct ScrollableNode {
    state: ScrollState,
    dispatcher: NestedScrollDispatcher,
    last_fling_velocity: Option<Velocity>,
}

impl ScrollableNode {
    pub fn new(state: ScrollState) -> Self {
        Self {
            state,
            dispatcher: NestedScrollDispatcher::new(),
            last_fling_velocity: None,
        }
    }

    pub fn with_parent(state: ScrollState, parent: SharedConnection) -> Self {
        Self {
            state,
            dispatcher: NestedScrollDispatcher::with_parent(parent),
            last_fling_velocity: None,
        }
    }

    pub fn state(&self) -> &ScrollState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ScrollState {
        &mut self.state
    }

    /// Velocity the list itself received on the last release, after the parent took its share.
    pub fn last_fling_velocity(&self) -> Option<Velocity> {
        self.last_fling_velocity
    }

    /// Route one drag delta through pre-scroll, the list, and post-scroll.
    /// Returns the total consumed by parent and child together.
    pub fn scroll_by(&mut self, delta: Offset) -> Offset {
        let pre = self
            .dispatcher
            .dispatch_pre_scroll(delta, NestedScrollSource::Drag);
        let available = delta - pre;
        let own = Offset::vertical(self.state.consume_drag(available.y));
        let left = available - own;
        let post = if left.is_zero() {
            Offset::ZERO
        } else {
            self.dispatcher
                .dispatch_post_scroll(own, left, NestedScrollSource::Drag)
        };
        log::trace!(
            "scroll_by {:?}: parent pre {:?}, list {:?}, parent post {:?}",
            delta,
            pre,
            own,
            post
        );
        pre + own + post
    }

    /// Release the drag with `velocity`. The parent sees it first; whatever it
    /// leaves becomes the list's own fling.
    pub fn fling(&mut self, velocity: Velocity) -> Velocity {
        let velocity = velocity.clamp_magnitude(MAX_FLING_VELOCITY);
        let pre = self.dispatcher.dispatch_pre_fling(velocity);
        let available = velocity - pre;
        self.last_fling_velocity = Some(available);
        let post = self
            .dispatcher
            .dispatch_post_fling(available, Velocity::ZERO);
        available - post
    }
}

#[cfg(test)]
#[path = "tests/scroll_tests.rs"]
mod tests;
