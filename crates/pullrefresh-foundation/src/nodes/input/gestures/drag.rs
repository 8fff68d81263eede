//! Drag gesture recogniser.
//!
//! Turns a pointer down/move/up sequence into scroll deltas once the pointer
//! has travelled past [`DRAG_THRESHOLD`], and into a release velocity on up.

use pullrefresh_ui_graphics::{Offset, Point, Velocity};

use crate::gesture_constants::DRAG_THRESHOLD;
use crate::nodes::input::types::{PointerEvent, PointerEventKind};
use crate::nodes::input::velocity::VelocityTracker;

/// What the recogniser wants the scrollable to do with an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAction {
    /// Scroll by this pointer delta.
    Delta(Offset),
    /// The drag ended with this velocity.
    Release(Velocity),
    /// The drag was cancelled; treat as a release without velocity.
    Cancel,
}

#[derive(Debug, Default)]
pub struct DragGesture {
    down_position: Option<Point>,
    last_position: Point,
    dragging: bool,
    tracker: VelocityTracker,
}

impl DragGesture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn on_event(&mut self, event: &PointerEvent) -> Option<DragAction> {
        match event.kind {
            PointerEventKind::Down => {
                self.reset();
                self.down_position = Some(event.position);
                self.last_position = event.position;
                self.tracker.add_position(event.uptime_millis, event.position);
                None
            }
            PointerEventKind::Move => {
                let down = self.down_position?;
                self.tracker.add_position(event.uptime_millis, event.position);
                if !self.dragging {
                    let travelled = (event.position.y - down.y).abs();
                    if travelled <= DRAG_THRESHOLD {
                        return None;
                    }
                    self.dragging = true;
                    // The slop itself is not delivered as scroll.
                    let sign = (event.position.y - down.y).signum();
                    self.last_position = Point::new(down.x, down.y + sign * DRAG_THRESHOLD);
                }
                let delta = Offset::new(
                    event.position.x - self.last_position.x,
                    event.position.y - self.last_position.y,
                );
                self.last_position = event.position;
                event.consume();
                Some(DragAction::Delta(delta))
            }
            PointerEventKind::Up => {
                self.down_position?;
                self.tracker.add_position(event.uptime_millis, event.position);
                let was_dragging = self.dragging;
                let velocity = self.tracker.calculate_velocity();
                self.reset();
                if was_dragging {
                    event.consume();
                    Some(DragAction::Release(velocity))
                } else {
                    None
                }
            }
            PointerEventKind::Cancel => {
                let was_dragging = self.dragging;
                self.reset();
                was_dragging.then_some(DragAction::Cancel)
            }
        }
    }

    pub fn reset(&mut self) {
        self.down_position = None;
        self.dragging = false;
        self.tracker.reset();
    }
}

#[cfg(test)]
#[path = "../../../tests/drag_tests.rs"]
mod tests;
