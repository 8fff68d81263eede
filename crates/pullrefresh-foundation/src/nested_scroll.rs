//! Nested scroll protocol.
//!
//! A scrollable child offers every drag delta to its ancestor connection
//! before consuming it (pre-scroll) and offers what it could not consume
//! afterwards (post-scroll). Releases go through the same two phases as
//! velocities (pre-fling, post-fling).
//!
//! Deltas use pointer direction: positive `y` means the finger moved down.

use std::cell::RefCell;
use std::rc::Rc;

use pullrefresh_ui_graphics::{Offset, Velocity};

/// Where a scroll delta came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NestedScrollSource {
    /// Direct pointer movement.
    Drag,
    /// Inertial movement after a release.
    Fling,
}

/// Ancestor hook into a child's scrolling. Every method returns the amount it consumed.
pub trait NestedScrollConnection {
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        let _ = (available, source);
        Offset::ZERO
    }

    fn on_post_scroll(
        &mut self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        let _ = (consumed, available, source);
        Offset::ZERO
    }

    fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        let _ = available;
        Velocity::ZERO
    }

    fn on_post_fling(&mut self, consumed: Velocity, available: Velocity) -> Velocity {
        let _ = (consumed, available);
        Velocity::ZERO
    }
}

pub type SharedConnection = Rc<RefCell<dyn NestedScrollConnection>>;

/// Child-side entry point that forwards each phase to the parent connection.
#[derive(Default)]
pub struct NestedScrollDispatcher {
    parent: Option<SharedConnection>,
}

impl NestedScrollDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parent(parent: SharedConnection) -> Self {
        Self {
            parent: Some(parent),
        }
    }

    pub fn set_parent(&mut self, parent: Option<SharedConnection>) {
        self.parent = parent;
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn dispatch_pre_scroll(&self, available: Offset, source: NestedScrollSource) -> Offset {
        match &self.parent {
            Some(parent) => parent.borrow_mut().on_pre_scroll(available, source),
            None => Offset::ZERO,
        }
    }

    pub fn dispatch_post_scroll(
        &self,
        consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        match &self.parent {
            Some(parent) => parent
                .borrow_mut()
                .on_post_scroll(consumed, available, source),
            None => Offset::ZERO,
        }
    }

    pub fn dispatch_pre_fling(&self, available: Velocity) -> Velocity {
        match &self.parent {
            Some(parent) => parent.borrow_mut().on_pre_fling(available),
            None => Velocity::ZERO,
        }
    }

    pub fn dispatch_post_fling(&self, consumed: Velocity, available: Velocity) -> Velocity {
        match &self.parent {
            Some(parent) => parent.borrow_mut().on_post_fling(consumed, available),
            None => Velocity::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "tests/nested_scroll_tests.rs"]
mod tests;
