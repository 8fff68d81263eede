//! Animation system for the pull-to-refresh widget.
//!
//! Time-based tweens with easing curves and spring physics, stepped by the
//! runtime's frame clock.

mod animation;

pub use animation::*;
