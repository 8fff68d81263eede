//! Pure math/data for units, geometry and colors used by the pull-to-refresh crates.
//!
//! Nothing in here knows about scrolling; these are the value types that the
//! nested scroll protocol, the indicator geometry and the container exchange.

#![allow(non_snake_case)]

mod color;
mod geometry;
mod unit;

pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::color::Color;
    pub use crate::geometry::{Offset, Point, Rect, Size, Velocity};
    pub use crate::unit::{Density, Dp};
}

#[cfg(test)]
#[path = "tests/graphics_tests.rs"]
mod tests;
