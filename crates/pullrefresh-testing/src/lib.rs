//! Testing utilities for the pull-to-refresh widget.

pub mod robot;

pub use robot::*;

pub mod prelude {
    pub use crate::robot::*;
}
