//! Pull-to-refresh for a Compose-style runtime.
//!
//! [`PullRefreshState`] holds the pull offset and the refreshing/pulling
//! flags. [`PullRefreshNestedScrollConnection`] feeds it from a scrollable
//! child's nested scroll deltas, and [`PullRefresh`] ties both to an indicator
//! renderer and settles the offset when a drag ends.

#![allow(non_snake_case)]

mod config;
mod connection;
mod container;
mod indicator;
mod painter;
mod slingshot;
mod state;

pub use config::{
    PullRefreshConfig, ResolvedOffsets, DEFAULT_HYSTERESIS_FACTOR, DEFAULT_REFRESHING_MAX_PULL_OFFSET,
    DEFAULT_REFRESHING_OFFSET, DEFAULT_REFRESH_TRIGGER_OFFSET,
};
pub use connection::{damping_rate, PullRefreshNestedScrollConnection};
pub use container::{PullRefresh, PullRefreshFrame};
pub use indicator::{
    IndicatorFrame, IndicatorParams, IndicatorSizes, IndicatorStyle, PullRefreshIndicator,
    CROSSFADE_DURATION_MS,
};
pub use painter::{CircularProgressPainter, ProgressGeometry};
pub use slingshot::{indicator_offset, IndicatorGeometry, Slingshot, SlingshotSpec, MAX_PROGRESS_ARC};
pub use state::{PullRefreshState, PullRefreshSubscription};

pub mod prelude {
    pub use crate::config::PullRefreshConfig;
    pub use crate::container::{PullRefresh, PullRefreshFrame};
    pub use crate::indicator::{IndicatorParams, PullRefreshIndicator};
    pub use crate::state::PullRefreshState;
}

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;

#[cfg(test)]
#[path = "tests/connection_tests.rs"]
mod connection_tests;

#[cfg(test)]
#[path = "tests/slingshot_tests.rs"]
mod slingshot_tests;

#[cfg(test)]
#[path = "tests/indicator_tests.rs"]
mod indicator_tests;

#[cfg(test)]
#[path = "tests/container_tests.rs"]
mod container_tests;
