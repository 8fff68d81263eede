//! Container configuration.

use pullrefresh_animation::{AnimationSpec, AnimationType, Easing};
use pullrefresh_ui_graphics::{Density, Dp};

use crate::slingshot::SlingshotSpec;

pub const DEFAULT_REFRESH_TRIGGER_OFFSET: Dp = Dp(120.0);
pub const DEFAULT_REFRESHING_OFFSET: Dp = Dp(100.0);
pub const DEFAULT_REFRESHING_MAX_PULL_OFFSET: Dp = Dp(240.0);

/// A refresh in progress is dropped once the pull falls below
/// `trigger * DEFAULT_HYSTERESIS_FACTOR`.
pub const DEFAULT_HYSTERESIS_FACTOR: f32 = 0.6;

/// Configuration of a [`PullRefresh`](crate::PullRefresh) container.
///
/// Offsets are density independent and resolved with [`PullRefreshConfig::resolve`].
/// Callers must keep every offset positive; zero offsets divide by zero in the
/// indicator curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PullRefreshConfig {
    pub pull_enabled: bool,
    /// Pull distance at which releasing starts a refresh.
    pub refresh_trigger_offset: Dp,
    /// Where content rests while refreshing.
    pub refreshing_offset: Dp,
    /// Hard cap of the pull distance.
    pub refreshing_max_pull_offset: Dp,
    pub hysteresis_factor: f32,
    /// Animation used to settle after release or when refreshing changes.
    pub settle_animation: AnimationType,
    pub indicator_motion: SlingshotSpec,
}

impl PullRefreshConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pull_enabled(mut self, enabled: bool) -> Self {
        self.pull_enabled = enabled;
        self
    }

    pub fn with_refresh_trigger_offset(mut self, offset: Dp) -> Self {
        self.refresh_trigger_offset = offset;
        self
    }

    pub fn with_refreshing_offset(mut self, offset: Dp) -> Self {
        self.refreshing_offset = offset;
        self
    }

    pub fn with_refreshing_max_pull_offset(mut self, offset: Dp) -> Self {
        self.refreshing_max_pull_offset = offset;
        self
    }

    pub fn with_hysteresis_factor(mut self, factor: f32) -> Self {
        self.hysteresis_factor = factor;
        self
    }

    pub fn with_settle_animation(mut self, animation: AnimationType) -> Self {
        self.settle_animation = animation;
        self
    }

    pub fn with_indicator_motion(mut self, spec: SlingshotSpec) -> Self {
        self.indicator_motion = spec;
        self
    }

    pub fn resolve(&self, density: Density) -> ResolvedOffsets {
        ResolvedOffsets {
            trigger_px: density.dp_to_px(self.refresh_trigger_offset),
            refreshing_px: density.dp_to_px(self.refreshing_offset),
            max_px: density.dp_to_px(self.refreshing_max_pull_offset),
        }
    }
}

impl Default for PullRefreshConfig {
    fn default() -> Self {
        Self {
            pull_enabled: true,
            refresh_trigger_offset: DEFAULT_REFRESH_TRIGGER_OFFSET,
            refreshing_offset: DEFAULT_REFRESHING_OFFSET,
            refreshing_max_pull_offset: DEFAULT_REFRESHING_MAX_PULL_OFFSET,
            hysteresis_factor: DEFAULT_HYSTERESIS_FACTOR,
            settle_animation: AnimationType::Tween(AnimationSpec::tween(
                300,
                Easing::FastOutSlowInEasing,
            )),
            indicator_motion: SlingshotSpec::default(),
        }
    }
}

/// Container offsets in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedOffsets {
    pub trigger_px: f32,
    pub refreshing_px: f32,
    pub max_px: f32,
}
