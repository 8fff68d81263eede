//! Nested scroll connection that turns drag deltas into pull offset.

use std::f32::consts::FRAC_PI_2;
use std::rc::Rc;

use pullrefresh_foundation::{NestedScrollConnection, NestedScrollSource};
use pullrefresh_ui_graphics::{Offset, Velocity};

use crate::config::ResolvedOffsets;
use crate::state::PullRefreshState;

/// Fraction of a downward delta that still moves the offset. Falls from `1`
/// at rest to `0` at `max_offset` along a quarter cosine.
pub fn damping_rate(pull_offset: f32, max_offset: f32) -> f32 {
    let fraction = (pull_offset.abs() / max_offset).min(1.0);
    (fraction * FRAC_PI_2).cos()
}

/// Intercepts the drags of a scrollable child.
///
/// * Pre-scroll: an upward drag first pulls the offset back toward `0`.
/// * Post-scroll: a downward drag the child could not use (it is at its top)
///   grows the offset, damped by [`damping_rate`].
/// * Pre-fling: the drag is over, so evaluate the refresh threshold.
pub struct PullRefreshNestedScrollConnection {
    state: PullRefreshState,
    offsets: ResolvedOffsets,
    hysteresis_factor: f32,
    enabled: bool,
    on_refresh: Rc<dyn Fn()>,
}

impl PullRefreshNestedScrollConnection {
    pub fn new(
        state: PullRefreshState,
        offsets: ResolvedOffsets,
        hysteresis_factor: f32,
        on_refresh: Rc<dyn Fn()>,
    ) -> Self {
        Self {
            state,
            offsets,
            hysteresis_factor,
            enabled: true,
            on_refresh,
        }
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_on_refresh(&mut self, on_refresh: Rc<dyn Fn()>) {
        self.on_refresh = on_refresh;
    }

    pub fn set_offsets(&mut self, offsets: ResolvedOffsets) {
        self.offsets = offsets;
    }

    pub fn set_hysteresis_factor(&mut self, factor: f32) {
        self.hysteresis_factor = factor;
    }

    pub fn state(&self) -> &PullRefreshState {
        &self.state
    }

    fn intercepts(&self, source: NestedScrollSource) -> bool {
        self.enabled && source == NestedScrollSource::Drag
    }
}

impl NestedScrollConnection for PullRefreshNestedScrollConnection {
    fn on_pre_scroll(&mut self, available: Offset, source: NestedScrollSource) -> Offset {
        if !self.intercepts(source) || available.y >= 0.0 || self.state.pull_offset() <= 0.0 {
            return Offset::ZERO;
        }
        let applied = self
            .state
            .apply_scroll_delta(available.y, self.offsets.max_px);
        log::trace!("pre-scroll {} consumed {}", available.y, applied);
        Offset::vertical(applied)
    }

    fn on_post_scroll(
        &mut self,
        _consumed: Offset,
        available: Offset,
        source: NestedScrollSource,
    ) -> Offset {
        if !self.intercepts(source) || available.y <= 0.0 {
            return Offset::ZERO;
        }
        let rate = damping_rate(self.state.pull_offset(), self.offsets.max_px);
        let applied = self
            .state
            .apply_scroll_delta(available.y * rate, self.offsets.max_px);
        log::trace!(
            "post-scroll {} at rate {:.3} consumed {}",
            available.y,
            rate,
            applied
        );
        Offset::vertical(applied)
    }

    fn on_pre_fling(&mut self, available: Velocity) -> Velocity {
        let was_pulling = self.state.is_pulling();
        self.state.set_pulling(false);
        if !self.enabled {
            return Velocity::ZERO;
        }
        let on_refresh = Rc::clone(&self.on_refresh);
        let triggered = self.state.evaluate_threshold(
            self.offsets.trigger_px,
            self.hysteresis_factor,
            || on_refresh(),
        );
        if was_pulling && !triggered {
            log::debug!("release swallowed fling {:?}", available);
            available
        } else {
            Velocity::ZERO
        }
    }
}
