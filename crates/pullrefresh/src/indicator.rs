//! Default pull-to-refresh indicator.
//!
//! A round surface showing either the arc-with-arrow drawn by
//! [`CircularProgressPainter`] while pulling, or an indeterminate spinner while
//! refreshing. Switching between the two cross-fades over
//! [`CROSSFADE_DURATION_MS`].

use std::cell::Cell;

use pullrefresh_animation::{Animatable, AnimationSpec, AnimationType};
use pullrefresh_core::RuntimeHandle;
use pullrefresh_ui_graphics::{Color, Dp};

use crate::painter::CircularProgressPainter;
use crate::slingshot::{IndicatorGeometry, SlingshotSpec};

pub const CROSSFADE_DURATION_MS: u64 = 100;

/// Pull offsets up to this many pixels leave the surface flat.
const ELEVATION_OFFSET_THRESHOLD: f32 = 0.5;

/// The four values an indicator renderer receives each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorParams {
    pub pull_offset_px: f32,
    pub trigger_offset_px: f32,
    pub is_refreshing: bool,
    pub is_pulling: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorSizes {
    pub size: Dp,
    pub arc_radius: Dp,
    pub stroke_width: Dp,
    pub arrow_width: Dp,
    pub arrow_height: Dp,
}

impl IndicatorSizes {
    /// Diameter of the spinner shown while refreshing.
    pub fn spinner_size(&self) -> Dp {
        (self.arc_radius + self.stroke_width) * 2.0
    }
}

impl Default for IndicatorSizes {
    fn default() -> Self {
        Self {
            size: Dp(40.0),
            arc_radius: Dp(7.5),
            stroke_width: Dp(2.5),
            arrow_width: Dp(10.0),
            arrow_height: Dp(5.0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorStyle {
    pub background_color: Color,
    pub content_color: Color,
    pub elevation: Dp,
}

impl IndicatorStyle {
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn with_content_color(mut self, color: Color) -> Self {
        self.content_color = color;
        self
    }

    pub fn with_elevation(mut self, elevation: Dp) -> Self {
        self.elevation = elevation;
        self
    }
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        Self {
            background_color: Color::WHITE,
            content_color: Color::BLUE,
            elevation: Dp(6.0),
        }
    }
}

/// Renderable description of the indicator for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndicatorFrame {
    pub params: IndicatorParams,
    pub size: Dp,
    pub background_color: Color,
    pub elevation: Dp,
    pub geometry: IndicatorGeometry,
    /// Arc-and-arrow layer.
    pub painter: CircularProgressPainter,
    pub painter_alpha: f32,
    pub spinner_size: Dp,
    pub spinner_color: Color,
    pub spinner_alpha: f32,
}

pub struct PullRefreshIndicator {
    sizes: IndicatorSizes,
    style: IndicatorStyle,
    motion: SlingshotSpec,
    /// `0` shows the arc layer, `1` the spinner.
    crossfade: Animatable<f32>,
    last_refreshing: Cell<Option<bool>>,
}

impl PullRefreshIndicator {
    pub fn new(runtime: RuntimeHandle) -> Self {
        Self {
            sizes: IndicatorSizes::default(),
            style: IndicatorStyle::default(),
            motion: SlingshotSpec::default(),
            crossfade: Animatable::new(0.0, runtime),
            last_refreshing: Cell::new(None),
        }
    }

    pub fn with_sizes(mut self, sizes: IndicatorSizes) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_style(mut self, style: IndicatorStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_motion(mut self, motion: SlingshotSpec) -> Self {
        self.motion = motion;
        self
    }

    pub fn sizes(&self) -> IndicatorSizes {
        self.sizes
    }

    pub fn style(&self) -> IndicatorStyle {
        self.style
    }

    pub fn render(&self, params: IndicatorParams) -> IndicatorFrame {
        self.update_crossfade(params.is_refreshing);

        let geometry = IndicatorGeometry::compute(
            params.pull_offset_px,
            params.trigger_offset_px,
            &self.motion,
        );
        let elevation =
            if params.is_refreshing || params.pull_offset_px > ELEVATION_OFFSET_THRESHOLD {
                self.style.elevation
            } else {
                Dp::ZERO
            };
        let alpha = (params.pull_offset_px / params.trigger_offset_px).clamp(0.0, 1.0);

        let painter = CircularProgressPainter {
            color: self.style.content_color,
            alpha,
            arc_radius: self.sizes.arc_radius,
            stroke_width: self.sizes.stroke_width,
            arrow_enabled: !params.is_refreshing,
            arrow_width: self.sizes.arrow_width,
            arrow_height: self.sizes.arrow_height,
            arrow_scale: geometry.arrow_scale,
            start_trim: geometry.start_trim,
            end_trim: geometry.end_trim,
            rotation: geometry.rotation,
        };
        let spinner_alpha = self.crossfade.value().clamp(0.0, 1.0);

        IndicatorFrame {
            params,
            size: self.sizes.size,
            background_color: self.style.background_color,
            elevation,
            geometry,
            painter,
            painter_alpha: 1.0 - spinner_alpha,
            spinner_size: self.sizes.spinner_size(),
            spinner_color: self.style.content_color,
            spinner_alpha,
        }
    }

    /// Adapt into the renderer closure a [`PullRefresh`](crate::PullRefresh) container takes.
    pub fn into_renderer(self) -> impl FnMut(IndicatorParams) -> IndicatorFrame {
        move |params| self.render(params)
    }

    fn update_crossfade(&self, refreshing: bool) {
        let target = if refreshing { 1.0 } else { 0.0 };
        match self.last_refreshing.replace(Some(refreshing)) {
            None => self.crossfade.snapTo(target),
            Some(previous) if previous != refreshing => {
                log::trace!("indicator cross-fade to refreshing={}", refreshing);
                self.crossfade.animateTo(
                    target,
                    AnimationType::Tween(AnimationSpec::linear(CROSSFADE_DURATION_MS)),
                );
            }
            Some(_) => {}
        }
    }
}
