//! Indicator motion: how far the arc is drawn, how it rotates and where the
//! indicator sits for a given pull offset.
//!
//! The arc only starts growing once the pull passes
//! [`SlingshotSpec::activation_fraction`] of the trigger distance. Past the
//! trigger, overshoot is eased with `(t/4 - (t/4)^2) * 2` so the indicator
//! stretches and then settles.

/// Tunables of the indicator motion curves.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlingshotSpec {
    /// Fraction of the trigger distance before the arc starts to animate.
    pub activation_fraction: f32,
    /// Largest arc sweep as a fraction of a full circle.
    pub max_progress_arc: f32,
    /// Overshoot past the trigger is capped at this many trigger distances.
    pub max_tension: f32,
}

impl Default for SlingshotSpec {
    fn default() -> Self {
        Self {
            activation_fraction: 0.4,
            max_progress_arc: MAX_PROGRESS_ARC,
            max_tension: 2.0,
        }
    }
}

pub const MAX_PROGRESS_ARC: f32 = 0.8;

/// Arc trims, rotation and arrow scale of the progress painter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Slingshot {
    pub start_trim: f32,
    pub end_trim: f32,
    pub rotation: f32,
    pub arrow_scale: f32,
}

impl Slingshot {
    pub fn compute(offset_y: f32, max_offset_y: f32, spec: &SlingshotSpec) -> Self {
        let offset_percent = (offset_y / max_offset_y).min(1.0);
        let adjusted_percent = (offset_percent - spec.activation_fraction).max(0.0)
            / (1.0 - spec.activation_fraction);
        let tension_percent = tension_percent(offset_y, max_offset_y, spec.max_tension);

        Self {
            start_trim: 0.0,
            end_trim: (adjusted_percent * spec.max_progress_arc).min(spec.max_progress_arc),
            rotation: (-0.25 + 0.4 * adjusted_percent + tension_percent * 2.0) * 0.5,
            arrow_scale: adjusted_percent.min(1.0),
        }
    }
}

/// Bottom edge of the indicator: follows the pull up to the trigger, then
/// drifts with the eased overshoot.
pub fn indicator_offset(pull_offset_y: f32, max_offset_y: f32, spec: &SlingshotSpec) -> f32 {
    let offset_percent = (pull_offset_y / max_offset_y).min(1.0);
    let extra_move = max_offset_y * tension_percent(pull_offset_y, max_offset_y, spec.max_tension);
    max_offset_y * offset_percent + extra_move
}

fn tension_percent(offset_y: f32, max_offset_y: f32, max_tension: f32) -> f32 {
    let extra_offset = offset_y.abs() - max_offset_y;
    let slingshot_percent = (extra_offset / max_offset_y).clamp(0.0, max_tension);
    let quarter = slingshot_percent / 4.0;
    (quarter - quarter.powi(2)) * 2.0
}

/// Everything the visual layer needs from one pull offset.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct IndicatorGeometry {
    pub start_trim: f32,
    pub end_trim: f32,
    pub rotation: f32,
    pub arrow_scale: f32,
    pub vertical_offset: f32,
}

impl IndicatorGeometry {
    pub fn compute(pull_offset: f32, trigger_offset: f32, spec: &SlingshotSpec) -> Self {
        let slingshot = Slingshot::compute(pull_offset, trigger_offset, spec);
        Self {
            start_trim: slingshot.start_trim,
            end_trim: slingshot.end_trim,
            rotation: slingshot.rotation,
            arrow_scale: slingshot.arrow_scale,
            vertical_offset: indicator_offset(pull_offset, trigger_offset, spec),
        }
    }
}
