//! Release velocity estimation from recent pointer samples.

use pullrefresh_ui_graphics::{Point, Velocity};
use smallvec::SmallVec;

use crate::gesture_constants::VELOCITY_SAMPLE_WINDOW_MILLIS;

#[derive(Clone, Copy, Debug)]
struct Sample {
    position: Point,
    uptime_millis: u64,
}

/// Tracks pointer positions and estimates velocity over the last
/// [`VELOCITY_SAMPLE_WINDOW_MILLIS`].
#[derive(Debug, Default)]
pub struct VelocityTracker {
    samples: SmallVec<[Sample; 16]>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_position(&mut self, uptime_millis: u64, position: Point) {
        self.samples.push(Sample {
            position,
            uptime_millis,
        });
        let cutoff = uptime_millis.saturating_sub(VELOCITY_SAMPLE_WINDOW_MILLIS);
        self.samples.retain(|sample| sample.uptime_millis >= cutoff);
    }

    /// Average velocity between the oldest and newest sample in the window.
    pub fn calculate_velocity(&self) -> Velocity {
        let (Some(first), Some(last)) = (self.samples.first(), self.samples.last()) else {
            return Velocity::ZERO;
        };
        let elapsed_millis = last.uptime_millis.saturating_sub(first.uptime_millis);
        if elapsed_millis == 0 {
            return Velocity::ZERO;
        }
        let seconds = elapsed_millis as f32 / 1000.0;
        Velocity::new(
            (last.position.x - first.position.x) / seconds,
            (last.position.y - first.position.y) / seconds,
        )
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }
}
