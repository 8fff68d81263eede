//! Shared gesture constants for consistent touch/pointer handling.
//!
//! Values are in logical pixels. For very high-density touch screens,
//! consider scaling by the device's density factor.

/// Drag threshold in logical pixels.
///
/// Once the pointer moves further than this from the press position, the
/// drag starts and every further move is delivered as a scroll delta.
/// Matches Android's ~8dp `ViewConfiguration.TOUCH_SLOP`.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Maximum fling velocity in logical pixels per second.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;

/// Only pointer samples this recent contribute to the release velocity.
pub const VELOCITY_SAMPLE_WINDOW_MILLIS: u64 = 100;
