//! Platform abstraction traits for runtime services.
//!
//! The host decides when frames actually happen; the runtime only asks.

use std::sync::atomic::{AtomicBool, Ordering};

/// Schedules work for the runtime.
///
/// Implementations are responsible for triggering frame processing on behalf
/// of the runtime. They must be safe to use from multiple threads.
pub trait RuntimeScheduler: Send + Sync {
    /// Request that the host schedule a new frame.
    fn schedule_frame(&self);
}

/// Scheduler that only records that a frame was requested.
///
/// Headless hosts (tests, the console demo) poll [`FrameRequestFlag::take`]
/// from their own loop.
#[derive(Debug, Default)]
pub struct FrameRequestFlag {
    requested: AtomicBool,
}

impl FrameRequestFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether a frame was requested since the last call, clearing the flag.
    pub fn take(&self) -> bool {
        self.requested.swap(false, Ordering::AcqRel)
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }
}

impl RuntimeScheduler for FrameRequestFlag {
    fn schedule_frame(&self) {
        self.requested.store(true, Ordering::Release);
    }
}
