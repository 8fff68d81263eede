//! Core runtime for the pull-to-refresh widget.
//!
//! Everything here is single-threaded: state cells, frame callbacks and the
//! mutator mutex are `!Send` and are expected to live on the UI thread.

mod collections;
mod frame_clock;
mod mutator;
mod platform;
mod runtime;
mod state;

pub use collections::{map, OrderedMap};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use mutator::{MutatePriority, MutationError, MutationToken, MutatorMutex};
pub use platform::{FrameRequestFlag, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use state::{MutableState, State, StateSubscription};

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod runtime_tests;

#[cfg(test)]
#[path = "tests/state_tests.rs"]
mod state_tests;

#[cfg(test)]
#[path = "tests/mutator_tests.rs"]
mod mutator_tests;
