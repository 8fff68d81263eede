//! Pull state: offset, refreshing and pulling flags.

use std::rc::Rc;

use pullrefresh_animation::{Animatable, AnimationEndReason, AnimationType};
use pullrefresh_core::{
    MutableState, MutatePriority, MutationError, MutatorMutex,
    RuntimeHandle, State, StateSubscription,
};
use smallvec::SmallVec;

struct PullStateInner {
    pull_offset: Animatable<f32>,
    mutator: MutatorMutex,
    is_refreshing: MutableState<bool>,
    is_pulling: MutableState<bool>,
    runtime: RuntimeHandle,
}

/// State of one pull-to-refresh container.
///
/// Offset changes go through a [`MutatorMutex`]: drag deltas run with
/// [`MutatePriority::UserInput`] and pre-empt a settle animation, which runs
/// with [`MutatePriority::Default`].
#[derive(Clone)]
pub struct PullRefreshState {
    inner: Rc<PullStateInner>,
}

impl PullRefreshState {
    pub fn new(is_refreshing: bool, runtime: RuntimeHandle) -> Self {
        let pull_offset = Animatable::new(0.0, runtime.clone());
        // The offset never goes negative, even while a bouncy spring settles.
        pull_offset.updateBounds(Some(0.0), None);
        Self {
            inner: Rc::new(PullStateInner {
                pull_offset,
                mutator: MutatorMutex::new(),
                is_refreshing: MutableState::with_runtime(is_refreshing, runtime.clone()),
                is_pulling: MutableState::with_runtime(false, runtime.clone()),
                runtime,
            }),
        }
    }

    pub fn pull_offset(&self) -> f32 {
        self.inner.pull_offset.value()
    }

    pub fn is_refreshing(&self) -> bool {
        self.inner.is_refreshing.get()
    }

    pub fn is_pulling(&self) -> bool {
        self.inner.is_pulling.get()
    }

    /// Report that the host started or finished refreshing.
    pub fn set_refreshing(&self, refreshing: bool) {
        self.inner.is_refreshing.set_value(refreshing);
    }

    pub(crate) fn set_pulling(&self, pulling: bool) {
        self.inner.is_pulling.set_value(pulling);
    }

    pub fn pull_offset_state(&self) -> State<f32> {
        self.inner.pull_offset.state()
    }

    pub fn is_refreshing_state(&self) -> State<bool> {
        self.inner.is_refreshing.as_state()
    }

    pub fn is_pulling_state(&self) -> State<bool> {
        self.inner.is_pulling.as_state()
    }

    pub fn runtime(&self) -> RuntimeHandle {
        self.inner.runtime.clone()
    }

    /// Whether a settle animation is moving the offset right now.
    pub fn is_animating(&self) -> bool {
        self.inner.pull_offset.is_running()
    }

    /// Call `observer` after any change to the offset or either flag.
    pub fn subscribe(&self, observer: impl Fn() + 'static) -> PullRefreshSubscription {
        let observer: Rc<dyn Fn()> = Rc::new(observer);
        let mut subscriptions = SmallVec::new();
        let forward = |observer: &Rc<dyn Fn()>| {
            let observer = Rc::clone(observer);
            move || observer()
        };
        subscriptions.push(self.pull_offset_state().subscribe(forward(&observer)));
        subscriptions.push(self.inner.is_refreshing.subscribe(forward(&observer)));
        subscriptions.push(self.inner.is_pulling.subscribe(forward(&observer)));
        PullRefreshSubscription { subscriptions }
    }

    /// Animate the offset to `target` over several frames.
    ///
    /// Rejected only while a higher-priority mutation holds the mutex. A later
    /// drag delta cancels the animation at its next frame.
    pub fn animate_offset_to(
        &self,
        target: f32,
        animation: AnimationType,
    ) -> Result<(), MutationError> {
        let token = self.inner.mutator.try_acquire(MutatePriority::Default)?;
        log::debug!(
            "settling pull offset {} -> {}",
            self.pull_offset(),
            target
        );
        let weak = Rc::downgrade(&self.inner);
        let held = token.clone();
        self.inner
            .pull_offset
            .animateToGuarded(target, animation, token, move |reason| {
                if reason == AnimationEndReason::Interrupted {
                    log::debug!("settle animation interrupted");
                }
                if let Some(inner) = weak.upgrade() {
                    inner.mutator.release(&held);
                }
            });
        Ok(())
    }

    /// Move the offset by `delta` immediately, clamped to `[0, max_offset]`,
    /// and mark the state as pulling. Returns the change actually applied.
    pub fn apply_scroll_delta(&self, delta: f32, max_offset: f32) -> f32 {
        let offset = &self.inner.pull_offset;
        let applied = self
            .inner
            .mutator
            .mutate(MutatePriority::UserInput, |_| {
                let current = offset.value();
                let next = (current + delta).clamp(0.0, max_offset);
                offset.snapTo(next);
                next - current
            });
        match applied {
            Ok(applied) => {
                self.set_pulling(true);
                applied
            }
            Err(err) => {
                log::warn!("dropping scroll delta {}: {}", delta, err);
                0.0
            }
        }
    }

    /// Start or drop a refresh based on the current offset.
    ///
    /// Starts refreshing (and calls `on_refresh`) once the offset reaches
    /// `trigger_offset`; drops an ongoing refresh once the offset is below
    /// `trigger_offset * hysteresis_factor`. Returns whether a refresh was
    /// started by this call.
    pub fn evaluate_threshold(
        &self,
        trigger_offset: f32,
        hysteresis_factor: f32,
        on_refresh: impl FnOnce(),
    ) -> bool {
        let offset = self.pull_offset();
        if !self.is_refreshing() && offset >= trigger_offset {
            log::debug!("refresh triggered at offset {}", offset);
            self.set_refreshing(true);
            on_refresh();
            true
        } else if self.is_refreshing() && offset < trigger_offset * hysteresis_factor {
            log::debug!("refresh dropped at offset {}", offset);
            self.set_refreshing(false);
            false
        } else {
            false
        }
    }
}

/// Keeps a [`PullRefreshState::subscribe`] observer registered.
pub struct PullRefreshSubscription {
    subscriptions: SmallVec<[StateSubscription; 3]>,
}

impl PullRefreshSubscription {
    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }
}
