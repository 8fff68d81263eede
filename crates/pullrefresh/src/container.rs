//! The pull-to-refresh container.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use pullrefresh_animation::AnimationType;
use pullrefresh_core::StateSubscription;
use pullrefresh_foundation::SharedConnection;
use pullrefresh_ui_graphics::Density;

use crate::config::{PullRefreshConfig, ResolvedOffsets};
use crate::connection::PullRefreshNestedScrollConnection;
use crate::indicator::IndicatorParams;
use crate::slingshot::indicator_offset;
use crate::state::PullRefreshState;

/// One rendered frame of a [`PullRefresh`] container.
#[derive(Clone, Debug, PartialEq)]
pub struct PullRefreshFrame<I, C> {
    /// Content is shifted down by the pull offset.
    pub content_offset_y: f32,
    /// Bottom edge of the indicator, measured from the container top.
    pub indicator_offset_y: f32,
    pub indicator: I,
    pub content: C,
}

impl<I, C> PullRefreshFrame<I, C> {
    /// Top edge of an indicator `height` pixels tall.
    pub fn indicator_top(&self, height: f32) -> f32 {
        self.indicator_offset_y - height
    }
}

type SettleKey = (bool, bool);

/// Settles the offset whenever the drag ends or the refreshing flag flips.
struct SettleEffect {
    state: PullRefreshState,
    refreshing_px: Cell<f32>,
    animation: Cell<AnimationType>,
    last_key: Cell<Option<SettleKey>>,
    generation: Cell<u64>,
}

impl SettleEffect {
    fn key(&self) -> SettleKey {
        (self.state.is_pulling(), self.state.is_refreshing())
    }

    fn on_key_changed(this: &Rc<Self>) {
        let key = this.key();
        if this.last_key.replace(Some(key)) == Some(key) {
            return;
        }
        let generation = this.generation.get().wrapping_add(1);
        this.generation.set(generation);
        let weak: Weak<Self> = Rc::downgrade(this);
        this.state.runtime().enqueue_ui_task(Box::new(move || {
            if let Some(effect) = weak.upgrade() {
                effect.run(generation, key);
            }
        }));
    }

    fn run(&self, generation: u64, key: SettleKey) {
        // Superseded by a newer key change.
        if self.generation.get() != generation {
            return;
        }
        let (is_pulling, is_refreshing) = key;
        if is_pulling {
            return;
        }
        let target = if is_refreshing {
            self.refreshing_px.get()
        } else {
            0.0
        };
        if self.state.pull_offset() == target && !self.state.is_animating() {
            return;
        }
        if let Err(err) = self.state.animate_offset_to(target, self.animation.get()) {
            log::warn!("settle to {} skipped: {}", target, err);
        }
    }
}

/// A container that shifts its content down as the user pulls past the top
/// of a scrollable child and shows a refresh indicator above it.
///
/// Attach [`connection`](Self::connection) as the nested scroll parent of the
/// child, then call [`render`](Self::render) whenever the runtime asks for a frame.
pub struct PullRefresh<I, C> {
    state: PullRefreshState,
    config: PullRefreshConfig,
    offsets: ResolvedOffsets,
    connection: Rc<RefCell<PullRefreshNestedScrollConnection>>,
    indicator: Box<dyn FnMut(IndicatorParams) -> I>,
    content: Box<dyn FnMut() -> C>,
    settle: Rc<SettleEffect>,
    _subscriptions: [StateSubscription; 2],
}

impl<I, C> PullRefresh<I, C> {
    pub fn new(
        state: PullRefreshState,
        on_refresh: impl Fn() + 'static,
        config: PullRefreshConfig,
        density: Density,
        indicator: impl FnMut(IndicatorParams) -> I + 'static,
        content: impl FnMut() -> C + 'static,
    ) -> Self {
        let offsets = config.resolve(density);
        let mut connection = PullRefreshNestedScrollConnection::new(
            state.clone(),
            offsets,
            config.hysteresis_factor,
            Rc::new(on_refresh),
        );
        connection.set_enabled(config.pull_enabled);

        let settle = Rc::new(SettleEffect {
            state: state.clone(),
            refreshing_px: Cell::new(offsets.refreshing_px),
            animation: Cell::new(config.settle_animation),
            last_key: Cell::new(None),
            generation: Cell::new(0),
        });
        let observe = |settle: &Rc<SettleEffect>| {
            let weak = Rc::downgrade(settle);
            move || {
                if let Some(settle) = weak.upgrade() {
                    SettleEffect::on_key_changed(&settle);
                }
            }
        };
        let subscriptions = [
            state.is_pulling_state().subscribe(observe(&settle)),
            state.is_refreshing_state().subscribe(observe(&settle)),
        ];
        SettleEffect::on_key_changed(&settle);

        Self {
            state,
            config,
            offsets,
            connection: Rc::new(RefCell::new(connection)),
            indicator: Box::new(indicator),
            content: Box::new(content),
            settle,
            _subscriptions: subscriptions,
        }
    }

    pub fn state(&self) -> &PullRefreshState {
        &self.state
    }

    pub fn config(&self) -> &PullRefreshConfig {
        &self.config
    }

    pub fn offsets(&self) -> ResolvedOffsets {
        self.offsets
    }

    /// Connection to install as the nested scroll parent of the scrollable child.
    pub fn connection(&self) -> SharedConnection {
        self.connection.clone()
    }

    pub fn set_pull_enabled(&mut self, enabled: bool) {
        self.config.pull_enabled = enabled;
        self.connection.borrow_mut().set_enabled(enabled);
    }

    pub fn set_on_refresh(&mut self, on_refresh: impl Fn() + 'static) {
        self.connection
            .borrow_mut()
            .set_on_refresh(Rc::new(on_refresh));
    }

    /// Apply a new configuration, e.g. after the host changed offsets or density.
    pub fn set_config(&mut self, config: PullRefreshConfig, density: Density) {
        let offsets = config.resolve(density);
        {
            let mut connection = self.connection.borrow_mut();
            connection.set_enabled(config.pull_enabled);
            connection.set_offsets(offsets);
            connection.set_hysteresis_factor(config.hysteresis_factor);
        }
        self.settle.refreshing_px.set(offsets.refreshing_px);
        self.settle.animation.set(config.settle_animation);
        self.config = config;
        self.offsets = offsets;
    }

    pub fn render(&mut self) -> PullRefreshFrame<I, C> {
        let pull_offset = self.state.pull_offset();
        let params = IndicatorParams {
            pull_offset_px: pull_offset,
            trigger_offset_px: self.offsets.trigger_px,
            is_refreshing: self.state.is_refreshing(),
            is_pulling: self.state.is_pulling(),
        };
        PullRefreshFrame {
            content_offset_y: pull_offset,
            indicator_offset_y: indicator_offset(
                pull_offset,
                self.offsets.trigger_px,
                &self.config.indicator_motion,
            ),
            indicator: (self.indicator)(params),
            content: (self.content)(),
        }
    }
}
