//! Robot that drives a [`PullRefresh`] container without a window.
//!
//! The robot owns the runtime, a scrollable list nested under the container's
//! connection, and a virtual clock. Drags go through the nested scroll
//! protocol exactly as a host would send them; frames are pumped explicitly.
//!
//! ```
//! use pullrefresh::PullRefreshConfig;
//! use pullrefresh_testing::PullRefreshRobot;
//!
//! let mut robot = PullRefreshRobot::headless(PullRefreshConfig::default());
//! robot.drag_by(200.0);
//! robot.release(0.0);
//! robot.settle();
//! assert_eq!(robot.refresh_count(), 1);
//! ```

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use pullrefresh::{
    IndicatorFrame, IndicatorParams, PullRefresh, PullRefreshConfig, PullRefreshFrame,
    PullRefreshIndicator, PullRefreshState,
};
use pullrefresh_core::{FrameRequestFlag, Runtime, RuntimeHandle};
use pullrefresh_foundation::{
    DragAction, DragGesture, PointerEvent, PointerEventKind, ScrollState, ScrollableNode,
};
use pullrefresh_ui_graphics::{Density, Offset, Point, Velocity};

pub const FRAME_NANOS: u64 = 16_666_667;

/// Upper bound on frames pumped by [`PullRefreshRobot::settle`].
pub const MAX_SETTLE_FRAMES: usize = 600;

/// Default scroll range of the robot's list.
pub const DEFAULT_LIST_EXTENT: f32 = 2_000.0;

pub struct PullRefreshRobot<I, C> {
    runtime: Runtime,
    frame_flag: Arc<FrameRequestFlag>,
    container: PullRefresh<I, C>,
    list: ScrollableNode,
    gesture: DragGesture,
    frame_time_nanos: u64,
    uptime_millis: u64,
    refreshes: Rc<Cell<u32>>,
}

impl PullRefreshRobot<IndicatorParams, ()> {
    /// Robot with a pass-through indicator and empty content at density 1.
    pub fn headless(config: PullRefreshConfig) -> Self {
        Self::new(config, Density::default(), |params| params, || ())
    }
}

impl PullRefreshRobot<IndicatorFrame, ()> {
    /// Robot rendering the default [`PullRefreshIndicator`] at density 1.
    pub fn with_default_indicator(config: PullRefreshConfig) -> Self {
        Self::build(
            config,
            Density::default(),
            |runtime| PullRefreshIndicator::new(runtime).into_renderer(),
            || (),
        )
    }
}

impl<I, C> PullRefreshRobot<I, C> {
    pub fn new(
        config: PullRefreshConfig,
        density: Density,
        indicator: impl FnMut(IndicatorParams) -> I + 'static,
        content: impl FnMut() -> C + 'static,
    ) -> Self {
        Self::build(config, density, |_| indicator, content)
    }

    /// Like [`new`](Self::new), for indicators that need the robot's runtime.
    pub fn build<F>(
        config: PullRefreshConfig,
        density: Density,
        make_indicator: impl FnOnce(RuntimeHandle) -> F,
        content: impl FnMut() -> C + 'static,
    ) -> Self
    where
        F: FnMut(IndicatorParams) -> I + 'static,
    {
        let frame_flag = Arc::new(FrameRequestFlag::new());
        let runtime = Runtime::new(frame_flag.clone());
        let indicator = make_indicator(runtime.handle());
        let state = PullRefreshState::new(false, runtime.handle());
        let refreshes = Rc::new(Cell::new(0));
        let container = PullRefresh::new(
            state,
            {
                let refreshes = Rc::clone(&refreshes);
                move || refreshes.set(refreshes.get() + 1)
            },
            config,
            density,
            indicator,
            content,
        );
        let list = ScrollableNode::with_parent(
            ScrollState::new(DEFAULT_LIST_EXTENT),
            container.connection(),
        );
        let mut robot = Self {
            runtime,
            frame_flag,
            container,
            list,
            gesture: DragGesture::new(),
            frame_time_nanos: 0,
            uptime_millis: 0,
            refreshes,
        };
        robot.drain_ui();
        robot
    }

    pub fn runtime(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn state(&self) -> &PullRefreshState {
        self.container.state()
    }

    pub fn container(&self) -> &PullRefresh<I, C> {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut PullRefresh<I, C> {
        &mut self.container
    }

    pub fn list(&self) -> &ScrollableNode {
        &self.list
    }

    pub fn list_mut(&mut self) -> &mut ScrollableNode {
        &mut self.list
    }

    pub fn pull_offset(&self) -> f32 {
        self.state().pull_offset()
    }

    /// How many times the container invoked its refresh callback.
    pub fn refresh_count(&self) -> u32 {
        self.refreshes.get()
    }

    /// Whether the runtime asked for a frame since the last call.
    pub fn take_frame_request(&self) -> bool {
        self.frame_flag.take()
    }

    /// Send one drag delta through the list. Returns what the list and the
    /// container consumed together.
    pub fn drag_by(&mut self, dy: f32) -> f32 {
        let consumed = self.list.scroll_by(Offset::vertical(dy));
        self.drain_ui();
        consumed.y
    }

    /// Send several drag deltas in a row.
    pub fn drag_steps(&mut self, deltas: &[f32]) {
        for &dy in deltas {
            self.drag_by(dy);
        }
    }

    /// End the drag with a vertical velocity in pixels per second. Returns
    /// the velocity left for the list's own fling.
    pub fn release(&mut self, velocity_y: f32) -> f32 {
        let remaining = self.list.fling(Velocity::vertical(velocity_y));
        self.drain_ui();
        remaining.y
    }

    /// Press at `from_y`, move in `steps` equal moves to `to_y` over
    /// `duration_millis`, then lift. Events go through a [`DragGesture`], so
    /// touch slop and release velocity apply.
    pub fn pointer_drag(&mut self, from_y: f32, to_y: f32, steps: u32, duration_millis: u64) {
        let steps = steps.max(1);
        let step_millis = duration_millis / u64::from(steps);
        self.pointer(PointerEventKind::Down, from_y);
        for step in 1..=steps {
            self.uptime_millis += step_millis;
            let y = from_y + (to_y - from_y) * step as f32 / steps as f32;
            self.pointer(PointerEventKind::Move, y);
        }
        self.pointer(PointerEventKind::Up, to_y);
    }

    /// Cancel the current pointer gesture.
    pub fn pointer_cancel(&mut self) {
        self.pointer(PointerEventKind::Cancel, 0.0);
    }

    fn pointer(&mut self, kind: PointerEventKind, y: f32) {
        let event = PointerEvent::new(kind, Point::new(0.0, y), self.uptime_millis);
        match self.gesture.on_event(&event) {
            Some(DragAction::Delta(delta)) => {
                self.drag_by(delta.y);
            }
            Some(DragAction::Release(velocity)) => {
                self.release(velocity.y);
            }
            Some(DragAction::Cancel) => {
                self.release(0.0);
            }
            None => {}
        }
    }

    /// Run queued UI tasks.
    pub fn drain_ui(&mut self) -> usize {
        self.runtime.handle().drain_ui()
    }

    /// Advance the virtual clock by one frame and run its callbacks.
    pub fn advance_frame(&mut self) {
        let handle = self.runtime.handle();
        handle.drain_ui();
        self.frame_time_nanos += FRAME_NANOS;
        self.uptime_millis = self.uptime_millis.max(self.frame_time_nanos / 1_000_000);
        handle.drain_frame_callbacks(self.frame_time_nanos);
        handle.drain_ui();
    }

    pub fn advance_frames(&mut self, frames: usize) {
        for _ in 0..frames {
            self.advance_frame();
        }
    }

    /// Pump frames until nothing is animating. Returns the frames pumped.
    pub fn settle(&mut self) -> usize {
        let handle = self.runtime.handle();
        let mut frames = 0;
        while frames < MAX_SETTLE_FRAMES && (handle.has_frame_callbacks() || handle.has_pending_ui())
        {
            self.advance_frame();
            frames += 1;
        }
        if frames == MAX_SETTLE_FRAMES {
            log::warn!("robot gave up settling after {} frames", frames);
        }
        frames
    }

    /// The host reports that its refresh completed.
    pub fn finish_refresh(&mut self) {
        self.state().set_refreshing(false);
        self.drain_ui();
    }

    pub fn render(&mut self) -> PullRefreshFrame<I, C> {
        self.container.render()
    }
}
