//! A scripted pull-to-refresh session: a list of greetings under a
//! [`PullRefresh`] container whose indicator is a line of tip text.

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use anyhow::{ensure, Result};
use pullrefresh::{IndicatorParams, PullRefresh, PullRefreshConfig, PullRefreshFrame, PullRefreshState};
use pullrefresh_core::{FrameRequestFlag, Runtime};
use pullrefresh_foundation::{
    DragAction, DragGesture, PointerEvent, PointerEventKind, ScrollState, ScrollableNode,
};
use pullrefresh_ui_graphics::{Density, Point, Velocity};

pub const ITEM_COUNT: usize = 80;
pub const ITEM_HEIGHT: f32 = 48.0;
pub const VISIBLE_ITEMS: usize = 5;
pub const FRAME_NANOS: u64 = 16_666_667;

/// Frames the fake network request takes.
pub const REFRESH_FRAMES: u32 = 45;

pub const TIP_REFRESHING: &str = "正在刷新";
pub const TIP_RELEASE_TO_REFRESH: &str = "松手刷新";
pub const TIP_PULL_TO_REFRESH: &str = "下拉刷新，松手恢复常态";
pub const TIP_RESTORING: &str = "正在恢复常态";

pub fn tip_text(params: IndicatorParams) -> &'static str {
    if params.is_refreshing {
        TIP_REFRESHING
    } else if params.is_pulling && params.pull_offset_px >= params.trigger_offset_px {
        TIP_RELEASE_TO_REFRESH
    } else if params.is_pulling {
        TIP_PULL_TO_REFRESH
    } else {
        TIP_RESTORING
    }
}

pub fn greeting(index: usize) -> String {
    format!("Hello Android {index}")
}

pub type DemoFrame = PullRefreshFrame<&'static str, Vec<String>>;

/// Host loop owning the runtime, the container and the list.
pub struct DemoScreen {
    runtime: Runtime,
    frame_flag: Arc<FrameRequestFlag>,
    container: PullRefresh<&'static str, Vec<String>>,
    list: ScrollableNode,
    gesture: DragGesture,
    pending_refresh: Rc<Cell<Option<u32>>>,
    refreshes: Rc<Cell<u32>>,
    scroll_top: Rc<Cell<f32>>,
    frame_time_nanos: u64,
}

impl DemoScreen {
    pub fn new(config: PullRefreshConfig, density: Density) -> Result<Self> {
        ensure!(
            config.refresh_trigger_offset.0 > 0.0,
            "refresh trigger offset must be positive, got {:?}",
            config.refresh_trigger_offset
        );
        ensure!(
            density.density > 0.0,
            "density must be positive, got {}",
            density.density
        );

        let frame_flag = Arc::new(FrameRequestFlag::new());
        let runtime = Runtime::new(frame_flag.clone());
        let state = PullRefreshState::new(false, runtime.handle());
        let pending_refresh = Rc::new(Cell::new(None));
        let refreshes = Rc::new(Cell::new(0));

        let list_state = ScrollState::new(ITEM_HEIGHT * ITEM_COUNT as f32);
        let scroll_top = Rc::new(Cell::new(0.0f32));
        let container = PullRefresh::new(
            state,
            {
                let pending_refresh = Rc::clone(&pending_refresh);
                let refreshes = Rc::clone(&refreshes);
                move || {
                    log::info!("refresh requested");
                    refreshes.set(refreshes.get() + 1);
                    pending_refresh.set(Some(REFRESH_FRAMES));
                }
            },
            config,
            density,
            tip_text,
            {
                let scroll_top = Rc::clone(&scroll_top);
                move || {
                    let first = (scroll_top.get() / ITEM_HEIGHT) as usize;
                    (first..(first + VISIBLE_ITEMS).min(ITEM_COUNT))
                        .map(greeting)
                        .collect()
                }
            },
        );
        let list = ScrollableNode::with_parent(list_state, container.connection());

        Ok(Self {
            runtime,
            frame_flag,
            container,
            list,
            gesture: DragGesture::new(),
            pending_refresh,
            refreshes,
            scroll_top,
            frame_time_nanos: 0,
        })
    }

    pub fn state(&self) -> &PullRefreshState {
        self.container.state()
    }

    pub fn refresh_count(&self) -> u32 {
        self.refreshes.get()
    }

    pub fn list_scroll(&self) -> f32 {
        self.list.state().value()
    }

    /// Feed one pointer event through the drag recogniser into the list.
    pub fn pointer(&mut self, kind: PointerEventKind, y: f32, uptime_millis: u64) {
        let event = PointerEvent::new(kind, Point::new(0.0, y), uptime_millis);
        match self.gesture.on_event(&event) {
            Some(DragAction::Delta(delta)) => {
                self.list.scroll_by(delta);
            }
            Some(DragAction::Release(velocity)) => {
                self.list.fling(velocity);
            }
            Some(DragAction::Cancel) => {
                self.list.fling(Velocity::ZERO);
            }
            None => {}
        }
        self.scroll_top.set(self.list.state().value());
        self.runtime.handle().drain_ui();
    }

    /// Run one frame: UI tasks, frame callbacks and the fake request.
    pub fn frame(&mut self) -> DemoFrame {
        let handle = self.runtime.handle();
        handle.drain_ui();
        self.frame_time_nanos += FRAME_NANOS;
        handle.drain_frame_callbacks(self.frame_time_nanos);

        if let Some(remaining) = self.pending_refresh.get() {
            if remaining == 0 {
                log::info!("refresh finished");
                self.pending_refresh.set(None);
                self.container.state().set_refreshing(false);
            } else {
                self.pending_refresh.set(Some(remaining - 1));
            }
        }
        handle.drain_ui();
        self.frame_flag.take();
        self.container.render()
    }

    /// Whether another frame would change anything.
    pub fn is_idle(&self) -> bool {
        let handle = self.runtime.handle();
        self.pending_refresh.get().is_none()
            && !handle.has_frame_callbacks()
            && !handle.has_pending_ui()
    }
}

#[cfg(test)]
#[path = "tests/demo_tests.rs"]
mod tests;
