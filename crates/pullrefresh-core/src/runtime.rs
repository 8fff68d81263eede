//! UI-thread runtime: frame callbacks and queued UI tasks.
//!
//! The runtime never spins its own loop. The host drains queued tasks with
//! [`RuntimeHandle::drain_ui`] and delivers frame times with
//! [`RuntimeHandle::drain_frame_callbacks`].

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use crate::collections::{map, OrderedMap};
use crate::frame_clock::FrameClock;
use crate::platform::RuntimeScheduler;

pub type FrameCallbackId = u64;

type FrameCallback = Box<dyn FnOnce(u64)>;
type UiTask = Box<dyn FnOnce()>;

struct RuntimeInner {
    scheduler: Option<Arc<dyn RuntimeScheduler>>,
    next_callback_id: Cell<FrameCallbackId>,
    frame_callbacks: RefCell<OrderedMap<FrameCallbackId, FrameCallback>>,
    ui_tasks: RefCell<VecDeque<UiTask>>,
    needs_frame: Cell<bool>,
    last_frame_nanos: Cell<Option<u64>>,
}

/// Owner of the runtime. Dropping it turns every [`RuntimeHandle`] inert.
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Arc<dyn RuntimeScheduler>) -> Self {
        Self::build(Some(scheduler))
    }

    /// Runtime without a host scheduler; frame requests are only recorded.
    pub fn headless() -> Self {
        Self::build(None)
    }

    fn build(scheduler: Option<Arc<dyn RuntimeScheduler>>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner {
                scheduler,
                next_callback_id: Cell::new(1),
                frame_callbacks: RefCell::new(OrderedMap::with_hasher(map::BuildHasher::default())),
                ui_tasks: RefCell::new(VecDeque::new()),
                needs_frame: Cell::new(false),
                last_frame_nanos: Cell::new(None),
            }),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::headless()
    }
}

/// Cheap, cloneable handle to a [`Runtime`].
#[derive(Clone)]
pub struct RuntimeHandle {
    inner: Weak<RuntimeInner>,
}

impl RuntimeHandle {
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    /// Register a callback for the next frame. Returns `None` once the runtime is gone.
    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        let inner = self.inner.upgrade()?;
        let id = inner.next_callback_id.get();
        inner.next_callback_id.set(id + 1);
        inner
            .frame_callbacks
            .borrow_mut()
            .insert(id, Box::new(callback));
        Self::request_frame_on(&inner);
        Some(id)
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.inner.upgrade() {
            inner.frame_callbacks.borrow_mut().shift_remove(&id);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.frame_callbacks.borrow().is_empty())
            .unwrap_or(false)
    }

    /// Deliver a frame to every callback registered before this call.
    ///
    /// Callbacks registered while draining run on the following frame.
    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        inner.needs_frame.set(false);
        inner.last_frame_nanos.set(Some(frame_time_nanos));
        let callbacks = std::mem::replace(
            &mut *inner.frame_callbacks.borrow_mut(),
            OrderedMap::with_hasher(map::BuildHasher::default()),
        );
        for (_, callback) in callbacks {
            callback(frame_time_nanos);
        }
    }

    pub fn last_frame_nanos(&self) -> Option<u64> {
        self.inner
            .upgrade()
            .and_then(|inner| inner.last_frame_nanos.get())
    }

    /// Queue work to run on the UI thread at the next [`drain_ui`](Self::drain_ui).
    pub fn enqueue_ui_task(&self, task: Box<dyn FnOnce()>) {
        if let Some(inner) = self.inner.upgrade() {
            inner.ui_tasks.borrow_mut().push_back(task);
            Self::request_frame_on(&inner);
        }
    }

    /// Run queued UI tasks, including tasks queued by the tasks themselves.
    /// Returns the number of tasks executed.
    pub fn drain_ui(&self) -> usize {
        let Some(inner) = self.inner.upgrade() else {
            return 0;
        };
        let mut executed = 0;
        loop {
            let task = inner.ui_tasks.borrow_mut().pop_front();
            match task {
                Some(task) => {
                    task();
                    executed += 1;
                }
                None => break,
            }
        }
        executed
    }

    pub fn has_pending_ui(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| !inner.ui_tasks.borrow().is_empty())
            .unwrap_or(false)
    }

    /// Ask the host for another frame, e.g. because observable state changed.
    pub fn request_frame(&self) {
        if let Some(inner) = self.inner.upgrade() {
            Self::request_frame_on(&inner);
        }
    }

    /// Whether work is waiting for a frame: a request, queued tasks or callbacks.
    pub fn needs_frame(&self) -> bool {
        self.inner
            .upgrade()
            .map(|inner| {
                inner.needs_frame.get()
                    || !inner.ui_tasks.borrow().is_empty()
                    || !inner.frame_callbacks.borrow().is_empty()
            })
            .unwrap_or(false)
    }

    fn request_frame_on(inner: &RuntimeInner) {
        if inner.needs_frame.replace(true) {
            return;
        }
        if let Some(scheduler) = &inner.scheduler {
            scheduler.schedule_frame();
        }
    }
}
