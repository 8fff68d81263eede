//! Observable state cells.
//!
//! A [`MutableState`] notifies its subscribers synchronously whenever its value
//! changes and asks the runtime for a frame, which is how widgets get re-rendered
//! after a mutation.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

use crate::runtime::RuntimeHandle;

type ObserverId = u64;
type Observer = Rc<dyn Fn()>;

struct StateInner<T> {
    value: RefCell<T>,
    observers: RefCell<SmallVec<[(ObserverId, Observer); 2]>>,
    next_observer: Cell<ObserverId>,
    runtime: Option<RuntimeHandle>,
}

impl<T> StateInner<T> {
    fn notify(&self) {
        if let Some(runtime) = &self.runtime {
            runtime.request_frame();
        }
        // Observers may read or write this state, so call them unborrowed.
        let observers: SmallVec<[Observer; 2]> = self
            .observers
            .borrow()
            .iter()
            .map(|(_, observer)| Rc::clone(observer))
            .collect();
        for observer in observers {
            observer();
        }
    }

    fn add_observer(self: &Rc<Self>, observer: impl Fn() + 'static) -> StateSubscription
    where
        T: 'static,
    {
        let id = self.next_observer.get();
        self.next_observer.set(id + 1);
        self.observers.borrow_mut().push((id, Rc::new(observer)));
        let weak: Weak<StateInner<T>> = Rc::downgrade(self);
        StateSubscription {
            unsubscribe: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.observers.borrow_mut().retain(|(entry, _)| *entry != id);
                }
            })),
        }
    }
}

/// Writable observable value.
pub struct MutableState<T> {
    inner: Rc<StateInner<T>>,
}

impl<T> Clone for MutableState<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + PartialEq + 'static> MutableState<T> {
    /// Create a state that is not attached to any runtime.
    pub fn new(value: T) -> Self {
        Self::build(value, None)
    }

    /// Create a state that requests a frame from `runtime` on every change.
    pub fn with_runtime(value: T, runtime: RuntimeHandle) -> Self {
        Self::build(value, Some(runtime))
    }

    fn build(value: T, runtime: Option<RuntimeHandle>) -> Self {
        Self {
            inner: Rc::new(StateInner {
                value: RefCell::new(value),
                observers: RefCell::new(SmallVec::new()),
                next_observer: Cell::new(0),
                runtime,
            }),
        }
    }

    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    /// Store `value`, notifying observers only if it differs from the current one.
    pub fn set_value(&self, value: T) {
        {
            let mut current = self.inner.value.borrow_mut();
            if *current == value {
                return;
            }
            *current = value;
        }
        self.inner.notify();
    }

    /// Mutate in place; observers are notified if the value changed.
    pub fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let (result, changed) = {
            let mut current = self.inner.value.borrow_mut();
            let before = current.clone();
            let result = f(&mut current);
            (result, *current != before)
        };
        if changed {
            self.inner.notify();
        }
        result
    }

    pub fn as_state(&self) -> State<T> {
        State {
            inner: Rc::clone(&self.inner),
        }
    }

    pub fn subscribe(&self, observer: impl Fn() + 'static) -> StateSubscription {
        self.inner.add_observer(observer)
    }
}

/// Read-only view of a [`MutableState`].
pub struct State<T> {
    inner: Rc<StateInner<T>>,
}

impl<T> Clone for State<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: Clone + 'static> State<T> {
    pub fn get(&self) -> T {
        self.inner.value.borrow().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.value.borrow())
    }

    pub fn subscribe(&self, observer: impl Fn() + 'static) -> StateSubscription {
        self.inner.add_observer(observer)
    }
}

/// Keeps an observer registered; dropping it unsubscribes.
pub struct StateSubscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl StateSubscription {
    /// Keep the observer registered for the lifetime of the state itself.
    pub fn forget(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for StateSubscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}
