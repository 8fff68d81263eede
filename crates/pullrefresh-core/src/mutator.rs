//! Priority-aware single-slot mutual exclusion.
//!
//! Only one mutation of a shared value runs at a time. A new mutation with a
//! priority at least as high as the current holder's cancels the holder; a
//! lower-priority request is rejected. Long-running holders (animations) poll
//! their [`MutationToken`] on every step and stop once it is cancelled.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Priority of a mutation. Later variants win over earlier ones.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MutatePriority {
    /// Programmatic changes such as settle animations.
    #[default]
    Default,
    /// Changes driven directly by the user's pointer.
    UserInput,
    /// Programmatic changes that must not be interrupted by user input.
    PreventUserInput,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TokenState {
    Active,
    Cancelled,
    Released,
}

/// Handle held by the current mutation.
#[derive(Clone, Debug)]
pub struct MutationToken {
    state: Rc<Cell<TokenState>>,
    priority: MutatePriority,
}

impl MutationToken {
    fn new(priority: MutatePriority) -> Self {
        Self {
            state: Rc::new(Cell::new(TokenState::Active)),
            priority,
        }
    }

    /// Still allowed to mutate.
    pub fn is_active(&self) -> bool {
        self.state.get() == TokenState::Active
    }

    /// Pre-empted by a newer mutation.
    pub fn is_cancelled(&self) -> bool {
        self.state.get() == TokenState::Cancelled
    }

    pub fn priority(&self) -> MutatePriority {
        self.priority
    }

    fn cancel(&self) {
        if self.is_active() {
            self.state.set(TokenState::Cancelled);
        }
    }

    fn same_as(&self, other: &MutationToken) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    /// The current holder has a higher priority than the request.
    Rejected {
        requested: MutatePriority,
        holder: MutatePriority,
    },
}

impl fmt::Display for MutationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MutationError::Rejected { requested, holder } => write!(
                f,
                "mutation with priority {requested:?} rejected; current mutation has priority {holder:?}"
            ),
        }
    }
}

impl std::error::Error for MutationError {}

#[derive(Debug, Default)]
pub struct MutatorMutex {
    current: RefCell<Option<MutationToken>>,
}

impl MutatorMutex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Become the current mutation, cancelling the previous holder if allowed.
    ///
    /// The returned token stays active until [`release`](Self::release) is
    /// called with it or a newer mutation pre-empts it.
    pub fn try_acquire(&self, priority: MutatePriority) -> Result<MutationToken, MutationError> {
        let mut current = self.current.borrow_mut();
        if let Some(holder) = current.as_ref().filter(|holder| holder.is_active()) {
            if priority < holder.priority {
                return Err(MutationError::Rejected {
                    requested: priority,
                    holder: holder.priority,
                });
            }
            log::trace!(
                "mutation {:?} pre-empts {:?}",
                priority,
                holder.priority
            );
            holder.cancel();
        }
        let token = MutationToken::new(priority);
        *current = Some(token.clone());
        Ok(token)
    }

    /// Finish the mutation identified by `token`. Releasing a pre-empted token is a no-op.
    pub fn release(&self, token: &MutationToken) {
        if token.is_active() {
            token.state.set(TokenState::Released);
        }
        let mut current = self.current.borrow_mut();
        if current.as_ref().is_some_and(|holder| holder.same_as(token)) {
            *current = None;
        }
    }

    /// Run a synchronous mutation while holding the mutex.
    pub fn mutate<R>(
        &self,
        priority: MutatePriority,
        block: impl FnOnce(&MutationToken) -> R,
    ) -> Result<R, MutationError> {
        let token = self.try_acquire(priority)?;
        let result = block(&token);
        self.release(&token);
        Ok(result)
    }

    /// Whether some mutation currently holds the mutex.
    pub fn is_locked(&self) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(MutationToken::is_active)
    }
}
