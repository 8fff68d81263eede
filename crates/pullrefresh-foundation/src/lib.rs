//! Foundation elements: the nested scroll protocol, a scrollable child and
//! pointer-to-drag recognition.

pub mod gesture_constants;
pub mod nested_scroll;
pub mod nodes;
pub mod scroll;

pub use nested_scroll::{
    NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource, SharedConnection,
};
pub use nodes::input::{
    DragAction, DragGesture, PointerEvent, PointerEventKind, PointerPhase, VelocityTracker,
};
pub use scroll::{ScrollState, ScrollableNode};

pub mod prelude {
    pub use crate::nested_scroll::{
        NestedScrollConnection, NestedScrollDispatcher, NestedScrollSource,
    };
    pub use crate::nodes::input::prelude::*;
    pub use crate::scroll::{ScrollState, ScrollableNode};
}
