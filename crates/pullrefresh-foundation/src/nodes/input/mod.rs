pub mod gestures;
pub mod types;
pub mod velocity;

pub use gestures::{DragAction, DragGesture};
pub use types::{PointerEvent, PointerEventKind, PointerPhase};
pub use velocity::VelocityTracker;

pub mod prelude {
    pub use super::gestures::{DragAction, DragGesture};
    pub use super::types::{PointerEvent, PointerEventKind, PointerPhase};
    pub use super::velocity::VelocityTracker;
}
