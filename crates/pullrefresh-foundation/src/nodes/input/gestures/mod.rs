pub mod drag;

pub use drag::{DragAction, DragGesture};
