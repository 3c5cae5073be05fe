//! Interaction session: the single active drag and the current selection.

mod core;

pub use core::{DragKind, DragSession, InteractionSession};
