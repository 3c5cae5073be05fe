//! Layout module orchestrator.
//!
//! Container data lives in the private `core` module. Pixel ↔ slot math is in
//! [`grid`] and drop-target geometry in [`placeholder`]; both are pure
//! functions of a [`Layout`].

mod core;
pub mod grid;
pub mod placeholder;

pub use core::{Layout, LayoutId, LayoutKind, LayoutParams, LayoutPatch};
pub use grid::SlotHit;
pub use placeholder::Placeholder;
