//! Layout registry orchestrator.

mod core;

pub use core::{LayoutRegistry, LayoutSnapshot};
