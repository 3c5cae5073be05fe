//! Drag-to-reorder inside a layout container.

mod core;

pub use core::{NOMINAL_SLOT_PITCH, ReorderPlan, SlotSpacing, closest_index, plan_reorder};
