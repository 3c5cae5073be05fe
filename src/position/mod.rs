//! Position index orchestrator.
//!
//! Holds the authoritative canvas box of every placed component.

mod core;

pub use core::{ComponentId, PositionIndex};
