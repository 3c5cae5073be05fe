//! Rubber-band selection: the drag rectangle and the hit test it drives.

mod core;

pub use core::{Selection, SelectionBand, compute_selection};
