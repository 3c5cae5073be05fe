//! Error module orchestrator.
//!
//! Every fallible engine operation returns [`Result`]; the variants live in the
//! private `types` module.

mod types;

pub use types::{LayoutError, Result};
