//! Engine facade: registries, session and the host-facing operations.

pub mod config;
mod core;

pub use config::{EngineConfig, EngineSettings};
pub use core::{InteractionOutcome, LayoutEngine};
