//! Spatial layout & selection engine for a drag-and-drop dashboard builder.
//!
//! Components sit on a page canvas either freely or inside row, column and
//! grid containers. This crate keeps the authoritative box of every
//! component, snaps pointer geometry onto container slots, hit-tests
//! rubber-band selections and reorders container members after a drag.
//! Rendering, persistence and widget content belong to the host.
//!
//! Modules follow the orchestrator pattern: each `mod.rs` re-exports the
//! public surface and keeps the implementation in a private `core` module.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod input;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod position;
pub mod registry;
pub mod reorder;
pub mod selection;
pub mod session;

pub use catalog::{ComponentCatalog, PageCatalog, PageId};
pub use engine::{EngineConfig, EngineSettings, InteractionOutcome, LayoutEngine};
pub use error::{LayoutError, Result};
pub use geometry::{Extent, Point, Rect};
pub use input::{PointerEvent, PointerKind};
pub use layout::{Layout, LayoutId, LayoutKind, LayoutParams, LayoutPatch, Placeholder, SlotHit};
pub use logging::{LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult};
pub use metrics::{InteractionMetrics, MetricSnapshot};
pub use position::{ComponentId, PositionIndex};
pub use registry::{LayoutRegistry, LayoutSnapshot};
pub use reorder::{ReorderPlan, SlotSpacing};
pub use selection::{Selection, SelectionBand, compute_selection};
pub use session::{DragKind, DragSession, InteractionSession};
