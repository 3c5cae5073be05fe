use thiserror::Error;

/// Unified result type for the layout engine.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout & selection engine.
///
/// All of them are recoverable: the operation that produced one left the
/// registries exactly as they were.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("component `{0}` not found")]
    ComponentNotFound(String),
    #[error("layout `{0}` not found")]
    LayoutNotFound(String),
    #[error("invalid order for layout `{layout}`: {reason}")]
    InvalidOrder { layout: String, reason: String },
    #[error("layout `{layout}` holds {members} members but only {capacity} slots are available")]
    CapacityExceeded {
        layout: String,
        members: usize,
        capacity: usize,
    },
    #[error("slot {index} is outside layout `{layout}` ({slots} slots)")]
    SlotOutOfRange {
        layout: String,
        index: usize,
        slots: usize,
    },
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),
    #[error("layout `{layout}` lists component `{component}` more than once")]
    DuplicateMember { layout: String, component: String },
    #[error("component `{component}` already belongs to layout `{layout}`")]
    AlreadyMember { layout: String, component: String },
    #[error("component `{0}` is not a member of any layout")]
    NotAMember(String),
    #[error("layout `{0}` already exists")]
    DuplicateLayout(String),
    #[error("layout `{0}` changed since its snapshot was taken")]
    StaleSnapshot(String),
}
