use crate::geometry::{Point, Rect};
use crate::layout::LayoutId;
use crate::position::ComponentId;
use crate::selection::{Selection, SelectionBand};

/// What the active drag is doing.
#[derive(Debug, Clone, PartialEq)]
pub enum DragKind {
    /// Rubber-band selection started on empty canvas.
    Select(SelectionBand),
    /// A layout member being dragged to a new slot in its container.
    Reorder {
        component: ComponentId,
        layout: LayoutId,
    },
    /// A freestanding component being moved by the pointer delta.
    Reposition {
        component: ComponentId,
        origin: Rect,
    },
}

impl DragKind {
    pub fn name(&self) -> &'static str {
        match self {
            DragKind::Select(_) => "select",
            DragKind::Reorder { .. } => "reorder",
            DragKind::Reposition { .. } => "reposition",
        }
    }

    /// The component being dragged, if any.
    pub fn component(&self) -> Option<&str> {
        match self {
            DragKind::Select(_) => None,
            DragKind::Reorder { component, .. } | DragKind::Reposition { component, .. } => {
                Some(component.as_str())
            }
        }
    }
}

/// Transient state of one pointer-down → pointer-up cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    kind: DragKind,
    start: Point,
    current: Point,
}

impl DragSession {
    pub fn select(start: Point) -> Self {
        Self::new(DragKind::Select(SelectionBand::begin(start)), start)
    }

    pub fn reorder(component: impl Into<ComponentId>, layout: impl Into<LayoutId>, start: Point) -> Self {
        Self::new(
            DragKind::Reorder {
                component: component.into(),
                layout: layout.into(),
            },
            start,
        )
    }

    pub fn reposition(component: impl Into<ComponentId>, origin: Rect, start: Point) -> Self {
        Self::new(
            DragKind::Reposition {
                component: component.into(),
                origin,
            },
            start,
        )
    }

    fn new(kind: DragKind, start: Point) -> Self {
        Self {
            kind,
            start,
            current: start,
        }
    }

    pub fn kind(&self) -> &DragKind {
        &self.kind
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn current(&self) -> Point {
        self.current
    }

    /// Pointer travel since pointer-down.
    pub fn delta(&self) -> (f64, f64) {
        (self.current.x - self.start.x, self.current.y - self.start.y)
    }

    /// Current selection rectangle, for select drags only.
    pub fn band(&self) -> Option<Rect> {
        match &self.kind {
            DragKind::Select(band) => Some(band.rect()),
            _ => None,
        }
    }

    /// Record a pointer move. Constant time.
    pub fn update(&mut self, current: Point) {
        self.current = current;
        if let DragKind::Select(band) = &mut self.kind {
            band.update(current);
        }
    }

    pub fn into_kind(self) -> DragKind {
        self.kind
    }
}

/// Owner of the one drag that may be active at a time, and of the selection
/// it produces.
#[derive(Debug, Default, Clone)]
pub struct InteractionSession {
    active: Option<DragSession>,
    selection: Selection,
}

impl InteractionSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a drag. Any drag still active is discarded and handed back so
    /// the caller can report it; the selection is cleared.
    pub fn begin(&mut self, drag: DragSession) -> Option<DragSession> {
        self.selection.clear();
        self.active.replace(drag)
    }

    /// Feed a pointer move to the active drag. Returns `None` when idle.
    pub fn update(&mut self, current: Point) -> Option<&DragSession> {
        let drag = self.active.as_mut()?;
        drag.update(current);
        Some(&*drag)
    }

    /// End the active drag for commit.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.active.take()
    }

    /// Abandon the active drag. Nothing is committed.
    pub fn cancel(&mut self) -> Option<DragSession> {
        self.active.take()
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.active.is_some()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn replace_selection(&mut self, selection: Selection) {
        self.selection = selection;
    }

    pub fn deselect(&mut self, component: &str) -> bool {
        self.selection.remove(component)
    }
}
