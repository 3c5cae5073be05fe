use std::collections::HashSet;

use crate::geometry::{Point, Rect};
use crate::position::{ComponentId, PositionIndex};

/// Ids touched by the last committed selection. Order carries no meaning.
pub type Selection = HashSet<ComponentId>;

/// Rectangle spanned by a selection drag.
///
/// Every pointer move replaces the rectangle with the bounding box of the
/// start point and the latest point, so the box used at release is always the
/// one from the last move before it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBand {
    start: Point,
    rect: Rect,
}

impl SelectionBand {
    /// A zero-size band sitting on the start point.
    pub fn begin(start: Point) -> Self {
        Self {
            start,
            rect: Rect::new(start.x, start.y, 0.0, 0.0),
        }
    }

    pub fn update(&mut self, current: Point) {
        self.rect = Rect::from_corners(self.start, current);
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Every candidate whose box overlaps `rect`.
///
/// Candidates are visited in the given order; ids without a known position
/// are skipped. A rectangle with zero width or height selects nothing, which
/// is what makes a plain click clear the selection.
pub fn compute_selection<I, S>(rect: &Rect, candidates: I, positions: &PositionIndex) -> Selection
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut selection = Selection::new();
    if rect.is_empty() {
        return selection;
    }
    for candidate in candidates {
        let id = candidate.as_ref();
        if let Some(position) = positions.try_get(id) {
            if rect.intersects(&position) {
                selection.insert(id.to_string());
            }
        }
    }
    selection
}
