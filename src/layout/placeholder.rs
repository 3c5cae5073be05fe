//! Drop-target geometry.
//!
//! A placeholder is described by the edges it is anchored to, the way the
//! render layer positions it inside the container. [`Placeholder::resolve`]
//! turns that into an absolute box when one is needed.

use serde::{Deserialize, Serialize};

use crate::geometry::{Extent, Rect};

use super::core::{Layout, LayoutKind};
use super::grid;

/// Anchored drop-target box. Offsets are measured inward from the named edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Placeholder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub left: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub right: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bottom: Option<f64>,
    pub width: f64,
    pub height: f64,
    /// Suppresses drawing; the geometry stays valid.
    pub hidden: bool,
}

impl Placeholder {
    pub fn hide(&mut self) {
        self.hidden = true;
    }

    pub fn show(&mut self) {
        self.hidden = false;
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Absolute box inside a container of the given size.
    pub fn resolve(&self, container: Extent) -> Rect {
        let x = match (self.left, self.right) {
            (Some(left), _) => left,
            (None, Some(right)) => container.width - right - self.width,
            (None, None) => 0.0,
        };
        let y = match (self.top, self.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => container.height - bottom - self.height,
            (None, None) => 0.0,
        };
        Rect::new(x, y, self.width, self.height)
    }
}

/// Where the empty slot for `index` is drawn.
///
/// Rows and columns only ever show their trailing slot, so `index` is ignored
/// for them; grids place the box on the cell addressed by `index`.
pub fn placeholder_rect(layout: &Layout, index: usize) -> Placeholder {
    let params = &layout.params;
    let sized = Placeholder {
        width: params.child_width,
        height: params.child_height,
        ..Placeholder::default()
    };
    match layout.kind {
        LayoutKind::Row => Placeholder {
            right: Some(params.padding),
            bottom: Some(params.padding),
            ..sized
        },
        LayoutKind::Column => Placeholder {
            left: Some(params.padding),
            bottom: Some(params.padding),
            ..sized
        },
        LayoutKind::Grid => {
            let origin = grid::slot_origin(layout, index);
            Placeholder {
                top: Some(origin.y),
                left: Some(origin.x),
                ..sized
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_anchors_bottom_right() {
        let row = Layout::row("r")
            .with_cell(10.0, 100.0, 50.0)
            .with_children(["a", "b"]);
        let placeholder = placeholder_rect(&row, 0);
        assert_eq!(placeholder.right, Some(10.0));
        assert_eq!(placeholder.bottom, Some(10.0));
        assert_eq!(placeholder.top, None);
        assert_eq!(placeholder_rect(&row, 7), placeholder);
    }

    #[test]
    fn row_placeholder_covers_trailing_slot() {
        let row = Layout::row("r")
            .with_cell(10.0, 100.0, 50.0)
            .with_children(["a", "b"]);
        let rect = placeholder_rect(&row, 0).resolve(grid::extent(&row));
        assert_eq!(rect, grid::slot_rect(&row, 2));
    }

    #[test]
    fn column_placeholder_covers_trailing_slot() {
        let column = Layout::column("c")
            .with_cell(6.0, 80.0, 40.0)
            .with_children(["a", "b", "c"]);
        let placeholder = placeholder_rect(&column, 1);
        assert_eq!(placeholder.left, Some(6.0));
        assert_eq!(placeholder.bottom, Some(6.0));
        let rect = placeholder.resolve(grid::extent(&column));
        assert_eq!(rect, grid::slot_rect(&column, 3));
    }

    #[test]
    fn grid_anchors_top_left_of_cell() {
        let layout = Layout::grid("g", 2, 3).with_cell(10.0, 100.0, 50.0);
        let placeholder = placeholder_rect(&layout, 5);
        assert_eq!(placeholder.top, Some(70.0));
        assert_eq!(placeholder.left, Some(230.0));
        assert_eq!(placeholder.width, 100.0);
        assert_eq!(placeholder.height, 50.0);
    }

    #[test]
    fn hiding_keeps_geometry() {
        let layout = Layout::grid("g", 2, 2).with_cell(5.0, 20.0, 20.0);
        let mut placeholder = placeholder_rect(&layout, 3);
        let shown = placeholder.resolve(grid::extent(&layout));
        placeholder.hide();
        assert!(placeholder.hidden);
        assert_eq!(placeholder.resolve(grid::extent(&layout)), shown);
    }
}
