//! Slot math for layout containers.
//!
//! Every function here is a pure, deterministic function of a [`Layout`]'s
//! kind, parameters and member count. Coordinates are local to the container:
//! `(0, 0)` is the container's top-left corner.
//!
//! Cells sit on a regular lattice. Cell `(row, column)` has its top-left corner
//! at `(padding + column * (child_width + padding), padding + row * (child_height + padding))`.
//! Rows and columns always keep one empty slot after their last member so a
//! drop target has room even when the container is full.
//!
//! # Example
//! ```
//! use dashboard_layout::layout::{Layout, grid};
//!
//! let layout = Layout::grid("board", 2, 3).with_cell(10.0, 100.0, 50.0);
//! let hit = grid::pixel_to_slot(400.0, 15.0, &layout);
//! assert_eq!(hit.index, 2);
//! assert_eq!(hit.snapped.x, 230.0);
//! ```

use crate::geometry::{Extent, Point, Rect};

use super::core::{Layout, LayoutKind};

/// Result of snapping a pointer position onto a container's lattice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotHit {
    /// Linear slot index, `row * columns + column`.
    pub index: usize,
    pub row: usize,
    pub column: usize,
    /// Top-left corner of the chosen cell.
    pub snapped: Point,
}

/// Width of a container laid out with `n` members along its horizontal axis,
/// including the trailing insertion slot.
pub fn total_width(layout: &Layout, n: usize) -> f64 {
    (n as f64 + 1.0) * layout.params.pitch_x() + layout.params.padding
}

/// Height of a container laid out with `n` members along its vertical axis,
/// including the trailing insertion slot.
pub fn total_height(layout: &Layout, n: usize) -> f64 {
    (n as f64 + 1.0) * layout.params.pitch_y() + layout.params.padding
}

/// Drawn size of the container for its current member count.
pub fn extent(layout: &Layout) -> Extent {
    let padding = layout.params.padding;
    match layout.kind {
        LayoutKind::Row => Extent::new(
            total_width(layout, layout.len()),
            layout.params.child_height + 2.0 * padding,
        ),
        LayoutKind::Column => Extent::new(
            layout.params.child_width + 2.0 * padding,
            total_height(layout, layout.len()),
        ),
        LayoutKind::Grid => {
            let (rows, columns) = layout.tracks();
            Extent::new(
                columns as f64 * layout.params.pitch_x() + padding,
                rows as f64 * layout.params.pitch_y() + padding,
            )
        }
    }
}

/// Snap a local position to the nearest slot.
///
/// `(x, y)` is read as the top-left corner of the item being placed; half a
/// cell is added so the item lands in the cell holding most of it. The track
/// numbers are clamped before the index is derived, so overshooting the
/// container (or feeding NaN) still yields an in-bounds slot.
pub fn pixel_to_slot(x: f64, y: f64, layout: &Layout) -> SlotHit {
    let (rows, columns) = layout.tracks();
    let params = &layout.params;
    let column = axis_track(x, params.padding, params.child_width, columns);
    let row = axis_track(y, params.padding, params.child_height, rows);
    SlotHit {
        index: row * columns + column,
        row,
        column,
        snapped: cell_origin(layout, row, column),
    }
}

fn axis_track(coord: f64, padding: f64, child: f64, tracks: usize) -> usize {
    let pitch = child + padding;
    if tracks <= 1 || !(pitch > 0.0) {
        return 0;
    }
    let effective = coord - padding + child / 2.0;
    let raw = (effective / pitch).floor();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= (tracks - 1) as f64 {
        tracks - 1
    } else {
        raw as usize
    }
}

/// `(row, column)` of a linear slot index.
pub fn slot_coords(layout: &Layout, index: usize) -> (usize, usize) {
    let (_, columns) = layout.tracks();
    (index / columns, index % columns)
}

fn cell_origin(layout: &Layout, row: usize, column: usize) -> Point {
    let params = &layout.params;
    Point::new(
        params.padding + column as f64 * params.pitch_x(),
        params.padding + row as f64 * params.pitch_y(),
    )
}

/// Top-left corner of slot `index`, the inverse of [`pixel_to_slot`].
pub fn slot_origin(layout: &Layout, index: usize) -> Point {
    let (row, column) = slot_coords(layout, index);
    cell_origin(layout, row, column)
}

/// Local box of slot `index`.
pub fn slot_rect(layout: &Layout, index: usize) -> Rect {
    Rect::at(
        slot_origin(layout, index),
        Extent::new(layout.params.child_width, layout.params.child_height),
    )
}

/// Canvas box of the member at `index` for a container whose top-left corner
/// sits at `origin`.
pub fn member_rect(layout: &Layout, index: usize, origin: Point) -> Rect {
    let local = slot_rect(layout, index);
    local.translate(origin.x, origin.y)
}
