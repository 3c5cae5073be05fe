//! Pointer input fed to the interaction session.
//!
//! Hosts translate their native events into [`PointerEvent`]s. Terminal hosts
//! can use [`PointerEvent::from_mouse`], which maps crossterm's left-button
//! mouse reports onto canvas pixels with a configurable cell size.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Abandon the active drag without committing anything.
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            position: Point::sanitized(x, y),
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn cancel() -> Self {
        Self::new(PointerKind::Cancel, 0.0, 0.0)
    }

    /// Map a terminal mouse report with one cell per pixel.
    pub fn from_mouse(event: &MouseEvent) -> Option<Self> {
        Self::from_mouse_scaled(event, 1.0, 1.0)
    }

    /// Map a terminal mouse report, scaling cells to `cell_width × cell_height`
    /// pixels. Only the left button drives drags; everything else is ignored.
    pub fn from_mouse_scaled(event: &MouseEvent, cell_width: f64, cell_height: f64) -> Option<Self> {
        let kind = match event.kind {
            MouseEventKind::Down(MouseButton::Left) => PointerKind::Down,
            MouseEventKind::Drag(MouseButton::Left) | MouseEventKind::Moved => PointerKind::Move,
            MouseEventKind::Up(MouseButton::Left) => PointerKind::Up,
            _ => return None,
        };
        Some(Self::new(
            kind,
            f64::from(event.column) * cell_width,
            f64::from(event.row) * cell_height,
        ))
    }
}
