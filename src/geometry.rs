//! Canvas-space value types.
//!
//! All coordinates are pixels measured from the top-left corner of the page.
//! Pointer input is untrusted, so the constructors that accept raw pointer
//! values clamp NaN, infinities and negatives to zero instead of failing.

use serde::{Deserialize, Serialize};

/// Clamp an untrusted coordinate into the non-negative finite range.
pub fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// A pointer position on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Build a point from raw pointer input, clamping malformed values.
    pub fn sanitized(x: f64, y: f64) -> Self {
        Self {
            x: sanitize(x),
            y: sanitize(y),
        }
    }

    /// Translate into the local space of a container whose top-left is `origin`.
    /// Positions left of or above the origin come out negative.
    pub fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }

    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Width and height of a container or cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Extent {
    pub width: f64,
    pub height: f64,
}

impl Extent {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding box on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Smallest box covering both corners, in any order.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            x: a.x.min(b.x),
            y: a.y.min(b.y),
            width: (a.x - b.x).abs(),
            height: (a.y - b.y).abs(),
        }
    }

    pub fn at(origin: Point, extent: Extent) -> Self {
        Self::new(origin.x, origin.y, extent.width, extent.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Zero width or zero height.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// True when both dimensions are finite and non-negative.
    pub fn has_valid_size(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width >= 0.0 && self.height >= 0.0
    }

    /// Open-interval overlap test. Boxes that merely touch along an edge do not
    /// intersect, and an empty box never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Half-open containment: the left and top edges are inside, the right and
    /// bottom edges are not.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes_intersect_both_ways() {
        let band = Rect::new(0.0, 0.0, 50.0, 50.0);
        let widget = Rect::new(40.0, 40.0, 20.0, 20.0);
        assert!(band.intersects(&widget));
        assert!(widget.intersects(&band));
    }

    #[test]
    fn touching_edges_do_not_intersect() {
        let left = Rect::new(0.0, 0.0, 10.0, 10.0);
        let right = Rect::new(10.0, 0.0, 10.0, 10.0);
        assert!(!left.intersects(&right));
        assert!(!right.intersects(&left));
    }

    #[test]
    fn degenerate_band_matches_nothing() {
        let widget = Rect::new(40.0, 40.0, 20.0, 20.0);
        let vertical_line = Rect::new(50.0, 0.0, 0.0, 100.0);
        let horizontal_line = Rect::new(0.0, 50.0, 100.0, 0.0);
        assert!(!vertical_line.intersects(&widget));
        assert!(!horizontal_line.intersects(&widget));
        assert!(!widget.intersects(&vertical_line));
    }

    #[test]
    fn corners_normalize_in_any_order() {
        let rect = Rect::from_corners(Point::new(30.0, 5.0), Point::new(10.0, 25.0));
        assert_eq!(rect, Rect::new(10.0, 5.0, 20.0, 20.0));
    }

    #[test]
    fn sanitized_points_clamp_garbage() {
        let point = Point::sanitized(f64::NAN, -4.0);
        assert_eq!(point, Point::new(0.0, 0.0));
        let inf = Point::sanitized(f64::INFINITY, 12.5);
        assert_eq!(inf, Point::new(0.0, 12.5));
    }

    #[test]
    fn containment_is_half_open() {
        let rect = Rect::new(10.0, 10.0, 10.0, 10.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(20.0, 15.0)));
    }
}
