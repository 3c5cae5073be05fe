use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::Point;
use crate::layout::{Layout, grid};
use crate::position::ComponentId;

/// Default spacing between scored slots, in pixels.
pub const NOMINAL_SLOT_PITCH: f64 = 100.0;

/// How a release point is scored against member slots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SlotSpacing {
    /// Member `i` sits at `i * pitch` on the vertical axis, whatever the
    /// container's cell size.
    Nominal { pitch: f64 },
    /// Member `i` sits at its real slot origin; distance is Euclidean.
    CellPitch,
}

impl Default for SlotSpacing {
    fn default() -> Self {
        SlotSpacing::Nominal {
            pitch: NOMINAL_SLOT_PITCH,
        }
    }
}

impl SlotSpacing {
    fn distance(&self, layout: &Layout, index: usize, release: Point) -> f64 {
        match self {
            SlotSpacing::Nominal { pitch } => (index as f64 * pitch - release.y).abs(),
            SlotSpacing::CellPitch => grid::slot_origin(layout, index).distance_to(release),
        }
    }
}

/// Member index nearest to `release` (container-local). Ties go to the lower
/// index. `None` only for an empty container.
pub fn closest_index(layout: &Layout, release: Point, spacing: SlotSpacing) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for index in 0..layout.len() {
        let distance = spacing.distance(layout, index, release);
        match best {
            Some((_, current)) if !(distance < current) => {}
            _ => best = Some((index, distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// What releasing a dragged member should do to its container.
#[derive(Debug, Clone, PartialEq)]
pub enum ReorderPlan {
    /// The nearest slot is the one the member came from.
    Unchanged { index: usize },
    /// Move the member; `order` is the full new child list.
    Move {
        from: usize,
        to: usize,
        order: Vec<ComponentId>,
    },
}

impl ReorderPlan {
    pub fn is_move(&self) -> bool {
        matches!(self, ReorderPlan::Move { .. })
    }
}

/// Score a release against `layout` and work out the resulting order.
/// Reads only; the caller commits the plan.
pub fn plan_reorder(
    layout: &Layout,
    component: &str,
    release: Point,
    spacing: SlotSpacing,
) -> Result<ReorderPlan> {
    let from = layout
        .index_of(component)
        .ok_or_else(|| LayoutError::NotAMember(component.to_string()))?;
    let to = closest_index(layout, release, spacing).unwrap_or(from);
    if to == from {
        return Ok(ReorderPlan::Unchanged { index: from });
    }
    Ok(ReorderPlan::Move {
        from,
        to,
        order: layout.children_moved(from, to),
    })
}
