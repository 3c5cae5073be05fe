use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::position::ComponentId;

/// Layout containers are components themselves, so they share the id space.
pub type LayoutId = ComponentId;

/// Placement policy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    /// Members flow left to right in a single track.
    Row,
    /// Members flow top to bottom in a single track.
    Column,
    /// Members fill a fixed `rows × columns` matrix row by row.
    Grid,
}

impl LayoutKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutKind::Row => "row",
            LayoutKind::Column => "column",
            LayoutKind::Grid => "grid",
        }
    }
}

/// Geometric parameters shared by every member cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutParams {
    pub padding: f64,
    pub child_width: f64,
    pub child_height: f64,
    /// Only meaningful for [`LayoutKind::Grid`].
    pub rows: u32,
    /// Only meaningful for [`LayoutKind::Grid`].
    pub columns: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            padding: 10.0,
            child_width: 100.0,
            child_height: 100.0,
            rows: 1,
            columns: 1,
        }
    }
}

impl LayoutParams {
    pub fn new(padding: f64, child_width: f64, child_height: f64) -> Self {
        Self {
            padding,
            child_width,
            child_height,
            ..Self::default()
        }
    }

    pub fn with_tracks(mut self, rows: u32, columns: u32) -> Self {
        self.rows = rows;
        self.columns = columns;
        self
    }

    /// Horizontal distance between the left edges of adjacent cells.
    pub fn pitch_x(&self) -> f64 {
        self.child_width + self.padding
    }

    /// Vertical distance between the top edges of adjacent cells.
    pub fn pitch_y(&self) -> f64 {
        self.child_height + self.padding
    }

    fn validate(&self, layout: &str) -> Result<()> {
        let lengths = [
            ("padding", self.padding),
            ("child_width", self.child_width),
            ("child_height", self.child_height),
        ];
        for (name, value) in lengths {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidGeometry(format!(
                    "layout `{layout}` has {name} = {value}"
                )));
            }
        }
        if self.rows == 0 || self.columns == 0 {
            return Err(LayoutError::InvalidGeometry(format!(
                "layout `{layout}` needs at least one row and column, got {}x{}",
                self.rows, self.columns
            )));
        }
        Ok(())
    }
}

/// Partial parameter update. Absent fields keep their current value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
}

impl LayoutPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn child_size(mut self, width: f64, height: f64) -> Self {
        self.child_width = Some(width);
        self.child_height = Some(height);
        self
    }

    pub fn rows(mut self, rows: u32) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn columns(mut self, columns: u32) -> Self {
        self.columns = Some(columns);
        self
    }

    pub fn apply(&self, base: LayoutParams) -> LayoutParams {
        LayoutParams {
            padding: self.padding.unwrap_or(base.padding),
            child_width: self.child_width.unwrap_or(base.child_width),
            child_height: self.child_height.unwrap_or(base.child_height),
            rows: self.rows.unwrap_or(base.rows),
            columns: self.columns.unwrap_or(base.columns),
        }
    }
}

/// A container owning an ordered list of member components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub id: LayoutId,
    pub kind: LayoutKind,
    pub children: Vec<ComponentId>,
    #[serde(flatten)]
    pub params: LayoutParams,
}

impl Layout {
    pub fn new(id: impl Into<LayoutId>, kind: LayoutKind) -> Self {
        Self {
            id: id.into(),
            kind,
            children: Vec::new(),
            params: LayoutParams::default(),
        }
    }

    pub fn row(id: impl Into<LayoutId>) -> Self {
        Self::new(id, LayoutKind::Row)
    }

    pub fn column(id: impl Into<LayoutId>) -> Self {
        Self::new(id, LayoutKind::Column)
    }

    pub fn grid(id: impl Into<LayoutId>, rows: u32, columns: u32) -> Self {
        let mut layout = Self::new(id, LayoutKind::Grid);
        layout.params = layout.params.with_tracks(rows, columns);
        layout
    }

    pub fn with_params(mut self, params: LayoutParams) -> Self {
        self.params = params;
        self
    }

    /// Set cell size and padding, keeping the track counts.
    pub fn with_cell(mut self, padding: f64, child_width: f64, child_height: f64) -> Self {
        self.params.padding = padding;
        self.params.child_width = child_width;
        self.params.child_height = child_height;
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ComponentId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn index_of(&self, component: &str) -> Option<usize> {
        self.children.iter().position(|id| id == component)
    }

    pub fn contains(&self, component: &str) -> bool {
        self.index_of(component).is_some()
    }

    /// Member order after moving the child at `from` to `to`. Items between
    /// the two positions shift by one. Out-of-range indices leave the order
    /// as it is.
    pub fn children_moved(&self, from: usize, to: usize) -> Vec<ComponentId> {
        let mut order = self.children.clone();
        if from < order.len() && to < order.len() && from != to {
            let item = order.remove(from);
            order.insert(to, item);
        }
        order
    }

    /// Maximum member count, `None` for the unbounded row and column kinds.
    pub fn capacity(&self) -> Option<usize> {
        self.capacity_with(&self.params)
    }

    fn capacity_with(&self, params: &LayoutParams) -> Option<usize> {
        match self.kind {
            LayoutKind::Grid => Some((params.rows as usize).saturating_mul(params.columns as usize)),
            LayoutKind::Row | LayoutKind::Column => None,
        }
    }

    /// Effective `(rows, columns)` used for slot math. Rows and columns reserve
    /// one trailing insertion slot after the last member.
    pub fn tracks(&self) -> (usize, usize) {
        match self.kind {
            LayoutKind::Row => (1, self.len() + 1),
            LayoutKind::Column => (self.len() + 1, 1),
            LayoutKind::Grid => (
                self.params.rows.max(1) as usize,
                self.params.columns.max(1) as usize,
            ),
        }
    }

    /// Number of addressable slots, including the trailing insertion slot of
    /// rows and columns.
    pub fn slot_count(&self) -> usize {
        let (rows, columns) = self.tracks();
        rows.saturating_mul(columns)
    }

    /// Check every structural invariant of the container.
    pub fn validate(&self) -> Result<()> {
        self.params.validate(&self.id)?;
        let mut seen = HashSet::with_capacity(self.children.len());
        for child in &self.children {
            if !seen.insert(child.as_str()) {
                return Err(LayoutError::DuplicateMember {
                    layout: self.id.clone(),
                    component: child.clone(),
                });
            }
        }
        self.check_capacity(&self.params)
    }

    /// Would the current members still fit under `params`?
    pub(crate) fn check_capacity(&self, params: &LayoutParams) -> Result<()> {
        if let Some(capacity) = self.capacity_with(params) {
            if self.children.len() > capacity {
                return Err(LayoutError::CapacityExceeded {
                    layout: self.id.clone(),
                    members: self.children.len(),
                    capacity,
                });
            }
        }
        Ok(())
    }

    pub(crate) fn validate_params(&self, params: &LayoutParams) -> Result<()> {
        params.validate(&self.id)?;
        self.check_capacity(params)
    }

    /// Content digest over kind, parameters and member order.
    pub fn fingerprint(&self) -> blake3::Hash {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.id.as_bytes());
        hasher.update(&[0]);
        hasher.update(self.kind.as_str().as_bytes());
        for value in [
            self.params.padding,
            self.params.child_width,
            self.params.child_height,
        ] {
            hasher.update(&value.to_le_bytes());
        }
        hasher.update(&self.params.rows.to_le_bytes());
        hasher.update(&self.params.columns.to_le_bytes());
        for child in &self.children {
            hasher.update(&(child.len() as u64).to_le_bytes());
            hasher.update(child.as_bytes());
        }
        hasher.finalize()
    }
}
