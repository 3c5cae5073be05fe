use std::collections::{HashMap, HashSet};

use crate::error::{LayoutError, Result};
use crate::geometry::Rect;

/// Opaque component identifier, unique within a dashboard document.
pub type ComponentId = String;

/// Mapping from component id to its current canvas box.
///
/// Writes are visible to the very next read. Ids whose box changed since the
/// last [`PositionIndex::take_dirty`] are remembered so the render layer only
/// repaints what moved.
#[derive(Debug, Default, Clone)]
pub struct PositionIndex {
    entries: HashMap<ComponentId, Rect>,
    dirty: HashSet<ComponentId>,
}

impl PositionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Result<Rect> {
        self.entries
            .get(id)
            .copied()
            .ok_or_else(|| LayoutError::ComponentNotFound(id.to_string()))
    }

    pub fn try_get(&self, id: &str) -> Option<Rect> {
        self.entries.get(id).copied()
    }

    /// Store the box for `id`. Negative or non-finite sizes are rejected;
    /// zero-area boxes are accepted.
    pub fn set(&mut self, id: impl Into<ComponentId>, rect: Rect) -> Result<()> {
        let id = id.into();
        if !rect.has_valid_size() {
            return Err(LayoutError::InvalidGeometry(format!(
                "component `{id}` has size {}x{}",
                rect.width, rect.height
            )));
        }

        use std::collections::hash_map::Entry;
        match self.entries.entry(id.clone()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() != rect {
                    entry.insert(rect);
                    self.dirty.insert(id);
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(rect);
                self.dirty.insert(id);
            }
        }
        Ok(())
    }

    /// Drop the entry for a removed component. Returns the last known box.
    pub fn remove(&mut self, id: &str) -> Option<Rect> {
        self.dirty.remove(id);
        self.entries.remove(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Drain the ids that changed since the previous call, sorted by id.
    pub fn take_dirty(&mut self) -> Vec<(ComponentId, Rect)> {
        let mut changed: Vec<_> = self
            .dirty
            .drain()
            .filter_map(|id| self.entries.get(&id).map(|rect| (id, *rect)))
            .collect();
        changed.sort_by(|a, b| a.0.cmp(&b.0));
        changed
    }
}
