use std::collections::HashMap;

use blake3::Hash;

use crate::error::{LayoutError, Result};
use crate::layout::{Layout, LayoutId, LayoutPatch};
use crate::position::ComponentId;

/// Frozen copy of a layout plus the digest it had when captured.
///
/// Interaction code scores against the snapshot and hands it back to
/// [`LayoutRegistry::commit_order`], which refuses the write if the layout
/// moved on in the meantime.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub layout: Layout,
    fingerprint: Hash,
}

impl LayoutSnapshot {
    fn capture(layout: &Layout) -> Self {
        Self {
            layout: layout.clone(),
            fingerprint: layout.fingerprint(),
        }
    }

    pub fn fingerprint(&self) -> Hash {
        self.fingerprint
    }
}

/// Every layout container in the document, keyed by id.
///
/// Membership ("which container owns this component") is always answered by
/// scanning `children`; nothing caches a back-pointer that could drift.
#[derive(Debug, Default, Clone)]
pub struct LayoutRegistry {
    layouts: HashMap<LayoutId, Layout>,
}

impl LayoutRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a container. Rejects broken invariants and members that
    /// already belong to another container.
    pub fn insert(&mut self, layout: Layout) -> Result<()> {
        if self.layouts.contains_key(&layout.id) {
            return Err(LayoutError::DuplicateLayout(layout.id));
        }
        layout.validate()?;
        for child in &layout.children {
            if let Some(owner) = self.layout_of(child) {
                return Err(LayoutError::AlreadyMember {
                    layout: owner.id.clone(),
                    component: child.clone(),
                });
            }
        }
        self.layouts.insert(layout.id.clone(), layout);
        Ok(())
    }

    pub fn remove(&mut self, layout_id: &str) -> Result<Layout> {
        self.layouts
            .remove(layout_id)
            .ok_or_else(|| LayoutError::LayoutNotFound(layout_id.to_string()))
    }

    pub fn get(&self, layout_id: &str) -> Result<&Layout> {
        self.layouts
            .get(layout_id)
            .ok_or_else(|| LayoutError::LayoutNotFound(layout_id.to_string()))
    }

    pub fn contains(&self, layout_id: &str) -> bool {
        self.layouts.contains_key(layout_id)
    }

    pub fn len(&self) -> usize {
        self.layouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layouts.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &LayoutId> {
        self.layouts.keys()
    }

    /// The container that lists `component` among its children, if any.
    pub fn layout_of(&self, component: &str) -> Option<&Layout> {
        self.layouts
            .values()
            .find(|layout| layout.contains(component))
    }

    pub fn snapshot(&self, layout_id: &str) -> Result<LayoutSnapshot> {
        self.get(layout_id).map(LayoutSnapshot::capture)
    }

    /// Replace the member order. `new_order` must be a permutation of the
    /// current children.
    pub fn set_children(&mut self, layout_id: &str, new_order: Vec<ComponentId>) -> Result<&Layout> {
        let layout = self
            .layouts
            .get_mut(layout_id)
            .ok_or_else(|| LayoutError::LayoutNotFound(layout_id.to_string()))?;
        check_permutation(layout, &new_order)?;
        layout.children = new_order;
        Ok(layout)
    }

    /// Merge a parameter patch. Either the whole patch applies or nothing does.
    pub fn set_params(&mut self, layout_id: &str, patch: LayoutPatch) -> Result<&Layout> {
        let layout = self
            .layouts
            .get_mut(layout_id)
            .ok_or_else(|| LayoutError::LayoutNotFound(layout_id.to_string()))?;
        let merged = patch.apply(layout.params);
        layout.validate_params(&merged)?;
        layout.params = merged;
        Ok(layout)
    }

    /// Move one member from `from` to `to`, shifting everything in between by
    /// one slot. Equal indices return the layout untouched.
    pub fn move_within_layout(&mut self, layout_id: &str, from: usize, to: usize) -> Result<Layout> {
        let layout = self.get(layout_id)?;
        let len = layout.len();
        if from >= len || to >= len {
            return Err(LayoutError::InvalidOrder {
                layout: layout_id.to_string(),
                reason: format!("move {from} -> {to} is outside 0..{len}"),
            });
        }
        if from == to {
            return Ok(layout.clone());
        }
        let reordered = layout.children_moved(from, to);
        self.set_children(layout_id, reordered).cloned()
    }

    /// Write an order computed from `snapshot`, provided the layout is still
    /// exactly what the snapshot saw.
    pub fn commit_order(
        &mut self,
        snapshot: &LayoutSnapshot,
        new_order: Vec<ComponentId>,
    ) -> Result<&Layout> {
        let id = snapshot.layout.id.as_str();
        let current = self.get(id)?;
        if current.fingerprint() != snapshot.fingerprint {
            return Err(LayoutError::StaleSnapshot(id.to_string()));
        }
        self.set_children(id, new_order)
    }

    /// Append a component to a container.
    pub fn attach(&mut self, layout_id: &str, component: impl Into<ComponentId>) -> Result<&Layout> {
        let component = component.into();
        if let Some(owner) = self.layout_of(&component) {
            return Err(LayoutError::AlreadyMember {
                layout: owner.id.clone(),
                component,
            });
        }
        let layout = self
            .layouts
            .get_mut(layout_id)
            .ok_or_else(|| LayoutError::LayoutNotFound(layout_id.to_string()))?;
        if let Some(capacity) = layout.capacity() {
            if layout.len() >= capacity {
                return Err(LayoutError::CapacityExceeded {
                    layout: layout.id.clone(),
                    members: layout.len() + 1,
                    capacity,
                });
            }
        }
        layout.children.push(component);
        Ok(layout)
    }

    /// Remove a component from whichever container holds it. Returns the id of
    /// that container.
    pub fn detach(&mut self, component: &str) -> Result<LayoutId> {
        let layout = self
            .layouts
            .values_mut()
            .find(|layout| layout.contains(component))
            .ok_or_else(|| LayoutError::NotAMember(component.to_string()))?;
        layout.children.retain(|id| id != component);
        Ok(layout.id.clone())
    }
}

fn check_permutation(layout: &Layout, new_order: &[ComponentId]) -> Result<()> {
    let invalid = |reason: String| LayoutError::InvalidOrder {
        layout: layout.id.clone(),
        reason,
    };
    if new_order.len() != layout.children.len() {
        return Err(invalid(format!(
            "expected {} members, got {}",
            layout.children.len(),
            new_order.len()
        )));
    }

    let mut counts: HashMap<&str, isize> = HashMap::with_capacity(new_order.len());
    for id in &layout.children {
        *counts.entry(id.as_str()).or_default() += 1;
    }
    for id in new_order {
        let count = counts.entry(id.as_str()).or_default();
        *count -= 1;
        if *count < 0 {
            return Err(invalid(format!("`{id}` is not a current member")));
        }
    }
    Ok(())
}
