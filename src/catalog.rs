//! Page membership of components, owned by the document layer.
//!
//! The engine only asks two questions of it: which page a component is on,
//! and which components a page holds (in paint order, bottom first).

use std::collections::HashMap;

use crate::position::ComponentId;

pub type PageId = String;

pub trait ComponentCatalog {
    fn page_of(&self, component: &str) -> Option<&str>;

    /// Components on `page` in insertion (paint) order.
    fn components_on(&self, page: &str) -> Vec<ComponentId>;
}

/// In-memory catalog for hosts that do not bring their own.
#[derive(Debug, Default, Clone)]
pub struct PageCatalog {
    pages: HashMap<PageId, Vec<ComponentId>>,
    owners: HashMap<ComponentId, PageId>,
}

impl PageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put `component` on top of `page`, moving it off any other page first.
    pub fn add(&mut self, page: impl Into<PageId>, component: impl Into<ComponentId>) {
        let page = page.into();
        let component = component.into();
        self.remove(&component);
        self.pages
            .entry(page.clone())
            .or_default()
            .push(component.clone());
        self.owners.insert(component, page);
    }

    pub fn remove(&mut self, component: &str) -> Option<PageId> {
        let page = self.owners.remove(component)?;
        if let Some(members) = self.pages.get_mut(&page) {
            members.retain(|id| id != component);
        }
        Some(page)
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl ComponentCatalog for PageCatalog {
    fn page_of(&self, component: &str) -> Option<&str> {
        self.owners.get(component).map(String::as_str)
    }

    fn components_on(&self, page: &str) -> Vec<ComponentId> {
        self.pages.get(page).cloned().unwrap_or_default()
    }
}
