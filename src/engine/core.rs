use std::collections::HashSet;

use serde_json::{Value, json};

use crate::catalog::{ComponentCatalog, PageId};
use crate::error::{LayoutError, Result};
use crate::geometry::{Extent, Point, Rect, sanitize};
use crate::input::{PointerEvent, PointerKind};
use crate::layout::{Layout, LayoutId, LayoutPatch, Placeholder, grid, placeholder};
use crate::logging::{LogLevel, event_with_fields, json_kv};
use crate::metrics::{InteractionMetrics, MetricSnapshot};
use crate::position::{ComponentId, PositionIndex};
use crate::registry::LayoutRegistry;
use crate::reorder::{ReorderPlan, plan_reorder};
use crate::selection::{Selection, compute_selection};
use crate::session::{DragKind, DragSession, InteractionSession};

use super::config::EngineConfig;

const TARGET_SESSION: &str = "dashboard::session";
const TARGET_SELECTION: &str = "dashboard::session.selection";
const TARGET_REORDER: &str = "dashboard::session.reorder";
const TARGET_DOCUMENT: &str = "dashboard::document";

/// What a pointer event did.
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    /// Nothing to do (move or release while idle).
    Ignored,
    SelectionStarted,
    ReorderStarted {
        component: ComponentId,
        layout: LayoutId,
    },
    RepositionStarted {
        component: ComponentId,
    },
    /// The selection rectangle after a move.
    BandUpdated(Rect),
    /// A reorder or reposition drag moved; nothing is committed until release.
    Tracking,
    Selected(Selection),
    Reordered {
        layout: LayoutId,
        from: usize,
        to: usize,
    },
    /// Released over the slot it came from.
    ReorderUnchanged {
        layout: LayoutId,
        index: usize,
    },
    Repositioned {
        component: ComponentId,
        rect: Rect,
    },
    Cancelled,
}

/// The layout & selection engine as seen by a host application.
///
/// Owns the position index, the layout registry and the interaction session.
/// Pointer moves only touch the session; registries change on release or
/// through the explicit document operations.
pub struct LayoutEngine<C> {
    positions: PositionIndex,
    layouts: LayoutRegistry,
    catalog: C,
    page: PageId,
    session: InteractionSession,
    config: EngineConfig,
}

impl<C: ComponentCatalog> LayoutEngine<C> {
    pub fn new(catalog: C, page: impl Into<PageId>, config: EngineConfig) -> Self {
        Self {
            positions: PositionIndex::new(),
            layouts: LayoutRegistry::new(),
            catalog,
            page: page.into(),
            session: InteractionSession::new(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EngineConfig {
        &mut self.config
    }

    pub fn positions(&self) -> &PositionIndex {
        &self.positions
    }

    /// Direct access for the render layer (e.g. draining dirty entries).
    pub fn positions_mut(&mut self) -> &mut PositionIndex {
        &mut self.positions
    }

    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut C {
        &mut self.catalog
    }

    pub fn page(&self) -> &str {
        &self.page
    }

    /// Switch pages. Any drag in flight is abandoned and the selection cleared.
    pub fn set_page(&mut self, page: impl Into<PageId>) {
        self.cancel();
        self.session.replace_selection(Selection::new());
        self.page = page.into();
    }

    pub fn session(&self) -> &InteractionSession {
        &self.session
    }

    pub fn selection(&self) -> &Selection {
        self.session.selection()
    }

    // ----- document hooks -------------------------------------------------

    pub fn place_component(&mut self, id: impl Into<ComponentId>, rect: Rect) -> Result<()> {
        let id = id.into();
        self.positions.set(id.clone(), rect)?;
        if self.layouts.contains(&id) {
            self.publish_layout(&id)?;
        }
        Ok(())
    }

    /// Register a container and lay out its members.
    pub fn add_layout(&mut self, layout: Layout) -> Result<()> {
        let id = layout.id.clone();
        self.layouts.insert(layout)?;
        self.log(
            LogLevel::Debug,
            TARGET_DOCUMENT,
            "layout_added",
            [json_kv("layout", id.as_str())],
        );
        self.publish_layout(&id)
    }

    /// Append `component` to a container and lay the container out again.
    pub fn attach_to_layout(&mut self, layout_id: &str, component: impl Into<ComponentId>) -> Result<()> {
        self.layouts.attach(layout_id, component)?;
        self.publish_layout(layout_id)
    }

    /// Forget a component: its position, its container membership, and its
    /// container role if it was one. Drags involving it are abandoned.
    pub fn remove_component(&mut self, id: &str) -> Result<()> {
        let position = self.positions.remove(id);
        let owner = self.layouts.detach(id).ok();
        let was_layout = self.layouts.remove(id).is_ok();
        if position.is_none() && owner.is_none() && !was_layout {
            return Err(LayoutError::ComponentNotFound(id.to_string()));
        }

        self.session.deselect(id);
        if self.drag_involves(id) {
            self.cancel();
        }
        self.log(
            LogLevel::Debug,
            TARGET_DOCUMENT,
            "component_removed",
            [
                json_kv("component", id),
                json_kv("was_layout", was_layout),
            ],
        );
        match owner {
            Some(layout_id) => self.publish_layout(&layout_id),
            None => Ok(()),
        }
    }

    pub fn set_layout_params(&mut self, layout_id: &str, patch: LayoutPatch) -> Result<&Layout> {
        let merged = self.layouts.set_params(layout_id, patch).map(|_| ());
        if let Err(err) = merged {
            return Err(self.reject(TARGET_DOCUMENT, err));
        }
        self.publish_layout(layout_id)?;
        self.layouts.get(layout_id)
    }

    // ----- host-facing geometry -------------------------------------------

    /// Programmatic rubber-band hit test, independent of any drag.
    pub fn compute_selection<I, S>(&self, rect: &Rect, candidates: I) -> Selection
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        compute_selection(rect, candidates, &self.positions)
    }

    /// Move one member of a container and republish member positions.
    pub fn move_within_layout(&mut self, layout_id: &str, from: usize, to: usize) -> Result<Layout> {
        let layout = self
            .layouts
            .move_within_layout(layout_id, from, to)
            .map_err(|err| self.reject(TARGET_REORDER, err))?;
        if from != to {
            self.publish_layout(layout_id)?;
            self.log(
                LogLevel::Info,
                TARGET_REORDER,
                "layout_reordered",
                [
                    json_kv("layout", layout_id),
                    json_kv("from", from),
                    json_kv("to", to),
                ],
            );
        }
        Ok(layout)
    }

    /// Container-local box of slot `index`, for drawing drop targets.
    pub fn slot_geometry_for(&self, layout_id: &str, index: usize) -> Result<Rect> {
        let layout = self.checked_slot(layout_id, index)?;
        Ok(grid::slot_rect(layout, index))
    }

    /// Drop-target box for slot `index`. Same range rule as
    /// [`slot_geometry_for`](Self::slot_geometry_for).
    pub fn placeholder_for(&self, layout_id: &str, index: usize) -> Result<Placeholder> {
        let layout = self.checked_slot(layout_id, index)?;
        Ok(placeholder::placeholder_rect(layout, index))
    }

    fn checked_slot(&self, layout_id: &str, index: usize) -> Result<&Layout> {
        let layout = self.layouts.get(layout_id)?;
        let slots = layout.slot_count();
        if index >= slots {
            return Err(LayoutError::SlotOutOfRange {
                layout: layout_id.to_string(),
                index,
                slots,
            });
        }
        Ok(layout)
    }

    pub fn total_extent(&self, layout_id: &str) -> Result<Extent> {
        self.layouts.get(layout_id).map(grid::extent)
    }

    /// Recompute every member box of a container (and of containers nested in
    /// it) and write them to the position index.
    pub fn publish_layout(&mut self, layout_id: &str) -> Result<()> {
        let mut visited = HashSet::new();
        self.publish_tree(layout_id, &mut visited)
    }

    fn publish_tree(&mut self, layout_id: &str, visited: &mut HashSet<LayoutId>) -> Result<()> {
        if !visited.insert(layout_id.to_string()) {
            return Ok(());
        }
        let layout = self.layouts.get(layout_id)?;
        let origin = self.container_origin(layout_id);
        let placed: Vec<(ComponentId, Rect)> = layout
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| (child.clone(), grid::member_rect(layout, index, origin)))
            .collect();

        for (child, rect) in placed {
            self.positions.set(child.clone(), rect)?;
            if self.layouts.contains(&child) {
                self.publish_tree(&child, visited)?;
            }
        }
        Ok(())
    }

    fn container_origin(&self, layout_id: &str) -> Point {
        self.positions
            .try_get(layout_id)
            .map(|rect| rect.origin())
            .unwrap_or_default()
    }

    /// Topmost component under `at` on the current page. Layout members win
    /// over the containers drawn beneath them.
    pub fn hit_test(&self, at: Point) -> Option<ComponentId> {
        let mut best: Option<(ComponentId, bool)> = None;
        for id in self.catalog.components_on(&self.page) {
            let Some(rect) = self.positions.try_get(&id) else {
                continue;
            };
            if !rect.contains(at) {
                continue;
            }
            let member = self.layouts.layout_of(&id).is_some();
            let replace = match &best {
                None => true,
                Some((_, best_member)) => member || !best_member,
            };
            if replace {
                best = Some((id, member));
            }
        }
        best.map(|(id, _)| id)
    }

    // ----- pointer handling -----------------------------------------------

    pub fn handle_pointer(&mut self, event: PointerEvent) -> Result<InteractionOutcome> {
        match event.kind {
            PointerKind::Down => Ok(self.pointer_down(event.position)),
            PointerKind::Move => Ok(self.pointer_move(event.position)),
            PointerKind::Up => self.pointer_up(event.position),
            PointerKind::Cancel => Ok(self.cancel()),
        }
    }

    pub fn pointer_down(&mut self, at: Point) -> InteractionOutcome {
        let drag = match self.hit_test(at) {
            Some(component) => match self.layouts.layout_of(&component) {
                Some(layout) => DragSession::reorder(component.clone(), layout.id.clone(), at),
                None => match self.positions.try_get(&component) {
                    Some(origin) => DragSession::reposition(component, origin, at),
                    None => DragSession::select(at),
                },
            },
            None => DragSession::select(at),
        };

        let outcome = match drag.kind() {
            DragKind::Select(_) => InteractionOutcome::SelectionStarted,
            DragKind::Reorder { component, layout } => InteractionOutcome::ReorderStarted {
                component: component.clone(),
                layout: layout.clone(),
            },
            DragKind::Reposition { component, .. } => InteractionOutcome::RepositionStarted {
                component: component.clone(),
            },
        };
        let kind = drag.kind().name();

        if let Some(stale) = self.session.begin(drag) {
            self.with_metrics(InteractionMetrics::record_drag_cancelled);
            self.log(
                LogLevel::Debug,
                TARGET_SESSION,
                "stale_drag_discarded",
                [json_kv("kind", stale.kind().name())],
            );
        }
        self.with_metrics(InteractionMetrics::record_drag_started);
        self.log(
            LogLevel::Debug,
            TARGET_SESSION,
            "drag_started",
            [
                json_kv("kind", kind),
                json_kv("x", at.x),
                json_kv("y", at.y),
            ],
        );
        outcome
    }

    pub fn pointer_move(&mut self, at: Point) -> InteractionOutcome {
        match self.session.update(at) {
            Some(drag) => match drag.band() {
                Some(rect) => InteractionOutcome::BandUpdated(rect),
                None => InteractionOutcome::Tracking,
            },
            None => InteractionOutcome::Ignored,
        }
    }

    /// Commit the active drag. The selection rectangle is the one from the
    /// last move; reorder and reposition use the release point itself.
    pub fn pointer_up(&mut self, at: Point) -> Result<InteractionOutcome> {
        let Some(drag) = self.session.finish() else {
            return Ok(InteractionOutcome::Ignored);
        };
        let start = drag.start();
        match drag.into_kind() {
            DragKind::Select(band) => Ok(self.commit_selection(band.rect())),
            DragKind::Reorder { component, layout } => self
                .commit_reorder(&component, &layout, at)
                .map_err(|err| self.reject(TARGET_REORDER, err)),
            DragKind::Reposition { component, origin } => self
                .commit_reposition(&component, origin, at.x - start.x, at.y - start.y)
                .map_err(|err| self.reject(TARGET_SESSION, err)),
        }
    }

    pub fn cancel(&mut self) -> InteractionOutcome {
        match self.session.cancel() {
            Some(drag) => {
                self.with_metrics(InteractionMetrics::record_drag_cancelled);
                self.log(
                    LogLevel::Debug,
                    TARGET_SESSION,
                    "drag_cancelled",
                    [json_kv("kind", drag.kind().name())],
                );
                InteractionOutcome::Cancelled
            }
            None => InteractionOutcome::Ignored,
        }
    }

    fn commit_selection(&mut self, rect: Rect) -> InteractionOutcome {
        let candidates = self.catalog.components_on(&self.page);
        let selection = compute_selection(&rect, &candidates, &self.positions);
        self.session.replace_selection(selection.clone());
        self.with_metrics(|metrics| metrics.record_selection(selection.len()));
        self.log(
            LogLevel::Info,
            TARGET_SELECTION,
            "selection_committed",
            [
                json_kv("selected", selection.len()),
                json_kv("candidates", candidates.len()),
                json_kv("rect", json!([rect.x, rect.y, rect.width, rect.height])),
            ],
        );
        InteractionOutcome::Selected(selection)
    }

    /// Score `release` against the container's member slots and commit the
    /// move. `release` arrives in canvas space and is made local to the
    /// container first, so nominal scoring measures from the container's top
    /// edge rather than from canvas y = 0.
    fn commit_reorder(
        &mut self,
        component: &str,
        layout_id: &str,
        release: Point,
    ) -> Result<InteractionOutcome> {
        let snapshot = self.layouts.snapshot(layout_id)?;
        let local = release.relative_to(self.container_origin(layout_id));
        let plan = plan_reorder(
            &snapshot.layout,
            component,
            local,
            self.config.reorder_spacing,
        )?;

        match plan {
            ReorderPlan::Unchanged { index } => {
                self.with_metrics(|metrics| metrics.record_reorder(false));
                Ok(InteractionOutcome::ReorderUnchanged {
                    layout: layout_id.to_string(),
                    index,
                })
            }
            ReorderPlan::Move { from, to, order } => {
                self.layouts.commit_order(&snapshot, order)?;
                self.publish_layout(layout_id)?;
                self.with_metrics(|metrics| metrics.record_reorder(true));
                self.log(
                    LogLevel::Info,
                    TARGET_REORDER,
                    "reorder_committed",
                    [
                        json_kv("layout", layout_id),
                        json_kv("component", component),
                        json_kv("from", from),
                        json_kv("to", to),
                    ],
                );
                Ok(InteractionOutcome::Reordered {
                    layout: layout_id.to_string(),
                    from,
                    to,
                })
            }
        }
    }

    fn commit_reposition(
        &mut self,
        component: &str,
        origin: Rect,
        dx: f64,
        dy: f64,
    ) -> Result<InteractionOutcome> {
        let moved = origin.translate(dx, dy);
        let rect = Rect::new(sanitize(moved.x), sanitize(moved.y), moved.width, moved.height);
        self.place_component(component, rect)?;
        Ok(InteractionOutcome::Repositioned {
            component: component.to_string(),
            rect,
        })
    }

    fn drag_involves(&self, id: &str) -> bool {
        match self.session.active().map(DragSession::kind) {
            Some(DragKind::Reorder { component, layout }) => component == id || layout == id,
            Some(DragKind::Reposition { component, .. }) => component == id,
            _ => false,
        }
    }

    // ----- observability --------------------------------------------------

    pub fn metrics_snapshot(&self) -> Option<MetricSnapshot> {
        let metrics = self.config.metrics.as_ref()?;
        metrics.lock().ok().map(|guard| guard.snapshot())
    }

    /// Write the current counters to the configured logger.
    pub fn emit_metrics(&self) {
        if let (Some(logger), Some(snapshot)) = (self.config.logger.as_ref(), self.metrics_snapshot())
        {
            let _ = logger.log_event(snapshot.to_log_event(&self.config.metrics_target));
        }
    }

    fn reject(&self, target: &str, err: LayoutError) -> LayoutError {
        self.with_metrics(InteractionMetrics::record_rejection);
        self.log(
            LogLevel::Warn,
            target,
            "commit_rejected",
            [json_kv("error", err.to_string())],
        );
        err
    }

    fn with_metrics(&self, record: impl FnOnce(&mut InteractionMetrics)) {
        if let Some(metrics) = self.config.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, target: &str, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.config.logger.as_ref() {
            let _ = logger.log_event(event_with_fields(level, target, message, fields));
        }
    }
}
