use std::sync::Arc;

use crossterm::event::{KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use dashboard_layout::logging::MemorySink;
use dashboard_layout::{
    EngineConfig, InteractionOutcome, Layout, LayoutEngine, LayoutError, LayoutPatch, Logger,
    PageCatalog, Point, PointerEvent, Rect, Selection, SlotSpacing,
};

const PAGE: &str = "overview";

fn catalog() -> PageCatalog {
    let mut catalog = PageCatalog::new();
    for id in ["strip", "kpi", "trend", "alerts", "note", "chart"] {
        catalog.add(PAGE, id);
    }
    catalog
}

fn engine_with(config: EngineConfig) -> LayoutEngine<PageCatalog> {
    let mut engine = LayoutEngine::new(catalog(), PAGE, config);
    engine
        .place_component("strip", Rect::new(0.0, 0.0, 450.0, 70.0))
        .unwrap();
    engine
        .add_layout(
            Layout::row("strip")
                .with_cell(10.0, 100.0, 50.0)
                .with_children(["kpi", "trend", "alerts"]),
        )
        .unwrap();
    engine
        .place_component("note", Rect::new(600.0, 300.0, 80.0, 40.0))
        .unwrap();
    engine
        .place_component("chart", Rect::new(600.0, 100.0, 120.0, 80.0))
        .unwrap();
    engine.positions_mut().take_dirty();
    engine
}

fn engine() -> LayoutEngine<PageCatalog> {
    engine_with(EngineConfig::default())
}

fn children(engine: &LayoutEngine<PageCatalog>) -> Vec<String> {
    engine.layouts().get("strip").unwrap().children.clone()
}

#[test]
fn members_are_published_on_insert() {
    let engine = engine();
    let positions = engine.positions();
    assert_eq!(positions.get("kpi").unwrap(), Rect::new(10.0, 10.0, 100.0, 50.0));
    assert_eq!(positions.get("trend").unwrap(), Rect::new(120.0, 10.0, 100.0, 50.0));
    assert_eq!(positions.get("alerts").unwrap(), Rect::new(230.0, 10.0, 100.0, 50.0));
}

#[test]
fn dragging_first_member_low_moves_it_last() {
    let mut engine = engine();
    let started = engine.pointer_down(Point::new(20.0, 20.0));
    assert_eq!(
        started,
        InteractionOutcome::ReorderStarted {
            component: "kpi".into(),
            layout: "strip".into()
        }
    );
    assert_eq!(engine.pointer_move(Point::new(20.0, 200.0)), InteractionOutcome::Tracking);
    // Moves never touch the registries.
    assert_eq!(children(&engine), vec!["kpi", "trend", "alerts"]);

    let outcome = engine.pointer_up(Point::new(20.0, 250.0)).unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::Reordered {
            layout: "strip".into(),
            from: 0,
            to: 2
        }
    );
    assert_eq!(children(&engine), vec!["trend", "alerts", "kpi"]);
    assert_eq!(
        engine.positions().get("kpi").unwrap(),
        Rect::new(230.0, 10.0, 100.0, 50.0)
    );
    assert_eq!(
        engine.positions().get("trend").unwrap(),
        Rect::new(10.0, 10.0, 100.0, 50.0)
    );
    assert!(!engine.session().is_dragging());
}

#[test]
fn release_over_source_slot_changes_nothing() {
    let mut engine = engine();
    engine.pointer_down(Point::new(130.0, 20.0));
    let outcome = engine.pointer_up(Point::new(130.0, 100.0)).unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::ReorderUnchanged {
            layout: "strip".into(),
            index: 1
        }
    );
    assert_eq!(children(&engine), vec!["kpi", "trend", "alerts"]);
    assert!(engine.positions_mut().take_dirty().is_empty());
}

#[test]
fn rubber_band_uses_last_move_not_release_point() {
    let mut engine = engine();
    assert_eq!(
        engine.pointer_down(Point::new(500.0, 50.0)),
        InteractionOutcome::SelectionStarted
    );
    assert_eq!(
        engine.pointer_move(Point::new(650.0, 150.0)),
        InteractionOutcome::BandUpdated(Rect::new(500.0, 50.0, 150.0, 100.0))
    );
    let outcome = engine.pointer_up(Point::new(900.0, 900.0)).unwrap();
    let expected = Selection::from(["chart".to_string()]);
    assert_eq!(outcome, InteractionOutcome::Selected(expected.clone()));
    assert_eq!(engine.selection(), &expected);
}

#[test]
fn band_across_container_selects_members_and_container() {
    let mut engine = engine();
    engine.pointer_down(Point::new(460.0, 65.0));
    engine.pointer_move(Point::new(200.0, 5.0));
    let outcome = engine.pointer_up(Point::new(200.0, 5.0)).unwrap();
    let InteractionOutcome::Selected(selection) = outcome else {
        panic!("expected a selection, got {outcome:?}");
    };
    let mut ids: Vec<_> = selection.into_iter().collect();
    ids.sort();
    assert_eq!(ids, vec!["alerts", "strip", "trend"]);
}

#[test]
fn click_on_empty_canvas_clears_selection() {
    let mut engine = engine();
    engine.pointer_down(Point::new(500.0, 50.0));
    engine.pointer_move(Point::new(700.0, 400.0));
    engine.pointer_up(Point::new(700.0, 400.0)).unwrap();
    assert_eq!(engine.selection().len(), 2);

    engine.pointer_down(Point::new(500.0, 50.0));
    assert!(engine.selection().is_empty());
    let outcome = engine.pointer_up(Point::new(500.0, 50.0)).unwrap();
    assert_eq!(outcome, InteractionOutcome::Selected(Selection::new()));
    assert!(engine.selection().is_empty());
}

#[test]
fn freestanding_component_moves_by_pointer_delta() {
    let mut engine = engine();
    assert_eq!(
        engine.pointer_down(Point::new(610.0, 310.0)),
        InteractionOutcome::RepositionStarted {
            component: "note".into()
        }
    );
    let outcome = engine.pointer_up(Point::new(640.0, 330.0)).unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::Repositioned {
            component: "note".into(),
            rect: Rect::new(630.0, 320.0, 80.0, 40.0)
        }
    );
    assert_eq!(
        engine.positions().get("note").unwrap(),
        Rect::new(630.0, 320.0, 80.0, 40.0)
    );
}

#[test]
fn moving_a_container_carries_its_members() {
    let mut engine = engine();
    assert_eq!(
        engine.pointer_down(Point::new(5.0, 5.0)),
        InteractionOutcome::RepositionStarted {
            component: "strip".into()
        }
    );
    engine.pointer_up(Point::new(105.0, 105.0)).unwrap();
    assert_eq!(
        engine.positions().get("kpi").unwrap(),
        Rect::new(110.0, 110.0, 100.0, 50.0)
    );
}

#[test]
fn reorder_release_is_scored_in_container_space() {
    let mut engine = engine();
    engine.pointer_down(Point::new(5.0, 5.0));
    engine.pointer_up(Point::new(5.0, 305.0)).unwrap();
    // The strip now starts at y = 300; kpi sits at y = 310.
    engine.pointer_down(Point::new(20.0, 320.0));
    let outcome = engine.pointer_up(Point::new(20.0, 400.0)).unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::Reordered {
            layout: "strip".into(),
            from: 0,
            to: 1
        }
    );
}

#[test]
fn new_pointer_down_discards_stale_drag() {
    let mut config = EngineConfig::default();
    config.enable_metrics();
    let mut engine = engine_with(config);

    engine.pointer_down(Point::new(20.0, 20.0));
    assert_eq!(
        engine.pointer_down(Point::new(500.0, 50.0)),
        InteractionOutcome::SelectionStarted
    );
    engine.pointer_up(Point::new(20.0, 250.0)).unwrap();
    assert_eq!(children(&engine), vec!["kpi", "trend", "alerts"]);

    let metrics = engine.metrics_snapshot().unwrap();
    assert_eq!(metrics.drags_started, 2);
    assert_eq!(metrics.drags_cancelled, 1);
    assert_eq!(metrics.selections_committed, 1);
}

#[test]
fn cancel_commits_nothing() {
    let mut engine = engine();
    engine.pointer_down(Point::new(20.0, 20.0));
    engine.pointer_move(Point::new(20.0, 250.0));
    assert_eq!(engine.cancel(), InteractionOutcome::Cancelled);
    assert_eq!(
        engine.pointer_up(Point::new(20.0, 250.0)).unwrap(),
        InteractionOutcome::Ignored
    );
    assert_eq!(children(&engine), vec!["kpi", "trend", "alerts"]);
    assert_eq!(engine.cancel(), InteractionOutcome::Ignored);
}

#[test]
fn removing_the_container_mid_drag_abandons_it() {
    let mut engine = engine();
    engine.pointer_down(Point::new(20.0, 20.0));
    engine.remove_component("strip").unwrap();
    assert!(!engine.session().is_dragging());
    assert_eq!(
        engine.pointer_up(Point::new(20.0, 250.0)).unwrap(),
        InteractionOutcome::Ignored
    );
    assert!(engine.layouts().get("strip").is_err());
    // Former members stay where they were, now freestanding.
    assert!(engine.layouts().layout_of("kpi").is_none());
    assert!(engine.positions().contains("kpi"));
}

#[test]
fn removing_a_member_closes_the_gap() {
    let mut engine = engine();
    engine.remove_component("trend").unwrap();
    assert!(engine.positions().get("trend").is_err());
    assert_eq!(children(&engine), vec!["kpi", "alerts"]);
    assert_eq!(
        engine.positions().get("alerts").unwrap(),
        Rect::new(120.0, 10.0, 100.0, 50.0)
    );
    assert_eq!(
        engine.remove_component("trend").unwrap_err(),
        LayoutError::ComponentNotFound("trend".into())
    );
}

#[test]
fn out_of_range_move_is_rejected_and_logged() {
    let sink = Arc::new(MemorySink::new());
    let mut config = EngineConfig::default().with_logger(Logger::from_shared(sink.clone()));
    config.enable_metrics();
    let mut engine = engine_with(config);
    sink.clear();

    let err = engine.move_within_layout("strip", 1, 5).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidOrder { .. }));
    assert_eq!(children(&engine), vec!["kpi", "trend", "alerts"]);
    assert_eq!(sink.messages(), vec!["commit_rejected".to_string()]);
    assert_eq!(engine.metrics_snapshot().unwrap().commits_rejected, 1);
}

#[test]
fn reorder_commit_is_logged_with_fields() {
    let sink = Arc::new(MemorySink::new());
    let config = EngineConfig::default().with_logger(Logger::from_shared(sink.clone()));
    let mut engine = engine_with(config);
    sink.clear();

    engine.pointer_down(Point::new(20.0, 20.0));
    engine.pointer_up(Point::new(20.0, 250.0)).unwrap();
    let events = sink.events();
    let commit = events
        .iter()
        .find(|event| event.message == "reorder_committed")
        .expect("reorder event");
    assert_eq!(commit.target, "dashboard::session.reorder");
    assert_eq!(commit.field("to"), Some(&serde_json::json!(2)));
}

#[test]
fn metrics_can_be_emitted_through_the_logger() {
    let sink = Arc::new(MemorySink::new());
    let mut config = EngineConfig::default().with_logger(Logger::from_shared(sink.clone()));
    config.enable_metrics();
    let engine = engine_with(config);
    sink.clear();
    engine.emit_metrics();
    assert_eq!(sink.messages(), vec!["interaction_metrics".to_string()]);
}

#[test]
fn grid_shrink_below_member_count_is_rejected() {
    let mut engine = engine();
    engine
        .add_layout(
            Layout::grid("board", 2, 2)
                .with_cell(10.0, 100.0, 50.0)
                .with_children(["chart", "note", "gauge"]),
        )
        .unwrap();
    let before = engine.layouts().get("board").unwrap().clone();
    let err = engine
        .set_layout_params("board", LayoutPatch::new().columns(1))
        .unwrap_err();
    assert!(matches!(err, LayoutError::CapacityExceeded { .. }));
    assert_eq!(engine.layouts().get("board").unwrap(), &before);

    let layout = engine
        .set_layout_params("board", LayoutPatch::new().columns(3))
        .unwrap();
    assert_eq!(layout.params.columns, 3);
    assert_eq!(
        engine.positions().get("gauge").unwrap(),
        Rect::new(230.0, 10.0, 100.0, 50.0)
    );
}

#[test]
fn geometry_queries_for_the_render_layer() {
    let engine = engine();
    let extent = engine.total_extent("strip").unwrap();
    assert_eq!((extent.width, extent.height), (450.0, 70.0));
    assert_eq!(
        engine.slot_geometry_for("strip", 3).unwrap(),
        Rect::new(340.0, 10.0, 100.0, 50.0)
    );
    assert!(matches!(
        engine.slot_geometry_for("strip", 4),
        Err(LayoutError::SlotOutOfRange { slots: 4, .. })
    ));
    let placeholder = engine.placeholder_for("strip", 0).unwrap();
    assert_eq!(
        placeholder.resolve(extent),
        engine.slot_geometry_for("strip", 3).unwrap()
    );
    assert_eq!(
        engine.total_extent("missing").unwrap_err(),
        LayoutError::LayoutNotFound("missing".into())
    );
}

#[test]
fn placeholder_rejects_slots_past_the_grid() {
    let mut engine = engine();
    engine
        .add_layout(
            Layout::grid("board", 2, 2)
                .with_cell(10.0, 100.0, 50.0)
                .with_children(["chart"]),
        )
        .unwrap();
    assert_eq!(
        engine.placeholder_for("board", 99).unwrap_err(),
        LayoutError::SlotOutOfRange {
            layout: "board".into(),
            index: 99,
            slots: 4
        }
    );
    assert_eq!(
        engine.placeholder_for("board", 4).unwrap_err(),
        engine.slot_geometry_for("board", 4).unwrap_err()
    );
    let last = engine.placeholder_for("board", 3).unwrap();
    assert_eq!((last.left, last.top), (Some(120.0), Some(70.0)));
    assert!(matches!(
        engine.placeholder_for("strip", 4),
        Err(LayoutError::SlotOutOfRange { slots: 4, .. })
    ));
}

#[test]
fn cell_pitch_spacing_follows_real_cells() {
    let config = EngineConfig::default().with_spacing(SlotSpacing::CellPitch);
    let mut engine = engine_with(config);
    // Release near trend's slot origin (120, 10) rather than 100px further down.
    engine.pointer_down(Point::new(20.0, 20.0));
    let outcome = engine.pointer_up(Point::new(125.0, 15.0)).unwrap();
    assert_eq!(
        outcome,
        InteractionOutcome::Reordered {
            layout: "strip".into(),
            from: 0,
            to: 1
        }
    );
}

#[test]
fn terminal_mouse_events_drive_the_session() {
    let mut engine = engine();
    let report = |kind, column, row| MouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    };
    let script = [
        report(MouseEventKind::Down(MouseButton::Left), 20, 20),
        report(MouseEventKind::Drag(MouseButton::Left), 20, 120),
        report(MouseEventKind::Up(MouseButton::Left), 20, 250),
    ];
    let mut last = InteractionOutcome::Ignored;
    for mouse in &script {
        let event = PointerEvent::from_mouse(mouse).unwrap();
        last = engine.handle_pointer(event).unwrap();
    }
    assert!(matches!(last, InteractionOutcome::Reordered { to: 2, .. }));
    assert_eq!(
        engine.handle_pointer(PointerEvent::cancel()).unwrap(),
        InteractionOutcome::Ignored
    );
}

#[test]
fn switching_pages_resets_the_session() {
    let mut engine = engine();
    engine.pointer_down(Point::new(500.0, 50.0));
    engine.set_page("details");
    assert!(!engine.session().is_dragging());
    assert_eq!(engine.page(), "details");
    // Nothing from the old page is a candidate any more.
    engine.pointer_down(Point::new(0.0, 0.0));
    engine.pointer_move(Point::new(1000.0, 1000.0));
    let outcome = engine.pointer_up(Point::new(1000.0, 1000.0)).unwrap();
    assert_eq!(outcome, InteractionOutcome::Selected(Selection::new()));
}
