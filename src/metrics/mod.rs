use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters for pointer interactions handled by the engine.
#[derive(Debug, Default, Clone)]
pub struct InteractionMetrics {
    drags_started: u64,
    drags_cancelled: u64,
    selections_committed: u64,
    components_selected: u64,
    reorders_committed: u64,
    reorders_skipped: u64,
    commits_rejected: u64,
}

impl InteractionMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_drag_started(&mut self) {
        self.drags_started = self.drags_started.saturating_add(1);
    }

    pub fn record_drag_cancelled(&mut self) {
        self.drags_cancelled = self.drags_cancelled.saturating_add(1);
    }

    pub fn record_selection(&mut self, selected: usize) {
        self.selections_committed = self.selections_committed.saturating_add(1);
        self.components_selected = self.components_selected.saturating_add(selected as u64);
    }

    pub fn record_reorder(&mut self, moved: bool) {
        if moved {
            self.reorders_committed = self.reorders_committed.saturating_add(1);
        } else {
            self.reorders_skipped = self.reorders_skipped.saturating_add(1);
        }
    }

    pub fn record_rejection(&mut self) {
        self.commits_rejected = self.commits_rejected.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            drags_started: self.drags_started,
            drags_cancelled: self.drags_cancelled,
            selections_committed: self.selections_committed,
            components_selected: self.components_selected,
            reorders_committed: self.reorders_committed,
            reorders_skipped: self.reorders_skipped,
            commits_rejected: self.commits_rejected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MetricSnapshot {
    pub drags_started: u64,
    pub drags_cancelled: u64,
    pub selections_committed: u64,
    pub components_selected: u64,
    pub reorders_committed: u64,
    pub reorders_skipped: u64,
    pub commits_rejected: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("drags_started".to_string(), json!(self.drags_started));
        map.insert("drags_cancelled".to_string(), json!(self.drags_cancelled));
        map.insert(
            "selections_committed".to_string(),
            json!(self.selections_committed),
        );
        map.insert(
            "components_selected".to_string(),
            json!(self.components_selected),
        );
        map.insert(
            "reorders_committed".to_string(),
            json!(self.reorders_committed),
        );
        map.insert("reorders_skipped".to_string(), json!(self.reorders_skipped));
        map.insert("commits_rejected".to_string(), json!(self.commits_rejected));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(
            LogLevel::Info,
            target,
            "interaction_metrics",
            self.as_fields(),
        )
    }
}
