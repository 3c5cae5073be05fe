use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};

use crate::logging::Logger;
use crate::metrics::InteractionMetrics;
use crate::reorder::SlotSpacing;

/// Serializable engine settings, as stored alongside a dashboard document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    pub reorder_spacing: SlotSpacing,
    pub collect_metrics: bool,
}

impl EngineSettings {
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }
}

/// Configuration knobs for [`LayoutEngine`](super::LayoutEngine).
#[derive(Clone, Debug)]
pub struct EngineConfig {
    /// How reorder releases are scored against member slots.
    pub reorder_spacing: SlotSpacing,
    /// Optional structured logger used by the engine.
    pub logger: Option<Logger>,
    /// Interaction counters. `None` disables collection.
    pub metrics: Option<Arc<Mutex<InteractionMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            reorder_spacing: SlotSpacing::default(),
            logger: None,
            metrics: None,
            metrics_target: "dashboard::metrics".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_settings(settings: &EngineSettings) -> Self {
        let mut config = Self {
            reorder_spacing: settings.reorder_spacing,
            ..Self::default()
        };
        if settings.collect_metrics {
            config.enable_metrics();
        }
        config
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_spacing(mut self, spacing: SlotSpacing) -> Self {
        self.reorder_spacing = spacing;
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(InteractionMetrics::new())));
        }
    }

    pub fn disable_metrics(&mut self) {
        self.metrics = None;
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<InteractionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}
