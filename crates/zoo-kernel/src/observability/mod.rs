//! Observability - run events as JSON lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use zoo_route::Diet;

use crate::kernel::TrialOutcome;

/// A planner run event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub diet: Option<Diet>,
    pub message: String,
    #[serde(default)]
    pub metadata: serde_json::Value,
}

/// Appends run events to a JSON-lines file.
pub struct EventEmitter {
    events_path: PathBuf,
}

impl EventEmitter {
    pub fn new(events_path: &Path) -> Self {
        Self {
            events_path: events_path.to_path_buf(),
        }
    }

    /// Emit an event.
    pub fn emit(&self, event: RunEvent) -> Result<()> {
        if let Some(parent) = self.events_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.events_path)
            .with_context(|| format!("Failed to open {}", self.events_path.display()))?;

        let line = serde_json::to_string(&event)?;
        writeln!(file, "{}", line)?;

        Ok(())
    }

    /// Emit a simple event.
    pub fn emit_simple(&self, event_type: &str, message: &str) -> Result<()> {
        self.emit(RunEvent {
            timestamp: Utc::now(),
            event_type: event_type.to_string(),
            diet: None,
            message: message.to_string(),
            metadata: serde_json::Value::Null,
        })
    }

    /// Emit a `trial_scored` event carrying the route and its score.
    pub fn emit_trial(&self, trial: &TrialOutcome) -> Result<()> {
        self.emit(RunEvent {
            timestamp: Utc::now(),
            event_type: "trial_scored".to_string(),
            diet: Some(trial.diet),
            message: format!("Diet {}: Score = {:.2}", trial.diet.letter(), trial.score.score),
            metadata: serde_json::json!({
                "policy": trial.route.policy,
                "storage": trial.route.storage,
                "visits": trial.route.visits,
                "skipped": trial.route.skipped,
                "remaining_battery": trial.route.remaining_battery,
                "importance": trial.score.importance,
                "distance": trial.score.distance,
                "path": trial.route.path,
            }),
        })
    }
}
