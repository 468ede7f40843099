//! Append-only run audit: one JSON object per line, correlated by a run
//! id. Write-only: nothing in the core reads it back.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

/// Correlation id for one invocation.
pub fn new_run_id() -> String {
    Uuid::new_v4().to_string()
}

pub trait AuditSink {
    /// Append one event. Must never fail from the caller's point of view;
    /// an audit hiccup is not a reason to stop a run.
    fn record(&self, run_id: &str, level: &str, event: &str, data: Value);
}

/// Writes `{timestamp, run_id, level, event, data}` lines. The file is
/// opened per call; concurrent invocations may interleave lines, a known
/// limitation.
pub struct JsonlAudit {
    path: PathBuf,
}

impl JsonlAudit {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl AuditSink for JsonlAudit {
    fn record(&self, run_id: &str, level: &str, event: &str, data: Value) {
        let record = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "run_id": run_id,
            "level": level,
            "event": event,
            "data": data,
        });
        if let Err(e) = self.append(&record.to_string()) {
            warn!("Audit record '{}' dropped: {}", event, e);
        }
    }
}

/// Discards every event. For tests and silent embedding.
pub struct NullAudit;

impl AuditSink for NullAudit {
    fn record(&self, _run_id: &str, _level: &str, _event: &str, _data: Value) {}
}
