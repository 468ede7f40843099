//! Recoverable deletion behind a narrow trait. The executor never calls
//! the OS trash directly, so tests can substitute recording or failing
//! sinks.

use std::path::PathBuf;

use tracing::error;

/// Per-item result of a trash attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct TrashOutcome {
    pub path: PathBuf,
    /// None on success, otherwise a sink-specific reason.
    pub error: Option<String>,
}

pub trait TrashSink {
    /// Attempt every path independently; one failure must not stop the
    /// rest. Returns the success count and a per-item outcome list.
    fn move_to_trash(&self, paths: &[PathBuf]) -> (usize, Vec<TrashOutcome>);
}

/// The OS trash / recycle bin.
pub struct SystemTrash;

impl TrashSink for SystemTrash {
    fn move_to_trash(&self, paths: &[PathBuf]) -> (usize, Vec<TrashOutcome>) {
        let mut trashed = 0;
        let mut outcomes = Vec::with_capacity(paths.len());

        for path in paths {
            match trash::delete(path) {
                Ok(()) => {
                    trashed += 1;
                    outcomes.push(TrashOutcome {
                        path: path.clone(),
                        error: None,
                    });
                }
                Err(e) => {
                    error!("Failed to trash '{}': {}", path.display(), e);
                    outcomes.push(TrashOutcome {
                        path: path.clone(),
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        (trashed, outcomes)
    }
}
