use serde::{Deserialize, Serialize};

/// Search parameters inferred from the prompt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchSpec {
    /// Glob patterns matched against file names; `*` when nothing was
    /// inferred.
    pub patterns: Vec<String>,
    pub newer_than_days: Option<u32>,
    pub older_than_days: Option<u32>,
    pub min_size_kb: Option<u64>,
    pub max_size_kb: Option<u64>,
    /// Case-insensitive substring filter on the file name.
    pub name_hint: Option<String>,
}

/// One typed action. The set is closed, so the executor's dispatch is an
/// exhaustive match and there is no "unknown step" at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "params", rename_all = "snake_case")]
pub enum StepAction {
    SearchFiles(SearchSpec),
    SelectTargets,
    MoveToTrash,
    Noop,
}

impl StepAction {
    pub fn name(&self) -> &'static str {
        match self {
            StepAction::SearchFiles(_) => "search_files",
            StepAction::SelectTargets => "select_targets",
            StepAction::MoveToTrash => "move_to_trash",
            StepAction::Noop => "noop",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanStep {
    pub description: String,
    #[serde(flatten)]
    pub action: StepAction,
}

impl PlanStep {
    pub fn new(description: impl Into<String>, action: StepAction) -> Self {
        Self {
            description: description.into(),
            action,
        }
    }
}

/// Ordered steps for one request. Built once per invocation, immutable
/// thereafter, consumed linearly by the executor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    pub steps: Vec<PlanStep>,
    pub rationale: String,
}
