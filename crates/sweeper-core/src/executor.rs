//! The policy-gated state machine that walks a Plan:
//! search → select → [risk confirm] → [bulk confirm] → final confirm →
//! delete, ending in Done or Aborted. Per-step state is threaded by value
//! through the transitions; nothing in the loop panics or propagates an
//! error out of it.

use std::path::PathBuf;

use serde_json::json;
use tracing::{debug, info};

use crate::audit::AuditSink;
use crate::config::AppConfig;
use crate::interact::{Interaction, Selection};
use crate::plan::{Plan, SearchSpec, StepAction};
use crate::policy;
use crate::scanner::{self, FileHit};
use crate::trash::{TrashOutcome, TrashSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Search,
    Select,
    RiskConfirm,
    BulkConfirm,
    FinalConfirm,
    Delete,
    Done,
    Aborted,
}

/// Aggregate outcome of one run. `state` is always Done or Aborted.
#[derive(Debug)]
pub struct RunReport {
    pub state: RunState,
    /// Candidates dropped by the scope filter.
    pub hidden: usize,
    pub selected: usize,
    pub trashed: usize,
    pub failures: Vec<TrashOutcome>,
    pub dry_run: bool,
}

/// Candidate and selection state carried between steps, passed by value so
/// every transition is explicit about what it consumes and produces.
#[derive(Default)]
struct StepState {
    hits: Vec<FileHit>,
    chosen: Vec<FileHit>,
    hidden: usize,
}

enum Flow {
    Continue(StepState),
    Stop(RunReport),
}

pub struct Runner<'a, I, T, A> {
    config: &'a AppConfig,
    scopes: Vec<PathBuf>,
    interaction: &'a mut I,
    sink: &'a T,
    audit: &'a A,
    run_id: String,
    dry_run: bool,
    state: RunState,
}

impl<'a, I, T, A> Runner<'a, I, T, A>
where
    I: Interaction,
    T: TrashSink,
    A: AuditSink,
{
    pub fn new(
        config: &'a AppConfig,
        scopes: Vec<PathBuf>,
        interaction: &'a mut I,
        sink: &'a T,
        audit: &'a A,
        run_id: String,
        dry_run: bool,
    ) -> Self {
        Self {
            config,
            scopes,
            interaction,
            sink,
            audit,
            run_id,
            dry_run,
            state: RunState::Search,
        }
    }

    /// Consume the plan's steps in order. Dispatch is exhaustive over the
    /// closed step set, so there is no unknown-step path.
    pub fn run(&mut self, plan: &Plan) -> RunReport {
        self.record(
            "info",
            "plan.built",
            serde_json::to_value(plan).unwrap_or(json!(null)),
        );
        self.interaction.show_plan(plan);

        let mut state = StepState::default();
        for step in &plan.steps {
            state = match &step.action {
                StepAction::SearchFiles(spec) => self.search(spec, state),
                StepAction::SelectTargets => match self.select(state) {
                    Flow::Continue(next) => next,
                    Flow::Stop(report) => return report,
                },
                StepAction::MoveToTrash => return self.trash(state),
                StepAction::Noop => {
                    self.interaction.notify(&step.description);
                    return self.finish(RunState::Done, state.hidden, 0, 0, Vec::new());
                }
            };
        }

        // A plan that never reached a terminal step deletes nothing.
        self.finish(RunState::Done, state.hidden, 0, 0, Vec::new())
    }

    fn search(&mut self, spec: &SearchSpec, state: StepState) -> StepState {
        self.advance(RunState::Search);
        info!(
            "Searching {:?} under {} scope root(s)",
            spec.patterns,
            self.scopes.len()
        );

        let hits = scanner::find(&self.scopes, spec);
        let sample: Vec<String> = hits
            .iter()
            .take(5)
            .map(|h| h.path.display().to_string())
            .collect();
        self.record(
            "info",
            "search.results",
            json!({"count": hits.len(), "sample": sample}),
        );

        StepState { hits, ..state }
    }

    fn select(&mut self, state: StepState) -> Flow {
        self.advance(RunState::Select);

        let total = state.hits.len();
        let visible: Vec<FileHit> = state
            .hits
            .into_iter()
            .filter(|hit| policy::in_allowed_scopes(&hit.path, &self.scopes))
            .collect();
        let hidden = total - visible.len();
        if hidden > 0 {
            info!("{hidden} candidate(s) outside the allowed scopes were hidden");
        }
        self.interaction.show_candidates(&visible, hidden);

        let chosen: Vec<FileHit> = match self.interaction.select_targets(&visible) {
            Selection::Cancelled => Vec::new(),
            Selection::All => visible,
            Selection::Indices(indices) => indices
                .iter()
                .filter(|&&i| i >= 1)
                .filter_map(|&i| visible.get(i - 1).cloned())
                .collect(),
        };
        if chosen.is_empty() {
            self.record("info", "select.empty", json!({}));
            self.interaction.notify("Nothing selected.");
            return Flow::Stop(self.finish(RunState::Aborted, hidden, 0, 0, Vec::new()));
        }
        self.record(
            "info",
            "select.made",
            json!({
                "count": chosen.len(),
                "paths": chosen
                    .iter()
                    .map(|h| h.path.display().to_string())
                    .collect::<Vec<_>>(),
            }),
        );

        // Risk gate first: it is independent of selection size.
        let risky: Vec<FileHit> = chosen
            .iter()
            .filter(|hit| {
                policy::requires_extra_confirmation(&hit.path, &self.config.risky_patterns)
            })
            .cloned()
            .collect();
        if !risky.is_empty() {
            self.advance(RunState::RiskConfirm);
            let response = self
                .interaction
                .risk_response(&risky, &self.config.risk_phrase);
            let confirmed = response.trim().eq_ignore_ascii_case(&self.config.risk_phrase);
            self.record(
                "warn",
                "confirm.risk",
                json!({"risky": risky.len(), "confirmed": confirmed}),
            );
            if !confirmed {
                self.interaction.notify("Aborted.");
                return Flow::Stop(self.finish(RunState::Aborted, hidden, 0, 0, Vec::new()));
            }
        }

        let total_bytes: u64 = chosen.iter().map(|hit| hit.size).sum();
        if policy::bulk_threshold_exceeded(chosen.len(), total_bytes, self.config) {
            self.advance(RunState::BulkConfirm);
            let response =
                self.interaction
                    .bulk_response(chosen.len(), total_bytes, &self.config.bulk_phrase);
            let confirmed = response.trim().eq_ignore_ascii_case(&self.config.bulk_phrase);
            self.record(
                "warn",
                "confirm.bulk",
                json!({
                    "count": chosen.len(),
                    "total_bytes": total_bytes,
                    "confirmed": confirmed,
                }),
            );
            if !confirmed {
                self.interaction.notify("Aborted.");
                return Flow::Stop(self.finish(RunState::Aborted, hidden, 0, 0, Vec::new()));
            }
        }

        Flow::Continue(StepState {
            hits: Vec::new(),
            chosen,
            hidden,
        })
    }

    fn trash(&mut self, state: StepState) -> RunReport {
        let chosen = state.chosen;
        if chosen.is_empty() {
            self.interaction.notify("Nothing to delete.");
            return self.finish(RunState::Done, state.hidden, 0, 0, Vec::new());
        }

        self.interaction.show_pending(&chosen, self.dry_run);

        // Dry-run takes precedence over every prior confirmation.
        if self.dry_run {
            self.record("info", "execute.dry_run", json!({"count": chosen.len()}));
            info!(
                "Dry-run: {} file(s) would be moved to the trash",
                chosen.len()
            );
            return self.finish(RunState::Done, state.hidden, chosen.len(), 0, Vec::new());
        }

        self.advance(RunState::FinalConfirm);
        let response = self.interaction.final_response();
        let confirmed = response.trim().eq_ignore_ascii_case("yes");
        self.record("info", "confirm.final", json!({"confirmed": confirmed}));
        if !confirmed {
            self.interaction.notify("Cancelled.");
            return self.finish(RunState::Aborted, state.hidden, chosen.len(), 0, Vec::new());
        }

        self.advance(RunState::Delete);
        let paths: Vec<PathBuf> = chosen.iter().map(|hit| hit.path.clone()).collect();
        let (trashed, outcomes) = self.sink.move_to_trash(&paths);
        let failures: Vec<TrashOutcome> = outcomes
            .into_iter()
            .filter(|outcome| outcome.error.is_some())
            .collect();

        let level = if failures.is_empty() { "info" } else { "warn" };
        self.record(
            level,
            "trash.result",
            json!({
                "requested": paths.len(),
                "trashed": trashed,
                "failures": failures
                    .iter()
                    .map(|f| json!({
                        "path": f.path.display().to_string(),
                        "reason": f.error,
                    }))
                    .collect::<Vec<_>>(),
            }),
        );
        self.interaction.show_result(trashed, &failures);
        info!("Moved {} of {} item(s) to the trash", trashed, paths.len());

        self.finish(RunState::Done, state.hidden, paths.len(), trashed, failures)
    }

    fn finish(
        &mut self,
        state: RunState,
        hidden: usize,
        selected: usize,
        trashed: usize,
        failures: Vec<TrashOutcome>,
    ) -> RunReport {
        self.advance(state);
        RunReport {
            state,
            hidden,
            selected,
            trashed,
            failures,
            dry_run: self.dry_run,
        }
    }

    fn advance(&mut self, next: RunState) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn record(&self, level: &str, event: &str, data: serde_json::Value) {
        self.audit.record(&self.run_id, level, event, data);
    }
}
