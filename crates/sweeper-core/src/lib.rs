pub mod audit;
pub mod config;
pub mod error;
pub mod executor;
pub mod interact;
pub mod plan;
pub mod planner;
pub mod policy;
pub mod scanner;
pub mod trash;

pub use audit::{new_run_id, AuditSink, JsonlAudit, NullAudit};
pub use config::AppConfig;
pub use error::Error;
pub use executor::{RunReport, RunState, Runner};
pub use interact::{parse_selection, Interaction, Selection};
pub use plan::{Plan, PlanStep, SearchSpec, StepAction};
pub use scanner::FileHit;
pub use trash::{SystemTrash, TrashOutcome, TrashSink};
