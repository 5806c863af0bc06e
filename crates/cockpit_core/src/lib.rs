//! Performance tracking and bonus computation engine.
//! This crate is the single source of truth for tracking invariants.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod input;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;
pub mod summary;

pub use catalog::{
    objective, objectives, objectives_in, validate_catalog, BusinessUnit, CatalogError, Objective,
    ObjectiveCategory,
};
pub use config::{CockpitConfig, ConfigError, StorageBackend};
pub use engine::bonus::{category_bonus, total_bonus, BonusBreakdown};
pub use engine::kpi::{progress_percent, progress_percent_of, resolve_current};
pub use engine::progress::{
    objective_progress, plan_effective_progress, plan_task_progress, subtask_counts,
    task_completion_ratio,
};
pub use engine::status::{derive_plan_status, is_overdue, overdue_tasks};
pub use input::parse_numeric_input;
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::common::{new_entity_id, EntityId, Priority};
pub use model::evaluation::{JournalEntry, NoteKey, Period};
pub use model::kpi::Kpi;
pub use model::plan::{Deliverable, Plan, PlanStatus, SubItem};
pub use model::task::{Subtask, Task, TaskStatus};
pub use service::edit::{EditPayload, KpiForm};
pub use service::tracker::{Tracker, TrackerError, TrackerResult};
pub use store::{
    load_store, save_store, DocumentPort, JsonFilePort, MemoryPort, PersistError, PersistResult,
    SqlitePort, Store,
};
pub use summary::{dashboard_snapshot, DashboardSnapshot, KpiSnapshot, ObjectiveSnapshot};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
