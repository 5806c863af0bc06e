//! Plan status derivation and task deadline checks.

use crate::model::plan::PlanStatus;
use crate::model::task::{Task, TaskStatus};
use crate::store::Store;
use chrono::NaiveDateTime;

/// Derives a plan status. `blocked` wins over any progress value.
pub fn derive_plan_status(effective_progress: u8, blocked: bool) -> PlanStatus {
    if blocked {
        return PlanStatus::Blocked;
    }
    match effective_progress {
        0 => PlanStatus::Todo,
        100.. => PlanStatus::Done,
        _ => PlanStatus::InProgress,
    }
}

/// Whether `task` is past the end of its deadline day and not done.
///
/// The whole deadline day counts as on time, so a task only becomes overdue
/// once `now` falls on a later calendar day.
pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    match task.deadline {
        Some(deadline) if task.status != TaskStatus::Done => deadline < now.date(),
        _ => false,
    }
}

/// Overdue tasks ordered by deadline, then title.
pub fn overdue_tasks(store: &Store, now: NaiveDateTime) -> Vec<&Task> {
    let mut overdue: Vec<&Task> = store
        .tasks
        .values()
        .filter(|task| is_overdue(task, now))
        .collect();
    overdue.sort_by(|a, b| a.deadline.cmp(&b.deadline).then_with(|| a.title.cmp(&b.title)));
    overdue
}
