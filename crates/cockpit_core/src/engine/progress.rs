//! Progress aggregation.

use crate::model::plan::Plan;
use crate::model::task::Task;
use crate::store::Store;

/// Percentage of `done` tasks, rounded; 0 for an empty input.
pub fn task_completion_ratio<'a, I>(tasks: I) -> u8
where
    I: IntoIterator<Item = &'a Task>,
{
    let (done, total) = tasks
        .into_iter()
        .fold((0usize, 0usize), |(done, total), task| {
            (done + usize::from(task.is_done()), total + 1)
        });
    if total == 0 {
        return 0;
    }
    (done as f64 * 100.0 / total as f64).round() as u8
}

/// Rounded mean of sub-item progress, or the manual value without sub-items.
pub fn plan_effective_progress(plan: &Plan) -> u8 {
    if plan.sub_items.is_empty() {
        return plan.manual_progress_percent.min(100);
    }
    let sum: u32 = plan
        .sub_items
        .iter()
        .map(|item| u32::from(item.progress_percent.min(100)))
        .sum();
    (f64::from(sum) / plan.sub_items.len() as f64).round() as u8
}

/// Completion ratio over every task whose plan belongs to `objective_id`.
///
/// Binary task granularity: plan sizes and plan progress are not weighted.
/// Tasks pointing at a missing plan are ignored.
pub fn objective_progress(store: &Store, objective_id: &str) -> u8 {
    task_completion_ratio(store.tasks.values().filter(|task| {
        store
            .plans
            .get(&task.plan_id)
            .is_some_and(|plan| plan.objective_id == objective_id)
    }))
}

/// Completion ratio of the tasks of one plan.
pub fn plan_task_progress(store: &Store, plan_id: &str) -> u8 {
    task_completion_ratio(store.tasks_for_plan(plan_id))
}

/// Returns `(done, total)` subtask counts of a task.
pub fn subtask_counts(task: &Task) -> (usize, usize) {
    let done = task.subtasks.iter().filter(|subtask| subtask.done).count();
    (done, task.subtasks.len())
}
