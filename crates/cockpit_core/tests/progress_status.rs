use cockpit_core::{
    derive_plan_status, objective_progress, task_completion_ratio, Plan, PlanStatus, Store,
    SubItem, Task, TaskStatus,
};

fn sub_item(progress: f64, done: bool) -> SubItem {
    let mut item = SubItem::new("step");
    item.set_progress(progress);
    item.done = done;
    item
}

fn task_in(plan: &Plan, status: TaskStatus) -> Task {
    let mut task = Task::new(plan.id.clone(), "work item");
    task.status = status;
    task
}

#[test]
fn completion_ratio_of_empty_input_is_zero() {
    let tasks: Vec<Task> = Vec::new();
    assert_eq!(task_completion_ratio(&tasks), 0);
}

#[test]
fn completion_ratio_matches_rounded_done_share() {
    for total in 1..=12usize {
        for done in 0..=total {
            let tasks: Vec<Task> = (0..total)
                .map(|index| {
                    let mut task = Task::new("plan", format!("t{index}"));
                    if index < done {
                        task.status = TaskStatus::Done;
                    }
                    task
                })
                .collect();
            let expected = (100.0 * done as f64 / total as f64).round() as u8;
            assert_eq!(task_completion_ratio(&tasks), expected, "{done}/{total}");
        }
    }
}

#[test]
fn in_review_does_not_count_as_done() {
    let tasks = vec![
        {
            let mut task = Task::new("p", "a");
            task.status = TaskStatus::InReview;
            task
        },
        {
            let mut task = Task::new("p", "b");
            task.status = TaskStatus::Done;
            task
        },
    ];
    assert_eq!(task_completion_ratio(&tasks), 50);
}

#[test]
fn sub_items_average_drives_effective_progress_and_status() {
    let mut plan = Plan::new("project-platform", "Cloud migration");
    plan.sub_items = vec![sub_item(100.0, true), sub_item(50.0, false)];

    assert_eq!(plan.effective_progress(), 75);
    assert_eq!(plan.derived_status(), PlanStatus::InProgress);
}

#[test]
fn effective_progress_rounds_half_up() {
    let mut plan = Plan::new("project-platform", "Rounding");
    plan.sub_items = vec![sub_item(0.0, false), sub_item(1.0, false)];
    assert_eq!(plan.effective_progress(), 1);
}

#[test]
fn plan_status_is_monotonic_in_progress_when_unblocked() {
    assert_eq!(derive_plan_status(0, false), PlanStatus::Todo);
    for progress in 1..=99 {
        assert_eq!(derive_plan_status(progress, false), PlanStatus::InProgress);
    }
    assert_eq!(derive_plan_status(100, false), PlanStatus::Done);
}

#[test]
fn blocked_wins_over_any_progress() {
    for progress in [0, 1, 50, 99, 100] {
        assert_eq!(derive_plan_status(progress, true), PlanStatus::Blocked);
    }
}

#[test]
fn objective_progress_counts_tasks_of_its_plans_only() {
    let mut store = Store::default();
    let platform = Plan::new("project-platform", "Platform");
    let growth = Plan::new("project-growth", "Growth");

    let tasks = [
        task_in(&platform, TaskStatus::Done),
        task_in(&platform, TaskStatus::Done),
        task_in(&platform, TaskStatus::InProgress),
        task_in(&growth, TaskStatus::Todo),
        Task::new("missing-plan", "orphan"),
    ];
    for task in tasks {
        store.tasks.insert(task.id.clone(), task);
    }
    store.plans.insert(platform.id.clone(), platform);
    store.plans.insert(growth.id.clone(), growth);

    assert_eq!(objective_progress(&store, "project-platform"), 67);
    assert_eq!(objective_progress(&store, "project-growth"), 0);
    assert_eq!(objective_progress(&store, "personal-autonomy"), 0);
}

#[test]
fn objective_progress_ignores_plan_progress_weighting() {
    let mut store = Store::default();
    let mut big = Plan::new("project-quality", "Big");
    big.manual_progress_percent = 5;
    let done_task = task_in(&big, TaskStatus::Done);
    store.tasks.insert(done_task.id.clone(), done_task);
    store.plans.insert(big.id.clone(), big);

    assert_eq!(objective_progress(&store, "project-quality"), 100);
}
