use chrono::{NaiveDate, NaiveDateTime};
use cockpit_core::{
    dashboard_snapshot, is_overdue, overdue_tasks, validate_catalog, Kpi, MemoryPort, Period,
    Plan, Task, TaskStatus, Tracker,
};

fn noon(date: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(&format!("{date} 12:00:00"), "%Y-%m-%d %H:%M:%S").unwrap()
}

fn task_due(plan_id: &str, title: &str, deadline: Option<(i32, u32, u32)>) -> Task {
    let mut task = Task::new(plan_id, title);
    task.deadline = deadline.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d));
    task
}

#[test]
fn catalog_weights_sum_to_100_per_category() {
    assert!(validate_catalog().is_ok());
}

#[test]
fn overdue_tasks_are_sorted_and_exclude_done() {
    let mut tracker = Tracker::open(MemoryPort::new());
    let late = tracker.upsert_task(task_due("p", "b-late", Some((2026, 2, 1))));
    let later = tracker.upsert_task(task_due("p", "a-later", Some((2026, 3, 1))));
    let today = tracker.upsert_task(task_due("p", "today", Some((2026, 3, 15))));
    let done = tracker.upsert_task(task_due("p", "done", Some((2026, 1, 1))));
    tracker.upsert_task(task_due("p", "undated", None));
    tracker.move_task(&done, TaskStatus::Done).unwrap();

    let now = noon("2026-03-15");
    let ids: Vec<&str> = overdue_tasks(tracker.store(), now)
        .into_iter()
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(ids, [late.as_str(), later.as_str()]);
    assert!(!is_overdue(&tracker.store().tasks[&today], now));
}

#[test]
fn snapshot_combines_progress_kpis_notes_and_bonus() {
    let mut tracker = Tracker::open(MemoryPort::new());

    let mut migration = Plan::new("project-platform", "Migration");
    migration.manual_progress_percent = 80;
    let migration_id = tracker.upsert_plan(migration);

    let mut blocked = Plan::new("project-platform", "Vendor contract");
    blocked.blocked = true;
    blocked.manual_progress_percent = 40;
    let blocked_id = tracker.upsert_plan(blocked);

    let first = tracker.upsert_task(Task::new(migration_id.clone(), "Move DB"));
    tracker.upsert_task(Task::new(blocked_id.clone(), "Sign"));
    tracker.move_task(&first, TaskStatus::Done).unwrap();

    let mut kpi = Kpi::new("project-platform", "Services moved", 50.0);
    kpi.link_plan(&migration_id);
    kpi.link_plan(&blocked_id);
    tracker.upsert_kpi(kpi);

    tracker.set_note("project-platform", Period::FirstHalf, 8.0);
    tracker.add_journal_entry("project-platform", "vendor escalated");

    let snapshot = dashboard_snapshot(tracker.store(), noon("2026-04-01"));
    let platform = snapshot.objective("project-platform").unwrap();

    assert_eq!(platform.progress_percent, 50);
    assert_eq!(platform.plans.in_progress, 1);
    assert_eq!(platform.plans.blocked, 1);
    assert_eq!(platform.plans.total(), 2);
    assert_eq!(platform.task_count, 2);
    assert_eq!(platform.first_half_note, 8.0);
    assert_eq!(platform.second_half_note, 0.0);
    assert_eq!(platform.journal_entries, 1);

    let kpi = &platform.kpis[0];
    assert!(kpi.linked);
    assert!((kpi.current - 30.0).abs() < 1e-9);
    assert_eq!(kpi.progress_percent, 60);

    let first_half = snapshot.bonus(Period::FirstHalf).unwrap();
    assert!((first_half.project - 3.2).abs() < 1e-9);
    assert_eq!(first_half.personal, 0.0);
    assert_eq!(first_half.organization, None);
    assert!(snapshot.overdue_task_ids.is_empty());
}

#[test]
fn snapshot_serializes_for_presentation_consumers() {
    let tracker = Tracker::open(MemoryPort::new());
    let snapshot = dashboard_snapshot(tracker.store(), noon("2026-01-10"));
    let json = serde_json::to_value(&snapshot).unwrap();

    assert_eq!(json["objectives"].as_array().unwrap().len(), 8);
    assert_eq!(json["objectives"][0]["objective"]["weightPercent"], 30.0);
    assert_eq!(json["bonuses"][1]["period"], "secondHalf");
    assert!(json["bonuses"][0]["organization"].is_null());
}
