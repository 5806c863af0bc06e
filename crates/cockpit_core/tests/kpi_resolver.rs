use cockpit_core::{progress_percent, resolve_current, Kpi, MemoryPort, Plan, Tracker};
use std::collections::BTreeMap;

fn plan_with_progress(progress: u8) -> Plan {
    let mut plan = Plan::new("project-growth", format!("plan {progress}"));
    plan.manual_progress_percent = progress;
    plan
}

#[test]
fn linked_kpi_scales_average_plan_progress() {
    let first = plan_with_progress(80);
    let second = plan_with_progress(40);
    let mut kpi = Kpi::new("project-growth", "Signed deals", 50.0);
    kpi.link_plan(&first.id);
    kpi.link_plan(&second.id);

    let plans: BTreeMap<_, _> = [first, second]
        .into_iter()
        .map(|plan| (plan.id.clone(), plan))
        .collect();

    assert!((resolve_current(&kpi, &plans) - 30.0).abs() < 1e-9);
    assert_eq!(progress_percent(&kpi, &plans), 60);
}

#[test]
fn manual_value_is_inert_while_linked() {
    let plan = plan_with_progress(50);
    let mut kpi = Kpi::new("project-growth", "Leads", 10.0);
    kpi.manual_current = 9.0;
    kpi.link_plan(&plan.id);

    let mut plans = BTreeMap::new();
    plans.insert(plan.id.clone(), plan.clone());
    assert_eq!(resolve_current(&kpi, &plans), 5.0);

    kpi.manual_current = 1.0;
    assert_eq!(resolve_current(&kpi, &plans), 5.0);

    kpi.unlink_plan(&plan.id);
    assert_eq!(resolve_current(&kpi, &plans), 1.0);
}

#[test]
fn dangling_links_are_skipped() {
    let plan = plan_with_progress(100);
    let mut kpi = Kpi::new("project-growth", "Coverage", 20.0);
    kpi.link_plan("deleted-plan");
    kpi.link_plan(&plan.id);

    let mut plans = BTreeMap::new();
    plans.insert(plan.id.clone(), plan);
    assert_eq!(resolve_current(&kpi, &plans), 20.0);
}

#[test]
fn current_follows_linked_plan_updates() {
    let mut tracker = Tracker::open(MemoryPort::new());
    let mut plan = plan_with_progress(20);
    let plan_id = tracker.upsert_plan(plan.clone());

    let mut kpi = Kpi::new("project-growth", "Pipeline", 200.0);
    kpi.link_plan(&plan_id);
    let kpi_id = tracker.upsert_kpi(kpi);

    let current = |tracker: &Tracker<MemoryPort>| {
        let store = tracker.store();
        resolve_current(&store.kpis[&kpi_id], &store.plans)
    };
    assert!((current(&tracker) - 40.0).abs() < 1e-9);

    plan.manual_progress_percent = 70;
    tracker.upsert_plan(plan);
    assert!((current(&tracker) - 140.0).abs() < 1e-9);
}
