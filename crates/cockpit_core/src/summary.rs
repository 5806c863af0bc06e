//! Read-only dashboard projection for presentation consumers.
//!
//! # Responsibility
//! - Combine aggregator, deriver, resolver and bonus outputs into one
//!   serializable snapshot per call.
//!
//! # Invariants
//! - Objectives appear in catalog order; plans/tasks/KPIs referencing
//!   unknown objectives are not reported.
//! - Plan statuses are re-derived here, never read from the stored copy.

use crate::catalog::{objectives, Objective};
use crate::engine::bonus::{total_bonus, BonusBreakdown};
use crate::engine::kpi::{progress_percent_of, resolve_current};
use crate::engine::progress::objective_progress;
use crate::engine::status::overdue_tasks;
use crate::model::common::EntityId;
use crate::model::evaluation::Period;
use crate::model::plan::PlanStatus;
use crate::store::Store;
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanStatusCounts {
    pub todo: usize,
    pub in_progress: usize,
    pub done: usize,
    pub blocked: usize,
}

impl PlanStatusCounts {
    fn record(&mut self, status: PlanStatus) {
        match status {
            PlanStatus::Todo => self.todo += 1,
            PlanStatus::InProgress => self.in_progress += 1,
            PlanStatus::Done => self.done += 1,
            PlanStatus::Blocked => self.blocked += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.todo + self.in_progress + self.done + self.blocked
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub id: EntityId,
    pub name: String,
    pub unit: String,
    pub target: f64,
    pub current: f64,
    pub progress_percent: u8,
    pub linked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveSnapshot {
    pub objective: &'static Objective,
    pub progress_percent: u8,
    pub plans: PlanStatusCounts,
    pub task_count: usize,
    pub kpis: Vec<KpiSnapshot>,
    pub first_half_note: f64,
    pub second_half_note: f64,
    pub journal_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub objectives: Vec<ObjectiveSnapshot>,
    pub bonuses: Vec<BonusBreakdown>,
    /// Sorted by deadline, then title.
    pub overdue_task_ids: Vec<EntityId>,
}

impl DashboardSnapshot {
    pub fn objective(&self, objective_id: &str) -> Option<&ObjectiveSnapshot> {
        self.objectives
            .iter()
            .find(|snapshot| snapshot.objective.id == objective_id)
    }

    pub fn bonus(&self, period: Period) -> Option<&BonusBreakdown> {
        self.bonuses.iter().find(|bonus| bonus.period == period)
    }
}

/// Builds the full dashboard projection of `store` at `now`.
pub fn dashboard_snapshot(store: &Store, now: NaiveDateTime) -> DashboardSnapshot {
    DashboardSnapshot {
        objectives: objectives()
            .iter()
            .map(|objective| objective_snapshot(store, objective))
            .collect(),
        bonuses: Period::ALL
            .iter()
            .map(|period| total_bonus(*period, &store.notes))
            .collect(),
        overdue_task_ids: overdue_tasks(store, now)
            .into_iter()
            .map(|task| task.id.clone())
            .collect(),
    }
}

fn objective_snapshot(store: &Store, objective: &'static Objective) -> ObjectiveSnapshot {
    let mut plans = PlanStatusCounts::default();
    let mut task_count = 0;
    for plan in store.plans_for_objective(objective.id) {
        plans.record(plan.derived_status());
        task_count += store.tasks_for_plan(&plan.id).count();
    }

    let kpis = store
        .kpis_for_objective(objective.id)
        .map(|kpi| {
            let current = resolve_current(kpi, &store.plans);
            KpiSnapshot {
                id: kpi.id.clone(),
                name: kpi.name.clone(),
                unit: kpi.unit.clone(),
                target: kpi.target,
                current,
                progress_percent: progress_percent_of(current, kpi.target),
                linked: kpi.is_linked(),
            }
        })
        .collect();

    ObjectiveSnapshot {
        objective,
        progress_percent: objective_progress(store, objective.id),
        plans,
        task_count,
        kpis,
        first_half_note: store.note(objective.id, Period::FirstHalf),
        second_half_note: store.note(objective.id, Period::SecondHalf),
        journal_entries: store.journal_for(objective.id).len(),
    }
}
