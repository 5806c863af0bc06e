//! KPI current-value resolution.
//!
//! # Invariants
//! - Linked KPIs derive their value from plans only; `manual_current` is
//!   ignored while any link exists, even if every link dangles.
//! - A non-positive target is treated as 1 when computing progress.

use crate::model::common::{clamp_percent, EntityId};
use crate::model::kpi::Kpi;
use crate::model::plan::Plan;
use std::collections::BTreeMap;

/// Resolves the current value of `kpi` against the plan map.
///
/// Linked: `(mean effective progress of existing linked plans / 100) * target`.
/// Unlinked: `manual_current`. Dangling links are skipped; when nothing
/// resolves the current value is 0.
pub fn resolve_current(kpi: &Kpi, plans: &BTreeMap<EntityId, Plan>) -> f64 {
    if !kpi.is_linked() {
        return kpi.manual_current;
    }

    let progresses: Vec<f64> = kpi
        .linked_plan_ids
        .iter()
        .filter_map(|plan_id| plans.get(plan_id))
        .map(|plan| f64::from(plan.effective_progress()))
        .collect();
    if progresses.is_empty() {
        return 0.0;
    }

    let average = progresses.iter().sum::<f64>() / progresses.len() as f64;
    (average / 100.0) * kpi.target
}

/// `min(100, round(current / effective_target * 100))`, floored at 0.
pub fn progress_percent_of(current: f64, target: f64) -> u8 {
    let effective_target = if target > 0.0 { target } else { 1.0 };
    clamp_percent(current / effective_target * 100.0)
}

/// Progress of `kpi` toward its target, resolving the current value first.
pub fn progress_percent(kpi: &Kpi, plans: &BTreeMap<EntityId, Plan>) -> u8 {
    progress_percent_of(resolve_current(kpi, plans), kpi.target)
}
