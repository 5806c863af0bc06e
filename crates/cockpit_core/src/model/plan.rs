//! Action plan model.
//!
//! # Responsibility
//! - Define plans, their sub-items and deliverables.
//! - Expose the resolved progress/status projections of a plan.
//!
//! # Invariants
//! - `status` is never set independently: it is re-derived from effective
//!   progress and `blocked` every time the plan is saved.
//! - Toggling a sub-item `done` forces its progress to 100 or 0.

use crate::engine::progress::plan_effective_progress;
use crate::engine::status::derive_plan_status;
use crate::model::common::{clamp_percent, deserialize_percent, new_entity_id, EntityId, Priority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a plan. Fully determined by `derive_plan_status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanStatus {
    #[default]
    Todo,
    InProgress,
    Done,
    Blocked,
}

/// Partial progress item of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubItem {
    pub id: EntityId,
    pub label: String,
    #[serde(default, deserialize_with = "deserialize_percent")]
    pub progress_percent: u8,
    #[serde(default)]
    pub done: bool,
}

impl SubItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            label: label.into(),
            progress_percent: 0,
            done: false,
        }
    }

    /// Sets the done flag and forces progress to 100 (done) or 0 (not done).
    ///
    /// Un-checking discards any partial progress entered before.
    pub fn set_done(&mut self, done: bool) {
        self.done = done;
        self.progress_percent = if done { 100 } else { 0 };
    }

    /// Sets progress independently of `done`; the flag is left untouched.
    pub fn set_progress(&mut self, percent: f64) {
        self.progress_percent = clamp_percent(percent);
    }
}

/// Binary deliverable of a plan; carries no progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deliverable {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub done: bool,
}

impl Deliverable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            name: name.into(),
            done: false,
        }
    }
}

/// Action plan attached to one catalog objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: EntityId,
    pub objective_id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    /// Used only when `sub_items` is empty.
    #[serde(default, deserialize_with = "deserialize_percent")]
    pub manual_progress_percent: u8,
    #[serde(default)]
    pub blocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default)]
    pub sub_items: Vec<SubItem>,
    #[serde(default)]
    pub deliverables: Vec<Deliverable>,
    /// Persisted copy of the derived status, overwritten on every save.
    #[serde(default)]
    pub status: PlanStatus,
}

impl Plan {
    /// Creates an empty plan with a generated id under `objective_id`.
    pub fn new(objective_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            objective_id: objective_id.into(),
            name: name.into(),
            description: None,
            owner: None,
            priority: Priority::default(),
            manual_progress_percent: 0,
            blocked: false,
            start_date: None,
            target_date: None,
            notes: None,
            sub_items: Vec::new(),
            deliverables: Vec::new(),
            status: PlanStatus::Todo,
        }
    }

    /// Resolved progress: sub-item mean when present, manual value otherwise.
    pub fn effective_progress(&self) -> u8 {
        plan_effective_progress(self)
    }

    /// Status as derived from the current fields, ignoring the stored copy.
    pub fn derived_status(&self) -> PlanStatus {
        derive_plan_status(self.effective_progress(), self.blocked)
    }

    /// Overwrites the stored status with the derived one.
    pub fn refresh_status(&mut self) {
        self.status = self.derived_status();
    }

    pub fn sub_item_mut(&mut self, sub_item_id: &str) -> Option<&mut SubItem> {
        self.sub_items.iter_mut().find(|item| item.id == sub_item_id)
    }

    pub fn deliverable_mut(&mut self, deliverable_id: &str) -> Option<&mut Deliverable> {
        self.deliverables
            .iter_mut()
            .find(|deliverable| deliverable.id == deliverable_id)
    }

    /// Returns `(done, total)` deliverable counts.
    pub fn deliverable_counts(&self) -> (usize, usize) {
        let done = self.deliverables.iter().filter(|d| d.done).count();
        (done, self.deliverables.len())
    }
}

#[cfg(test)]
mod tests {
    use super::{Plan, PlanStatus, SubItem};

    #[test]
    fn toggling_done_forces_progress_extremes() {
        let mut item = SubItem::new("draft");
        item.set_progress(40.0);
        assert_eq!(item.progress_percent, 40);

        item.set_done(true);
        assert_eq!(item.progress_percent, 100);

        item.set_done(false);
        assert_eq!(item.progress_percent, 0);
        assert!(!item.done);
    }

    #[test]
    fn set_progress_leaves_done_flag_alone() {
        let mut item = SubItem::new("review");
        item.set_done(true);
        item.set_progress(30.0);
        assert!(item.done);
        assert_eq!(item.progress_percent, 30);
    }

    #[test]
    fn refresh_status_overwrites_stale_value() {
        let mut plan = Plan::new("project-platform", "Migrate");
        plan.manual_progress_percent = 100;
        plan.status = PlanStatus::Blocked;

        plan.refresh_status();
        assert_eq!(plan.status, PlanStatus::Done);
    }
}
