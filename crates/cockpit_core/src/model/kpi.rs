//! KPI model.
//!
//! # Invariants
//! - When `linked_plan_ids` is non-empty, `manual_current` is inert: the
//!   current value is derived from linked plans only.

use crate::model::common::{new_entity_id, EntityId};
use serde::{Deserialize, Serialize};

/// Target/current metric attached to one objective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub id: EntityId,
    pub objective_id: String,
    pub name: String,
    #[serde(default)]
    pub target: f64,
    #[serde(default)]
    pub manual_current: f64,
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub linked_plan_ids: Vec<EntityId>,
}

impl Kpi {
    /// Creates an unlinked KPI with a generated id.
    pub fn new(objective_id: impl Into<String>, name: impl Into<String>, target: f64) -> Self {
        Self {
            id: new_entity_id(),
            objective_id: objective_id.into(),
            name: name.into(),
            target,
            manual_current: 0.0,
            unit: String::new(),
            linked_plan_ids: Vec::new(),
        }
    }

    pub fn is_linked(&self) -> bool {
        !self.linked_plan_ids.is_empty()
    }

    /// Adds `plan_id` to the links; returns `false` if already linked.
    pub fn link_plan(&mut self, plan_id: &str) -> bool {
        if self.linked_plan_ids.iter().any(|id| id == plan_id) {
            return false;
        }
        self.linked_plan_ids.push(plan_id.to_string());
        true
    }

    /// Removes `plan_id` from the links; returns `false` if it was absent.
    pub fn unlink_plan(&mut self, plan_id: &str) -> bool {
        let before = self.linked_plan_ids.len();
        self.linked_plan_ids.retain(|id| id != plan_id);
        before != self.linked_plan_ids.len()
    }
}
