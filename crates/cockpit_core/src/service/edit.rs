//! Typed payloads submitted by editor dialogs.
//!
//! # Responsibility
//! - Replace untyped key/value dialog payloads with one sum type.
//! - Turn raw KPI form text into a typed `Kpi`.
//!
//! # Invariants
//! - Every payload variant is handled exhaustively by `Tracker::submit_edit`.
//! - Unparsable numeric form text reads as 0.

use crate::input::parse_numeric_input;
use crate::model::common::{new_entity_id, EntityId};
use crate::model::kpi::Kpi;
use crate::model::plan::Plan;
use crate::model::task::Task;

/// What an editor dialog is saving.
#[derive(Debug, Clone, PartialEq)]
pub enum EditPayload {
    Task(Task),
    Plan(Plan),
    Kpi(KpiForm),
}

impl EditPayload {
    /// Entity kind label used in log events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Task(_) => "task",
            Self::Plan(_) => "plan",
            Self::Kpi(_) => "kpi",
        }
    }
}

/// Raw KPI dialog input; numbers arrive as typed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiForm {
    /// `None` creates a new KPI.
    pub id: Option<EntityId>,
    pub objective_id: String,
    pub name: String,
    pub target: String,
    pub current: String,
    pub unit: String,
    pub linked_plan_ids: Vec<EntityId>,
}

impl KpiForm {
    /// Builds the typed KPI, generating an id for new entries.
    pub fn into_kpi(self) -> Kpi {
        Kpi {
            id: self.id.unwrap_or_else(new_entity_id),
            objective_id: self.objective_id,
            name: self.name.trim().to_string(),
            target: parse_numeric_input(&self.target),
            manual_current: parse_numeric_input(&self.current),
            unit: self.unit.trim().to_string(),
            linked_plan_ids: self.linked_plan_ids,
        }
    }
}

impl From<&Kpi> for KpiForm {
    fn from(kpi: &Kpi) -> Self {
        Self {
            id: Some(kpi.id.clone()),
            objective_id: kpi.objective_id.clone(),
            name: kpi.name.clone(),
            target: kpi.target.to_string(),
            current: kpi.manual_current.to_string(),
            unit: kpi.unit.clone(),
            linked_plan_ids: kpi.linked_plan_ids.clone(),
        }
    }
}
