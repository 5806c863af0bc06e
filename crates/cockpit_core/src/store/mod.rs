//! Normalized tracking store and its persisted document form.
//!
//! # Responsibility
//! - Hold the five id-keyed maps (plans, tasks, kpis, notes, journal).
//! - Convert between the in-memory store and the single JSON document.
//! - Load the store through a `DocumentPort`, degrading to empty on failure.
//!
//! # Invariants
//! - `load_store` never returns an error: absent or unparsable documents
//!   yield `Store::default()`.
//! - The document carries no version field; shape changes need an external
//!   migration.

use crate::model::common::EntityId;
use crate::model::evaluation::{note_value, JournalEntry, Period};
use crate::model::kpi::Kpi;
use crate::model::plan::Plan;
use crate::model::task::Task;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod file;
pub mod memory;
pub mod port;
pub mod sqlite;

pub use file::JsonFilePort;
pub use memory::MemoryPort;
pub use port::{DocumentPort, PersistError, PersistResult};
pub use sqlite::SqlitePort;

/// Root aggregate of all mutable tracking data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Store {
    #[serde(default)]
    pub plans: BTreeMap<EntityId, Plan>,
    #[serde(default)]
    pub tasks: BTreeMap<EntityId, Task>,
    #[serde(default)]
    pub kpis: BTreeMap<EntityId, Kpi>,
    /// Keyed by `NoteKey::storage_key()`.
    #[serde(default)]
    pub notes: BTreeMap<String, f64>,
    /// Keyed by objective id.
    #[serde(default)]
    pub journal: BTreeMap<String, Vec<JournalEntry>>,
}

impl Store {
    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
            && self.tasks.is_empty()
            && self.kpis.is_empty()
            && self.notes.is_empty()
            && self.journal.is_empty()
    }

    /// Evaluation note for one objective and period; 0 when absent.
    pub fn note(&self, objective_id: &str, period: Period) -> f64 {
        note_value(&self.notes, objective_id, period)
    }

    pub fn plans_for_objective<'a>(
        &'a self,
        objective_id: &'a str,
    ) -> impl Iterator<Item = &'a Plan> + 'a {
        self.plans
            .values()
            .filter(move |plan| plan.objective_id == objective_id)
    }

    pub fn tasks_for_plan<'a>(&'a self, plan_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.values().filter(move |task| task.plan_id == plan_id)
    }

    pub fn kpis_for_objective<'a>(
        &'a self,
        objective_id: &'a str,
    ) -> impl Iterator<Item = &'a Kpi> + 'a {
        self.kpis
            .values()
            .filter(move |kpi| kpi.objective_id == objective_id)
    }

    /// Journal of one objective, oldest first; empty when none.
    pub fn journal_for(&self, objective_id: &str) -> &[JournalEntry] {
        self.journal
            .get(objective_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Overwrites every stored plan status with the derived one.
    pub fn refresh_plan_statuses(&mut self) {
        for plan in self.plans.values_mut() {
            plan.refresh_status();
        }
    }

    /// Serializes the store into the persisted document form.
    pub fn to_document(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parses a persisted document.
    pub fn from_document(document: &str) -> Result<Store, serde_json::Error> {
        serde_json::from_str(document)
    }
}

/// Reads the store through `port`, falling back to an empty store.
///
/// # Side effects
/// - Emits one `store_load` event; failures are logged at `warn`, never
///   returned.
pub fn load_store<P: DocumentPort + ?Sized>(port: &P) -> Store {
    let document = match port.read() {
        Ok(Some(document)) => document,
        Ok(None) => {
            info!(
                "event=store_load module=store status=ok port={} result=absent",
                port.kind()
            );
            return Store::default();
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=error port={} error_code=read_failed error={}",
                port.kind(),
                err
            );
            return Store::default();
        }
    };

    match Store::from_document(&document) {
        Ok(store) => {
            debug!(
                "event=store_load module=store status=ok port={} plans={} tasks={} kpis={}",
                port.kind(),
                store.plans.len(),
                store.tasks.len(),
                store.kpis.len()
            );
            store
        }
        Err(err) => {
            warn!(
                "event=store_load module=store status=error port={} error_code=parse_failed error={}",
                port.kind(),
                err
            );
            Store::default()
        }
    }
}

/// Serializes `store` and writes it through `port`.
pub fn save_store<P: DocumentPort + ?Sized>(port: &P, store: &Store) -> PersistResult<()> {
    let document = store.to_document()?;
    port.write(&document)
}

#[cfg(test)]
mod tests {
    use super::{load_store, Store};
    use crate::model::evaluation::Period;
    use crate::store::MemoryPort;

    #[test]
    fn empty_store_serializes_five_maps() {
        let json = Store::default().to_document().unwrap();
        assert_eq!(
            json,
            r#"{"plans":{},"tasks":{},"kpis":{},"notes":{},"journal":{}}"#
        );
    }

    #[test]
    fn partial_document_fills_missing_maps() {
        let port = MemoryPort::with_document(r#"{"notes":{"project-growth_firstHalf":6}}"#);
        let store = load_store(&port);
        assert_eq!(store.note("project-growth", Period::FirstHalf), 6.0);
        assert_eq!(store.note("project-growth", Period::SecondHalf), 0.0);
        assert!(store.plans.is_empty());
    }

    #[test]
    fn garbage_document_loads_empty_store() {
        let port = MemoryPort::with_document("{not json");
        assert_eq!(load_store(&port), Store::default());
    }
}
