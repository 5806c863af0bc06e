//! Tracking controller and mutation API.
//!
//! # Responsibility
//! - Own the live `Store` and its persistence port.
//! - Apply every change to an isolated copy, then commit and persist it.
//! - Expose the plan/task/KPI/note/journal commands.
//!
//! # Invariants
//! - The live store is replaced only after a transform finished without
//!   error; a failing or panicking transform leaves it untouched.
//! - Persistence is best-effort: a failed write is logged and the committed
//!   in-memory state stays authoritative.
//! - Every commit re-derives all plan statuses before persisting, so saved
//!   plans always carry the status derived from their fields.
//! - Task status moves are unrestricted; no adjacency rule is enforced.

use crate::model::common::EntityId;
use crate::model::evaluation::{clamp_note, JournalEntry, NoteKey, Period};
use crate::model::kpi::Kpi;
use crate::model::plan::Plan;
use crate::model::task::{Task, TaskStatus};
use crate::service::edit::EditPayload;
use crate::store::{load_store, save_store, DocumentPort, Store};
use log::{debug, error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub type TrackerResult<T> = Result<T, TrackerError>;

/// Command rejection. The store is unchanged whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerError {
    NotFound { kind: &'static str, id: String },
}

impl TrackerError {
    fn not_found(kind: &'static str, id: &str) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

impl Display for TrackerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} not found: {id}"),
        }
    }
}

impl Error for TrackerError {}

/// Single owner of the tracking store.
pub struct Tracker<P: DocumentPort> {
    port: P,
    store: Store,
}

impl<P: DocumentPort> Tracker<P> {
    /// Loads the store through `port`; unreadable documents start empty.
    pub fn open(port: P) -> Self {
        let store = load_store(&port);
        Self::with_store(port, store)
    }

    /// Wraps an already materialized store without reading the port.
    ///
    /// Stale plan statuses are re-derived in memory; nothing is written
    /// until the first command.
    pub fn with_store(port: P, mut store: Store) -> Self {
        store.refresh_plan_statuses();
        Self { port, store }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Applies `transform` to a copy of the store, commits and persists it.
    pub fn mutate<F>(&mut self, transform: F) -> &Store
    where
        F: FnOnce(&mut Store),
    {
        let mut draft = self.store.clone();
        transform(&mut draft);
        self.commit("mutate", draft)
    }

    /// Fallible `mutate`: on `Err` nothing is committed or persisted.
    pub fn try_mutate<F, E>(&mut self, transform: F) -> Result<&Store, E>
    where
        F: FnOnce(&mut Store) -> Result<(), E>,
    {
        let mut draft = self.store.clone();
        transform(&mut draft)?;
        Ok(self.commit("try_mutate", draft))
    }

    /// Inserts or replaces a plan; its stored status is re-derived on commit.
    pub fn upsert_plan(&mut self, plan: Plan) -> EntityId {
        let id = plan.id.clone();
        self.store_infallible("upsert_plan", |store| {
            store.plans.insert(plan.id.clone(), plan);
        });
        id
    }

    /// Deletes a plan and every task referencing it.
    ///
    /// Returns the number of cascaded task deletions.
    pub fn delete_plan(&mut self, plan_id: &str) -> TrackerResult<usize> {
        let mut cascaded = 0;
        self.command("delete_plan", |store| {
            store
                .plans
                .remove(plan_id)
                .ok_or_else(|| TrackerError::not_found("plan", plan_id))?;
            let before = store.tasks.len();
            store.tasks.retain(|_, task| task.plan_id != plan_id);
            cascaded = before - store.tasks.len();
            Ok(())
        })?;
        debug!(
            "event=plan_cascade module=tracker status=ok removed_tasks={}",
            cascaded
        );
        Ok(cascaded)
    }

    pub fn upsert_task(&mut self, task: Task) -> EntityId {
        let id = task.id.clone();
        self.store_infallible("upsert_task", |store| {
            store.tasks.insert(task.id.clone(), task);
        });
        id
    }

    pub fn delete_task(&mut self, task_id: &str) -> TrackerResult<()> {
        self.command("delete_task", |store| {
            store
                .tasks
                .remove(task_id)
                .map(|_| ())
                .ok_or_else(|| TrackerError::not_found("task", task_id))
        })
    }

    pub fn upsert_kpi(&mut self, kpi: Kpi) -> EntityId {
        let id = kpi.id.clone();
        self.store_infallible("upsert_kpi", |store| {
            store.kpis.insert(kpi.id.clone(), kpi);
        });
        id
    }

    pub fn delete_kpi(&mut self, kpi_id: &str) -> TrackerResult<()> {
        self.command("delete_kpi", |store| {
            store
                .kpis
                .remove(kpi_id)
                .map(|_| ())
                .ok_or_else(|| TrackerError::not_found("kpi", kpi_id))
        })
    }

    /// Upserts an evaluation note clamped to `0..=10`; returns the stored value.
    pub fn set_note(&mut self, objective_id: &str, period: Period, value: f64) -> f64 {
        let clamped = clamp_note(value);
        let key = NoteKey::new(objective_id, period).storage_key();
        self.store_infallible("set_note", |store| {
            store.notes.insert(key, clamped);
        });
        clamped
    }

    /// Appends a journal entry stamped now; returns its id.
    pub fn add_journal_entry(&mut self, objective_id: &str, text: &str) -> EntityId {
        self.push_journal_entry(objective_id, JournalEntry::new(text))
    }

    /// Appends a pre-built journal entry (imports, fixed clocks in tests).
    pub fn push_journal_entry(&mut self, objective_id: &str, entry: JournalEntry) -> EntityId {
        let id = entry.id.clone();
        self.store_infallible("add_journal_entry", |store| {
            store
                .journal
                .entry(objective_id.to_string())
                .or_default()
                .push(entry);
        });
        id
    }

    pub fn delete_journal_entry(
        &mut self,
        objective_id: &str,
        entry_id: &str,
    ) -> TrackerResult<()> {
        self.command("delete_journal_entry", |store| {
            let entries = store
                .journal
                .get_mut(objective_id)
                .ok_or_else(|| TrackerError::not_found("journal", objective_id))?;
            let before = entries.len();
            entries.retain(|entry| entry.id != entry_id);
            if entries.len() == before {
                return Err(TrackerError::not_found("journal_entry", entry_id));
            }
            if entries.is_empty() {
                store.journal.remove(objective_id);
            }
            Ok(())
        })
    }

    /// Sets a task status directly; any of the four states is accepted.
    pub fn move_task(&mut self, task_id: &str, status: TaskStatus) -> TrackerResult<()> {
        self.command("move_task", |store| {
            let task = store
                .tasks
                .get_mut(task_id)
                .ok_or_else(|| TrackerError::not_found("task", task_id))?;
            task.status = status;
            Ok(())
        })
    }

    /// Toggles a plan sub-item; progress is forced to 100 or 0.
    pub fn toggle_sub_item(
        &mut self,
        plan_id: &str,
        sub_item_id: &str,
        done: bool,
    ) -> TrackerResult<()> {
        self.edit_plan("toggle_sub_item", plan_id, |plan| {
            plan.sub_item_mut(sub_item_id)
                .ok_or_else(|| TrackerError::not_found("sub_item", sub_item_id))?
                .set_done(done);
            Ok(())
        })
    }

    /// Sets sub-item progress (clamped to `0..=100`) without touching `done`.
    pub fn set_sub_item_progress(
        &mut self,
        plan_id: &str,
        sub_item_id: &str,
        percent: f64,
    ) -> TrackerResult<()> {
        self.edit_plan("set_sub_item_progress", plan_id, |plan| {
            plan.sub_item_mut(sub_item_id)
                .ok_or_else(|| TrackerError::not_found("sub_item", sub_item_id))?
                .set_progress(percent);
            Ok(())
        })
    }

    pub fn toggle_deliverable(
        &mut self,
        plan_id: &str,
        deliverable_id: &str,
        done: bool,
    ) -> TrackerResult<()> {
        self.edit_plan("toggle_deliverable", plan_id, |plan| {
            plan.deliverable_mut(deliverable_id)
                .ok_or_else(|| TrackerError::not_found("deliverable", deliverable_id))?
                .done = done;
            Ok(())
        })
    }

    pub fn toggle_subtask(
        &mut self,
        task_id: &str,
        subtask_id: &str,
        done: bool,
    ) -> TrackerResult<()> {
        self.command("toggle_subtask", |store| {
            store
                .tasks
                .get_mut(task_id)
                .ok_or_else(|| TrackerError::not_found("task", task_id))?
                .subtask_mut(subtask_id)
                .ok_or_else(|| TrackerError::not_found("subtask", subtask_id))?
                .done = done;
            Ok(())
        })
    }

    /// Links a plan to a KPI. Dangling plan ids are accepted and ignored by
    /// the resolver.
    pub fn link_plan_to_kpi(&mut self, kpi_id: &str, plan_id: &str) -> TrackerResult<()> {
        self.command("link_plan_to_kpi", |store| {
            store
                .kpis
                .get_mut(kpi_id)
                .ok_or_else(|| TrackerError::not_found("kpi", kpi_id))?
                .link_plan(plan_id);
            Ok(())
        })
    }

    pub fn unlink_plan_from_kpi(&mut self, kpi_id: &str, plan_id: &str) -> TrackerResult<()> {
        self.command("unlink_plan_from_kpi", |store| {
            let kpi = store
                .kpis
                .get_mut(kpi_id)
                .ok_or_else(|| TrackerError::not_found("kpi", kpi_id))?;
            if !kpi.unlink_plan(plan_id) {
                return Err(TrackerError::not_found("kpi_link", plan_id));
            }
            Ok(())
        })
    }

    /// Saves whatever an editor dialog submitted; returns the entity id.
    pub fn submit_edit(&mut self, payload: EditPayload) -> EntityId {
        debug!(
            "event=submit_edit module=tracker status=start kind={}",
            payload.kind()
        );
        match payload {
            EditPayload::Task(task) => self.upsert_task(task),
            EditPayload::Plan(plan) => self.upsert_plan(plan),
            EditPayload::Kpi(form) => self.upsert_kpi(form.into_kpi()),
        }
    }

    fn edit_plan<F>(&mut self, command: &'static str, plan_id: &str, edit: F) -> TrackerResult<()>
    where
        F: FnOnce(&mut Plan) -> TrackerResult<()>,
    {
        self.command(command, |store| {
            let plan = store
                .plans
                .get_mut(plan_id)
                .ok_or_else(|| TrackerError::not_found("plan", plan_id))?;
            edit(plan)
        })
    }

    fn store_infallible<F>(&mut self, command: &'static str, transform: F)
    where
        F: FnOnce(&mut Store),
    {
        let mut draft = self.store.clone();
        transform(&mut draft);
        self.commit(command, draft);
    }

    fn command<F>(&mut self, command: &'static str, transform: F) -> TrackerResult<()>
    where
        F: FnOnce(&mut Store) -> TrackerResult<()>,
    {
        let mut draft = self.store.clone();
        if let Err(err) = transform(&mut draft) {
            debug!(
                "event=command module=tracker status=skipped command={} reason={}",
                command, err
            );
            return Err(err);
        }
        self.commit(command, draft);
        Ok(())
    }

    fn commit(&mut self, command: &'static str, mut next: Store) -> &Store {
        next.refresh_plan_statuses();
        self.store = next;

        let started_at = Instant::now();
        match save_store(&self.port, &self.store) {
            Ok(()) => info!(
                "event=store_commit module=tracker status=ok command={} port={} duration_ms={}",
                command,
                self.port.kind(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=store_commit module=tracker status=error command={} port={} duration_ms={} error_code=persist_failed error={}",
                command,
                self.port.kind(),
                started_at.elapsed().as_millis(),
                err
            ),
        }
        &self.store
    }
}
