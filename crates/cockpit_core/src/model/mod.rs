//! Tracking domain model: plans, tasks, KPIs, evaluation notes and journal.
//!
//! # Responsibility
//! - Define the canonical records persisted in the tracking document.
//! - Keep derived values (effective progress, plan status) next to the
//!   fields they are derived from.
//!
//! # Invariants
//! - Entities reference each other by id only; no embedded ownership.
//! - Plan status and task status are distinct, non-interchangeable enums.

pub mod common;
pub mod evaluation;
pub mod kpi;
pub mod plan;
pub mod task;
