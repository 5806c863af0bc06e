//! Pure tracking computations.
//!
//! # Responsibility
//! - Aggregate progress, derive statuses, resolve KPI values and compute
//!   bonuses from store snapshots.
//!
//! # Invariants
//! - Nothing in this module mutates the store or performs I/O.
//! - Dangling references are filtered out, never raised.

pub mod bonus;
pub mod kpi;
pub mod progress;
pub mod status;
