//! Evaluation notes and objective journal.
//!
//! # Responsibility
//! - Define evaluation periods and the persisted note key format.
//! - Define journal entries owned by objectives.
//!
//! # Invariants
//! - Note keys are `<objectiveId>_<period>`; objective ids may themselves
//!   contain `_`, so parsing splits on the last separator.
//! - Note values are kept within `0..=10`; absence reads as 0.

use crate::model::common::{new_entity_id, EntityId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

pub const NOTE_MIN: f64 = 0.0;
pub const NOTE_MAX: f64 = 10.0;

/// Half-year evaluation window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Period {
    FirstHalf,
    SecondHalf,
}

impl Period {
    pub const ALL: [Period; 2] = [Self::FirstHalf, Self::SecondHalf];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstHalf => "firstHalf",
            Self::SecondHalf => "secondHalf",
        }
    }

    pub fn parse(value: &str) -> Option<Period> {
        match value {
            "firstHalf" => Some(Self::FirstHalf),
            "secondHalf" => Some(Self::SecondHalf),
            _ => None,
        }
    }
}

/// Key of one evaluation note.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteKey {
    pub objective_id: String,
    pub period: Period,
}

impl NoteKey {
    pub fn new(objective_id: impl Into<String>, period: Period) -> Self {
        Self {
            objective_id: objective_id.into(),
            period,
        }
    }

    /// Formats the key used in the persisted `notes` map.
    pub fn storage_key(&self) -> String {
        format!("{}_{}", self.objective_id, self.period.as_str())
    }

    /// Parses a persisted key; returns `None` for foreign formats.
    pub fn parse(value: &str) -> Option<NoteKey> {
        let (objective_id, period) = value.rsplit_once('_')?;
        if objective_id.is_empty() {
            return None;
        }
        Some(Self::new(objective_id, Period::parse(period)?))
    }
}

/// Clamps a note into `0..=10`; `NaN` maps to 0.
pub fn clamp_note(value: f64) -> f64 {
    if value.is_nan() {
        return NOTE_MIN;
    }
    value.clamp(NOTE_MIN, NOTE_MAX)
}

/// Reads one note from a persisted notes map; absent keys read as 0.
pub fn note_value(notes: &BTreeMap<String, f64>, objective_id: &str, period: Period) -> f64 {
    let key = NoteKey::new(objective_id, period).storage_key();
    notes.get(&key).copied().unwrap_or(NOTE_MIN)
}

/// Free-text log line attached to an objective.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    pub id: EntityId,
    pub text: String,
    /// Unix epoch milliseconds.
    pub timestamp: i64,
}

impl JournalEntry {
    /// Creates an entry stamped with the current wall-clock time.
    pub fn new(text: impl Into<String>) -> Self {
        Self::at(text, now_epoch_ms())
    }

    pub fn at(text: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: new_entity_id(),
            text: text.into(),
            timestamp,
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
