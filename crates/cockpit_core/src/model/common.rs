//! Identifiers and small value types shared by every tracking entity.

use crate::input::parse_numeric_input;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier of a plan, task, KPI, sub-item or journal entry.
///
/// Kept as a plain string because persisted documents carry ids produced by
/// earlier tooling, not only UUIDs.
pub type EntityId = String;

/// Generates a fresh unique entity id (UUIDv4, hyphenated).
pub fn new_entity_id() -> EntityId {
    Uuid::new_v4().to_string()
}

/// Priority shared by plans and tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    #[default]
    Medium,
    Low,
}

/// Clamps an arbitrary percentage into `0..=100`.
///
/// `NaN` maps to 0.
pub fn clamp_percent(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PercentInput {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

/// Reads a stored percentage leniently.
///
/// Fractional or out-of-range numbers are clamped, numeric text is parsed,
/// and any other value reads as 0, so one malformed field never rejects
/// the whole document.
pub(crate) fn deserialize_percent<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match PercentInput::deserialize(deserializer)? {
        PercentInput::Number(value) => clamp_percent(value),
        PercentInput::Text(text) => clamp_percent(parse_numeric_input(&text)),
        PercentInput::Other(_) => 0,
    })
}
