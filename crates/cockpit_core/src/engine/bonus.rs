//! Weighted bonus computation.
//!
//! # Invariants
//! - Each note is clamped to `0..=10` before weighting.
//! - With category weights summing to 100, a category bonus lies in `0..=10`.
//! - The organization-level component is decided outside this engine and is
//!   always reported as unavailable.

use crate::catalog::{objectives_in, Objective, ObjectiveCategory};
use crate::model::evaluation::{clamp_note, note_value, Period, NOTE_MAX};
use serde::Serialize;
use std::collections::BTreeMap;

/// Bonus split of one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BonusBreakdown {
    pub period: Period,
    pub personal: f64,
    pub project: f64,
    /// Not computed here; `None` means "external decision".
    pub organization: Option<f64>,
    /// `personal + project`.
    pub total: f64,
}

/// `Σ (note/10) * (weight/100) * 10` over `objectives` for `period`.
pub fn category_bonus<'a, I>(objectives: I, period: Period, notes: &BTreeMap<String, f64>) -> f64
where
    I: IntoIterator<Item = &'a Objective>,
{
    objectives
        .into_iter()
        .map(|objective| {
            let note = clamp_note(note_value(notes, objective.id, period));
            (note / NOTE_MAX) * (objective.weight_percent / 100.0) * 10.0
        })
        .sum()
}

/// Personal + project bonus of the built-in catalog for `period`.
pub fn total_bonus(period: Period, notes: &BTreeMap<String, f64>) -> BonusBreakdown {
    let personal = category_bonus(objectives_in(ObjectiveCategory::Personal), period, notes);
    let project = category_bonus(objectives_in(ObjectiveCategory::Project), period, notes);
    BonusBreakdown {
        period,
        personal,
        project,
        organization: None,
        total: personal + project,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::BusinessUnit;

    #[test]
    fn out_of_range_notes_are_clamped() {
        let objective = Objective {
            id: "solo",
            name: "Solo",
            organizational_unit: BusinessUnit::Group,
            weight_percent: 100.0,
            category: ObjectiveCategory::Personal,
        };
        let mut notes = BTreeMap::new();
        notes.insert("solo_firstHalf".to_string(), 14.0);
        notes.insert("solo_secondHalf".to_string(), -3.0);

        assert!((category_bonus([&objective], Period::FirstHalf, &notes) - 10.0).abs() < 1e-9);
        assert_eq!(category_bonus([&objective], Period::SecondHalf, &notes), 0.0);
    }

    #[test]
    fn organization_component_is_never_computed() {
        let breakdown = total_bonus(Period::FirstHalf, &BTreeMap::new());
        assert_eq!(breakdown.organization, None);
        assert_eq!(breakdown.total, 0.0);
    }
}
