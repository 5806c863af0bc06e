//! Static objective catalog.
//!
//! # Responsibility
//! - Declare the fixed, weighted objectives that every evaluation refers to.
//! - Offer lookup helpers by id and by category.
//!
//! # Invariants
//! - Within each `ObjectiveCategory`, `weight_percent` values sum to 100.
//! - Objective ids are unique across the whole catalog.
//! - The catalog is configuration: never created, edited or deleted at
//!   runtime, never persisted.

use serde::Serialize;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Tolerance used when checking that category weights sum to 100.
const WEIGHT_SUM_EPSILON: f64 = 1e-9;

/// Evaluation family an objective belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveCategory {
    /// Individual behaviour and skills.
    Personal,
    /// Delivery outcomes on business projects.
    Project,
}

impl ObjectiveCategory {
    pub const ALL: [ObjectiveCategory; 2] = [Self::Personal, Self::Project];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Project => "project",
        }
    }
}

/// Business unit an objective is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BusinessUnit {
    Group,
    Engineering,
    Operations,
    Commercial,
}

/// One weighted objective of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Objective {
    pub id: &'static str,
    pub name: &'static str,
    pub organizational_unit: BusinessUnit,
    pub weight_percent: f64,
    pub category: ObjectiveCategory,
}

const OBJECTIVES: &[Objective] = &[
    Objective {
        id: "personal-leadership",
        name: "Leadership and team development",
        organizational_unit: BusinessUnit::Group,
        weight_percent: 30.0,
        category: ObjectiveCategory::Personal,
    },
    Objective {
        id: "personal-communication",
        name: "Communication and reporting",
        organizational_unit: BusinessUnit::Group,
        weight_percent: 25.0,
        category: ObjectiveCategory::Personal,
    },
    Objective {
        id: "personal-autonomy",
        name: "Autonomy and decision making",
        organizational_unit: BusinessUnit::Group,
        weight_percent: 25.0,
        category: ObjectiveCategory::Personal,
    },
    Objective {
        id: "personal-collaboration",
        name: "Cross-team collaboration",
        organizational_unit: BusinessUnit::Group,
        weight_percent: 20.0,
        category: ObjectiveCategory::Personal,
    },
    Objective {
        id: "project-platform",
        name: "Platform modernisation",
        organizational_unit: BusinessUnit::Engineering,
        weight_percent: 40.0,
        category: ObjectiveCategory::Project,
    },
    Objective {
        id: "project-operations",
        name: "Operational excellence",
        organizational_unit: BusinessUnit::Operations,
        weight_percent: 20.0,
        category: ObjectiveCategory::Project,
    },
    Objective {
        id: "project-quality",
        name: "Service quality programme",
        organizational_unit: BusinessUnit::Operations,
        weight_percent: 20.0,
        category: ObjectiveCategory::Project,
    },
    Objective {
        id: "project-growth",
        name: "Commercial growth",
        organizational_unit: BusinessUnit::Commercial,
        weight_percent: 20.0,
        category: ObjectiveCategory::Project,
    },
];

/// Returns the full static catalog.
pub fn objectives() -> &'static [Objective] {
    OBJECTIVES
}

/// Looks up one objective by id.
pub fn objective(id: &str) -> Option<&'static Objective> {
    OBJECTIVES.iter().find(|objective| objective.id == id)
}

/// Returns the objectives of one category, in catalog order.
pub fn objectives_in(category: ObjectiveCategory) -> Vec<&'static Objective> {
    OBJECTIVES
        .iter()
        .filter(|objective| objective.category == category)
        .collect()
}

/// Catalog consistency violation.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    WeightSum {
        category: ObjectiveCategory,
        total: f64,
    },
    DuplicateId(&'static str),
}

impl Display for CatalogError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WeightSum { category, total } => write!(
                f,
                "{} objective weights sum to {total}, expected 100",
                category.as_str()
            ),
            Self::DuplicateId(id) => write!(f, "duplicate objective id `{id}`"),
        }
    }
}

impl Error for CatalogError {}

/// Checks the built-in catalog invariants.
pub fn validate_catalog() -> Result<(), Vec<CatalogError>> {
    validate_objectives(OBJECTIVES)
}

/// Checks weight sums per category and id uniqueness for any objective set.
///
/// Returns every violation found, not only the first one.
pub fn validate_objectives(objectives: &[Objective]) -> Result<(), Vec<CatalogError>> {
    let mut errors = Vec::new();

    let mut seen = BTreeSet::new();
    for objective in objectives {
        if !seen.insert(objective.id) {
            errors.push(CatalogError::DuplicateId(objective.id));
        }
    }

    for category in ObjectiveCategory::ALL {
        let total: f64 = objectives
            .iter()
            .filter(|objective| objective.category == category)
            .map(|objective| objective.weight_percent)
            .sum();
        if (total - 100.0).abs() > WEIGHT_SUM_EPSILON {
            errors.push(CatalogError::WeightSum { category, total });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_is_consistent() {
        assert_eq!(validate_catalog(), Ok(()));
    }

    #[test]
    fn lookup_by_id_and_category() {
        let found = objective("project-platform").expect("objective should exist");
        assert_eq!(found.category, ObjectiveCategory::Project);
        assert!(objective("missing").is_none());
        assert_eq!(objectives_in(ObjectiveCategory::Personal).len(), 4);
    }

    #[test]
    fn validation_reports_every_violation() {
        let broken = [
            Objective {
                id: "a",
                name: "A",
                organizational_unit: BusinessUnit::Group,
                weight_percent: 60.0,
                category: ObjectiveCategory::Personal,
            },
            Objective {
                id: "a",
                name: "A again",
                organizational_unit: BusinessUnit::Group,
                weight_percent: 100.0,
                category: ObjectiveCategory::Project,
            },
        ];

        let errors = validate_objectives(&broken).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(&CatalogError::DuplicateId("a")));
        assert!(matches!(
            errors[1],
            CatalogError::WeightSum {
                category: ObjectiveCategory::Personal,
                ..
            }
        ));
    }
}
