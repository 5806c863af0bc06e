//! Task model.
//!
//! # Responsibility
//! - Define tasks and their informational subtasks.
//! - Provide ordered status helpers for step-wise board moves.
//!
//! # Invariants
//! - Subtasks never feed `Task::status`.
//! - The command layer accepts any status jump; `TaskStatus::step` is only a
//!   helper for callers that want ±1 moves.

use crate::model::common::{new_entity_id, EntityId, Priority};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered task lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    InReview,
    Done,
}

impl TaskStatus {
    /// All states in board order.
    pub const ALL: [TaskStatus; 4] = [
        Self::Todo,
        Self::InProgress,
        Self::InReview,
        Self::Done,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in_progress",
            Self::InReview => "in_review",
            Self::Done => "done",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Todo => 0,
            Self::InProgress => 1,
            Self::InReview => 2,
            Self::Done => 3,
        }
    }

    /// Moves one column forward (`forward = true`) or back.
    ///
    /// Returns `None` at either end of the board.
    pub fn step(self, forward: bool) -> Option<TaskStatus> {
        let index = self.index();
        let target = if forward {
            index.checked_add(1)?
        } else {
            index.checked_sub(1)?
        };
        Self::ALL.get(target).copied()
    }
}

/// Informational checklist item of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: EntityId,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

impl Subtask {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            title: title.into(),
            done: false,
        }
    }
}

/// Unit of work under a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: EntityId,
    pub plan_id: EntityId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Task {
    /// Creates a `todo` task with a generated id under `plan_id`.
    pub fn new(plan_id: impl Into<EntityId>, title: impl Into<String>) -> Self {
        Self {
            id: new_entity_id(),
            plan_id: plan_id.into(),
            title: title.into(),
            description: None,
            priority: Priority::default(),
            status: TaskStatus::Todo,
            start_date: None,
            deadline: None,
            subtasks: Vec::new(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.status == TaskStatus::Done
    }

    pub fn subtask_mut(&mut self, subtask_id: &str) -> Option<&mut Subtask> {
        self.subtasks
            .iter_mut()
            .find(|subtask| subtask.id == subtask_id)
    }
}
