//! Task status state machine.
//!
//! ```text
//! Pending ⇄ InProgress ⇄ Completed      (employee-driven)
//! Pending | InProgress → Overdue        (deadline-driven, terminal)
//! ```

use super::ParseTaskStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Assigned but not started.
    Pending,
    /// Being worked on.
    InProgress,
    /// Finished by the assignee.
    Completed,
    /// Deadline passed before completion.
    Overdue,
}

impl TaskStatus {
    /// Statuses that no longer count towards capacity or workload.
    pub const INACTIVE: [Self; 2] = [Self::Completed, Self::Overdue];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Overdue => "overdue",
        }
    }

    /// Returns `true` for statuses that count as active work.
    #[must_use]
    pub const fn is_active(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress)
    }

    /// Returns `true` when no further status change is modelled.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Overdue)
    }

    /// Returns `true` for statuses an assignee may set directly.
    #[must_use]
    pub const fn is_assignee_settable(self) -> bool {
        matches!(self, Self::Pending | Self::InProgress | Self::Completed)
    }

    /// Returns `true` when an assignee may move a task from `self` to
    /// `target`.
    ///
    /// Any move among pending, in-progress and completed is allowed,
    /// including lateral and backward moves. Overdue can neither be entered
    /// nor left by the assignee.
    #[must_use]
    pub const fn can_assignee_transition_to(self, target: Self) -> bool {
        !self.is_terminal() && target.is_assignee_settable()
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "overdue" => Ok(Self::Overdue),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}
