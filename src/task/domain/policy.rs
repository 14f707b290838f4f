//! Admission and status-update policies for task services.

use serde::{Deserialize, Serialize};

/// Default number of active tasks one employee may hold.
pub const DEFAULT_ACTIVE_TASK_CAP: u64 = 5;

/// How the active-task cap is enforced when a task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapacityEnforcement {
    /// Count and insert run as one atomic store operation, so concurrent
    /// creates can never exceed the cap.
    #[default]
    Strict,
    /// Count first, then insert. Concurrent creates for the same employee
    /// may overshoot the cap.
    Soft,
}

/// Policy applied by the task assignment service.
///
/// # Examples
///
/// ```
/// use foreman::task::domain::{AssignmentPolicy, CapacityEnforcement};
///
/// let policy = AssignmentPolicy::default();
/// assert_eq!(policy.active_task_cap, 5);
/// assert_eq!(policy.enforcement, CapacityEnforcement::Strict);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentPolicy {
    /// Maximum number of active tasks per employee.
    pub active_task_cap: u64,
    /// Cap enforcement mode.
    pub enforcement: CapacityEnforcement,
}

impl Default for AssignmentPolicy {
    fn default() -> Self {
        Self {
            active_task_cap: DEFAULT_ACTIVE_TASK_CAP,
            enforcement: CapacityEnforcement::Strict,
        }
    }
}

/// Rules applied when an assignee changes a task's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusUpdatePolicy {
    /// Only pending, in-progress and completed may be set, and overdue tasks
    /// are frozen.
    #[default]
    Guarded,
    /// Any known status is applied as requested.
    Unrestricted,
}
