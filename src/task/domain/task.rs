//! Task aggregate root.

use super::{TaskDomainError, TaskId, TaskPriority, TaskStatus, TaskTitle};
use crate::directory::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    deadline: DateTime<Utc>,
    assigned_to: UserId,
    assigned_by: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for assigning a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    /// Task title.
    pub title: TaskTitle,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Task priority.
    pub priority: TaskPriority,
    /// Completion deadline.
    pub deadline: DateTime<Utc>,
    /// Employee the task is assigned to.
    pub assigned_to: UserId,
    /// Manager assigning the task.
    pub assigned_by: UserId,
}

/// Parameter object for reconstructing a persisted task aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: TaskTitle,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted deadline.
    pub deadline: DateTime<Utc>,
    /// Persisted assignee.
    pub assigned_to: UserId,
    /// Persisted assigner.
    pub assigned_by: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new pending task.
    #[must_use]
    pub fn assign(new_task: NewTask, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: new_task.title,
            description: new_task.description,
            priority: new_task.priority,
            status: TaskStatus::Pending,
            deadline: new_task.deadline,
            assigned_to: new_task.assigned_to,
            assigned_by: new_task.assigned_by,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            priority: data.priority,
            status: data.status,
            deadline: data.deadline,
            assigned_to: data.assigned_to,
            assigned_by: data.assigned_by,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the task title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the task priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the task status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the completion deadline.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assigned_to(&self) -> UserId {
        self.assigned_to
    }

    /// Returns the assigning manager.
    #[must_use]
    pub const fn assigned_by(&self) -> UserId {
        self.assigned_by
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns `true` while the task counts towards capacity and workload.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Returns `true` when `user_id` is the assignee.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: UserId) -> bool {
        self.assigned_to == user_id
    }

    /// Returns `true` when the deadline is strictly before `now`.
    #[must_use]
    pub fn is_past_deadline(&self, now: DateTime<Utc>) -> bool {
        self.deadline < now
    }

    /// Returns `true` when the task is active and its deadline is strictly
    /// before `now`.
    #[must_use]
    pub fn is_due_for_sweep(&self, now: DateTime<Utc>) -> bool {
        self.is_active() && self.is_past_deadline(now)
    }

    /// Moves an active task past its deadline to
    /// [`TaskStatus::Overdue`], stamping `now` as the update time.
    ///
    /// Returns `true` when the status changed. Completed and overdue tasks,
    /// and tasks still within their deadline, are left untouched.
    pub fn mark_overdue_if_due(&mut self, now: DateTime<Utc>) -> bool {
        if !self.is_due_for_sweep(now) {
            return false;
        }
        self.status = TaskStatus::Overdue;
        self.updated_at = now;
        true
    }

    /// Applies an assignee-requested status change under the guarded rules.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidTransition`] when the task is
    /// overdue or the target is [`TaskStatus::Overdue`].
    pub fn transition_to(
        &mut self,
        target: TaskStatus,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if !self.status.can_assignee_transition_to(target) {
            return Err(TaskDomainError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                to: target,
            });
        }
        self.set_status(target, clock);
        Ok(())
    }

    /// Sets the status without transition checks.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        self.status = status;
        self.updated_at = clock.utc();
    }
}
