//! Error taxonomy shared by the task services.

use crate::directory::{
    domain::{Role, UserId},
    ports::UserDirectoryError,
};
use crate::identity::Caller;
use crate::task::{
    domain::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError, TaskId},
    ports::TaskStoreError,
};
use thiserror::Error;
use tracing::warn;

/// Service-level errors for task assignment and lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The caller's role does not permit the operation.
    #[error("{role} may not {operation}")]
    PermissionDenied {
        /// Role of the rejected caller.
        role: Role,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// The target user is missing, not an employee, or reports to another
    /// manager.
    #[error("user {0} is not an employee reporting to the caller")]
    InvalidAssignee(UserId),

    /// The assignee already holds the maximum number of active tasks.
    #[error("assignee {assignee} already has {active} active tasks (cap {cap})")]
    CapacityExceeded {
        /// Employee at capacity.
        assignee: UserId,
        /// Active tasks currently held.
        active: u64,
        /// Cap that was applied.
        cap: u64,
    },

    /// The task does not exist or is not owned by the caller.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The priority string is not recognised.
    #[error(transparent)]
    InvalidPriority(#[from] ParseTaskPriorityError),

    /// The status string is not recognised.
    #[error(transparent)]
    InvalidStatus(#[from] ParseTaskStatusError),

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// The task store failed.
    #[error("task store unavailable: {0}")]
    StoreUnavailable(#[source] TaskStoreError),

    /// The user directory failed.
    #[error("user directory unavailable: {0}")]
    DirectoryUnavailable(#[from] UserDirectoryError),
}

impl From<TaskStoreError> for TaskServiceError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::NotFound(task_id) => Self::NotFound(task_id),
            TaskStoreError::CapacityExceeded {
                assignee,
                active,
                cap,
            } => Self::CapacityExceeded {
                assignee,
                active,
                cap,
            },
            other => Self::StoreUnavailable(other),
        }
    }
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Rejects `caller` unless it holds `role`.
pub(super) fn require_role(
    caller: Caller,
    role: Role,
    operation: &'static str,
) -> TaskServiceResult<()> {
    if caller.has_role(role) {
        return Ok(());
    }
    warn!(
        caller = %caller.user_id(),
        role = %caller.role(),
        operation,
        "task request denied"
    );
    Err(TaskServiceError::PermissionDenied {
        role: caller.role(),
        operation,
    })
}
