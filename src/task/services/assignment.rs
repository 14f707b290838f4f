//! Task creation with reporting-line and capacity admission checks.

use super::error::{TaskServiceError, TaskServiceResult, require_role};
use crate::directory::{
    domain::{Role, UserId},
    ports::UserDirectory,
    services::UserLookupService,
};
use crate::identity::Caller;
use crate::task::{
    domain::{AssignmentPolicy, CapacityEnforcement, NewTask, Task, TaskPriority, TaskTitle},
    ports::{TaskStore, TaskStoreError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use tracing::{info, warn};

/// Request payload for assigning a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: String,
    deadline: DateTime<Utc>,
    assigned_to: UserId,
}

impl CreateTaskRequest {
    /// Creates a request with the required task fields.
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        priority: impl Into<String>,
        deadline: DateTime<Utc>,
        assigned_to: UserId,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: priority.into(),
            deadline,
            assigned_to,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Task assignment orchestration service.
///
/// Only managers create tasks, only for employees reporting to them, and
/// never beyond the active-task cap of the [`AssignmentPolicy`].
#[derive(Clone)]
pub struct TaskAssignmentService<T, D, C>
where
    T: TaskStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    store: Arc<T>,
    lookup: UserLookupService<D>,
    clock: Arc<C>,
    policy: AssignmentPolicy,
}

impl<T, D, C> TaskAssignmentService<T, D, C>
where
    T: TaskStore,
    D: UserDirectory,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment service with the default policy.
    #[must_use]
    pub fn new(store: Arc<T>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            lookup: UserLookupService::new(directory),
            clock,
            policy: AssignmentPolicy::default(),
        }
    }

    /// Replaces the assignment policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: AssignmentPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active assignment policy.
    #[must_use]
    pub const fn policy(&self) -> AssignmentPolicy {
        self.policy
    }

    /// Assigns a new pending task on behalf of a manager.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::PermissionDenied`] unless the caller is a
    /// manager, [`TaskServiceError::InvalidPriority`] or
    /// [`TaskServiceError::Domain`] for malformed input,
    /// [`TaskServiceError::InvalidAssignee`] unless the target is an employee
    /// reporting to the caller, [`TaskServiceError::CapacityExceeded`] when
    /// the employee is at the active-task cap, and
    /// [`TaskServiceError::StoreUnavailable`] or
    /// [`TaskServiceError::DirectoryUnavailable`] on persistence failures.
    pub async fn create_task(
        &self,
        caller: Caller,
        request: CreateTaskRequest,
    ) -> TaskServiceResult<Task> {
        require_role(caller, Role::Manager, "create tasks")?;

        let CreateTaskRequest {
            title,
            description,
            priority,
            deadline,
            assigned_to,
        } = request;
        let new_task = NewTask {
            title: TaskTitle::new(title)?,
            description,
            priority: TaskPriority::try_from(priority.as_str())?,
            deadline,
            assigned_to,
            assigned_by: caller.user_id(),
        };

        let assignee = self
            .lookup
            .employee_managed_by(caller.user_id(), assigned_to)
            .await?;
        if assignee.is_none() {
            warn!(
                manager = %caller.user_id(),
                %assigned_to,
                "task assignment rejected: assignee not in manager's team"
            );
            return Err(TaskServiceError::InvalidAssignee(assigned_to));
        }

        let task = Task::assign(new_task, &*self.clock);
        self.admit(&task).await?;

        info!(
            task_id = %task.id(),
            assigned_to = %task.assigned_to(),
            assigned_by = %task.assigned_by(),
            priority = %task.priority(),
            "task assigned"
        );
        Ok(task)
    }

    /// Stores `task` if its assignee is below the active-task cap.
    async fn admit(&self, task: &Task) -> TaskServiceResult<()> {
        let cap = self.policy.active_task_cap;
        let result = match self.policy.enforcement {
            CapacityEnforcement::Strict => self.store.insert_within_capacity(task, cap).await,
            CapacityEnforcement::Soft => {
                let active = self
                    .store
                    .count_active_by_assignee(task.assigned_to())
                    .await?;
                if active >= cap {
                    Err(TaskStoreError::CapacityExceeded {
                        assignee: task.assigned_to(),
                        active,
                        cap,
                    })
                } else {
                    self.store.insert(task).await
                }
            }
        };

        result.map_err(|err| {
            let service_err = TaskServiceError::from(err);
            if let TaskServiceError::CapacityExceeded { assignee, active, .. } = &service_err {
                warn!(%assignee, active, cap, "task assignment rejected: capacity reached");
            }
            service_err
        })
    }
}
