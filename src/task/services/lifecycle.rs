//! Assignee-facing task listing and status updates.

use super::error::{TaskServiceError, TaskServiceResult, require_role};
use crate::directory::domain::Role;
use crate::identity::Caller;
use crate::task::{
    domain::{StatusUpdatePolicy, Task, TaskId, TaskStatus},
    ports::TaskStore,
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Request payload for an assignee status update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateStatusRequest {
    task_id: TaskId,
    status: String,
}

impl UpdateStatusRequest {
    /// Creates a status update request.
    #[must_use]
    pub fn new(task_id: TaskId, status: impl Into<String>) -> Self {
        Self {
            task_id,
            status: status.into(),
        }
    }

    /// Returns the targeted task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the requested status string.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }
}

/// Lifecycle service for employees working their own tasks.
///
/// Listing sweeps overdue tasks before returning them, so the stored status
/// is authoritative as of the most recent read.
#[derive(Clone)]
pub struct TaskLifecycleService<T, C>
where
    T: TaskStore,
    C: Clock + Send + Sync,
{
    store: Arc<T>,
    clock: Arc<C>,
    policy: StatusUpdatePolicy,
}

impl<T, C> TaskLifecycleService<T, C>
where
    T: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new lifecycle service with guarded status updates.
    #[must_use]
    pub fn new(store: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            store,
            clock,
            policy: StatusUpdatePolicy::default(),
        }
    }

    /// Replaces the status update policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: StatusUpdatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active status update policy.
    #[must_use]
    pub const fn policy(&self) -> StatusUpdatePolicy {
        self.policy
    }

    /// Lists every task assigned to the calling employee.
    ///
    /// Active tasks whose deadline has passed are marked overdue through the
    /// store's compare-and-set sweep, so a status committed concurrently is
    /// kept rather than overwritten. Tasks keep the store's ordering by
    /// deadline, then creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::PermissionDenied`] unless the caller is an
    /// employee, and [`TaskServiceError::StoreUnavailable`] when the store
    /// fails while reading or persisting a sweep.
    pub async fn list_mine(&self, caller: Caller) -> TaskServiceResult<Vec<Task>> {
        require_role(caller, Role::Employee, "list assigned tasks")?;

        let now = self.clock.utc();
        let assigned = self.store.find_all_by_assignee(caller.user_id()).await?;
        let mut tasks = Vec::with_capacity(assigned.len());
        for task in assigned {
            if !task.is_due_for_sweep(now) {
                tasks.push(task);
                continue;
            }
            let Some(current) = self.store.mark_overdue(task.id(), now).await? else {
                continue;
            };
            if current.status() == TaskStatus::Overdue {
                info!(
                    task_id = %current.id(),
                    assigned_to = %current.assigned_to(),
                    deadline = %current.deadline(),
                    "task marked overdue"
                );
            } else {
                debug!(
                    task_id = %current.id(),
                    status = %current.status(),
                    "overdue sweep skipped a concurrently updated task"
                );
            }
            tasks.push(current);
        }

        debug!(employee = %caller.user_id(), count = tasks.len(), "listed assigned tasks");
        Ok(tasks)
    }

    /// Changes the status of a task owned by the calling employee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::PermissionDenied`] unless the caller is an
    /// employee, [`TaskServiceError::InvalidStatus`] for an unrecognised
    /// status, [`TaskServiceError::NotFound`] when the task is missing or
    /// assigned to someone else, [`TaskServiceError::Domain`] when the guarded
    /// policy rejects the change, and [`TaskServiceError::StoreUnavailable`]
    /// when the store fails.
    pub async fn update_status(
        &self,
        caller: Caller,
        request: UpdateStatusRequest,
    ) -> TaskServiceResult<Task> {
        require_role(caller, Role::Employee, "update task status")?;

        let task_id = request.task_id();
        let target = TaskStatus::try_from(request.status())?;
        let mut task = self
            .store
            .find_by_id(task_id)
            .await?
            .filter(|task| task.is_assigned_to(caller.user_id()))
            .ok_or(TaskServiceError::NotFound(task_id))?;

        let previous = task.status();
        match self.policy {
            StatusUpdatePolicy::Guarded => task.transition_to(target, &*self.clock)?,
            StatusUpdatePolicy::Unrestricted => task.set_status(target, &*self.clock),
        }
        self.store.update(&task).await?;

        info!(
            %task_id,
            employee = %caller.user_id(),
            from = %previous,
            to = %target,
            "task status updated"
        );
        Ok(task)
    }
}
