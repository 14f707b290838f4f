//! Workload scoring service and its authorised views.

use crate::directory::{
    domain::{Role, User, UserId},
    ports::{UserDirectory, UserDirectoryError},
    services::UserLookupService,
};
use crate::identity::Caller;
use crate::task::ports::{TaskStore, TaskStoreError};
use crate::workload::domain::{EmployeeWorkload, WorkloadPolicy, WorkloadReport};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Service-level errors for workload queries.
#[derive(Debug, Error)]
pub enum WorkloadServiceError {
    /// The caller may not view the requested workload.
    #[error("{role} may not {operation}")]
    PermissionDenied {
        /// Role of the rejected caller.
        role: Role,
        /// Operation that was attempted.
        operation: &'static str,
    },

    /// The target is missing or is not an employee.
    #[error("employee not found: {0}")]
    NotFound(UserId),

    /// The task store failed.
    #[error("task store unavailable: {0}")]
    StoreUnavailable(#[from] TaskStoreError),

    /// The user directory failed.
    #[error("user directory unavailable: {0}")]
    DirectoryUnavailable(#[from] UserDirectoryError),
}

/// Result type for workload service operations.
pub type WorkloadServiceResult<T> = Result<T, WorkloadServiceError>;

/// Workload scoring service.
///
/// Reads the task store on every call; nothing is cached.
#[derive(Clone)]
pub struct WorkloadScoringService<T, D>
where
    T: TaskStore,
    D: UserDirectory,
{
    store: Arc<T>,
    lookup: UserLookupService<D>,
    policy: WorkloadPolicy,
}

impl<T, D> WorkloadScoringService<T, D>
where
    T: TaskStore,
    D: UserDirectory,
{
    /// Creates a new scoring service with the default policy.
    #[must_use]
    pub fn new(store: Arc<T>, directory: Arc<D>) -> Self {
        Self {
            store,
            lookup: UserLookupService::new(directory),
            policy: WorkloadPolicy::default(),
        }
    }

    /// Replaces the scoring policy.
    #[must_use]
    pub const fn with_policy(mut self, policy: WorkloadPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active scoring policy.
    #[must_use]
    pub const fn policy(&self) -> WorkloadPolicy {
        self.policy
    }

    /// Computes the workload of `user_id` from its pending and in-progress
    /// tasks.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError::StoreUnavailable`] when the store
    /// fails.
    pub async fn compute(&self, user_id: UserId) -> WorkloadServiceResult<WorkloadReport> {
        let tasks = self.store.find_active_by_assignee(user_id).await?;
        let report = self.policy.assess(&tasks);
        debug!(
            %user_id,
            score = report.score(),
            level = %report.level(),
            active_tasks = report.active_tasks(),
            "workload computed"
        );
        Ok(report)
    }

    /// Computes one employee's workload on behalf of `caller`.
    ///
    /// Employees may read only their own workload, managers only that of
    /// their employees, and admins any employee's.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError::PermissionDenied`] when the caller may
    /// not view the employee, [`WorkloadServiceError::NotFound`] when the
    /// target is missing or not an employee, and the store or directory
    /// variants when a lookup fails.
    pub async fn workload_for(
        &self,
        caller: Caller,
        employee_id: UserId,
    ) -> WorkloadServiceResult<WorkloadReport> {
        const OPERATION: &str = "view this workload";

        if caller.has_role(Role::Employee) && caller.user_id() != employee_id {
            return Err(denied(caller, OPERATION));
        }

        let employee = self.resolve_employee(employee_id).await?;
        if caller.has_role(Role::Manager) && !employee.is_employee_of(caller.user_id()) {
            return Err(denied(caller, OPERATION));
        }

        self.compute(employee_id).await
    }

    /// Computes the workload of every employee reporting to the calling
    /// manager.
    ///
    /// # Errors
    ///
    /// Returns [`WorkloadServiceError::PermissionDenied`] unless the caller is
    /// a manager, and the store or directory variants when a lookup fails.
    pub async fn team_workload(
        &self,
        caller: Caller,
    ) -> WorkloadServiceResult<Vec<EmployeeWorkload>> {
        if !caller.has_role(Role::Manager) {
            return Err(denied(caller, "view team workload"));
        }

        let team = self.lookup.team_of(caller.user_id()).await?;
        let mut entries = Vec::with_capacity(team.len());
        for member in team {
            let report = self.compute(member.id()).await?;
            entries.push(EmployeeWorkload::new(
                member.id(),
                member.full_name().clone(),
                report,
            ));
        }
        Ok(entries)
    }

    async fn resolve_employee(&self, employee_id: UserId) -> WorkloadServiceResult<User> {
        self.lookup
            .find_user(employee_id)
            .await?
            .filter(|user| user.role() == Role::Employee)
            .ok_or(WorkloadServiceError::NotFound(employee_id))
    }
}

fn denied(caller: Caller, operation: &'static str) -> WorkloadServiceError {
    warn!(
        caller = %caller.user_id(),
        role = %caller.role(),
        operation,
        "workload request denied"
    );
    WorkloadServiceError::PermissionDenied {
        role: caller.role(),
        operation,
    }
}
