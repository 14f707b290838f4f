//! Store port for task persistence and capacity-aware admission.

use crate::directory::domain::UserId;
use crate::task::domain::{Task, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// Task persistence contract.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Stores a new task without any capacity check.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert(&self, task: &Task) -> TaskStoreResult<()>;

    /// Stores a new task only if its assignee holds fewer than `cap` active
    /// tasks. Counting and inserting happen atomically with respect to other
    /// inserts for the same assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::CapacityExceeded`] when the assignee is at
    /// capacity or [`TaskStoreError::DuplicateTask`] when the task ID already
    /// exists.
    async fn insert_within_capacity(&self, task: &Task, cap: u64) -> TaskStoreResult<()>;

    /// Persists changes to an existing task (status, timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskStoreResult<()>;

    /// Marks a task overdue if, at the moment of the write, it is still
    /// active and its deadline is strictly before `now`.
    ///
    /// The check and the write are a single compare-and-set, so a status
    /// committed after the caller read the task is never overwritten.
    /// Returns the stored task after the call, or `None` when it does not
    /// exist.
    async fn mark_overdue(&self, id: TaskId, now: DateTime<Utc>) -> TaskStoreResult<Option<Task>>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Returns every task assigned to `assignee`, ordered by deadline then
    /// creation time.
    async fn find_all_by_assignee(&self, assignee: UserId) -> TaskStoreResult<Vec<Task>>;

    /// Returns the active (pending or in-progress) tasks assigned to
    /// `assignee`.
    async fn find_active_by_assignee(&self, assignee: UserId) -> TaskStoreResult<Vec<Task>>;

    /// Counts the tasks assigned to `assignee` whose status is neither
    /// completed nor overdue.
    async fn count_active_by_assignee(&self, assignee: UserId) -> TaskStoreResult<u64>;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

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

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
