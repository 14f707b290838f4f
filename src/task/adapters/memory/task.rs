//! In-memory task store for tests and embedded use.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::directory::domain::UserId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    assignee_index: HashMap<UserId, Vec<TaskId>>,
}

impl InMemoryTaskState {
    fn assigned_to(&self, assignee: UserId) -> impl Iterator<Item = &Task> {
        self.assignee_index
            .get(&assignee)
            .into_iter()
            .flatten()
            .filter_map(|id| self.tasks.get(id))
    }

    fn count_active(&self, assignee: UserId) -> u64 {
        let active = self.assigned_to(assignee).filter(|task| task.is_active()).count();
        u64::try_from(active).unwrap_or(u64::MAX)
    }

    fn insert(&mut self, task: &Task) -> TaskStoreResult<()> {
        if self.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        self.assignee_index
            .entry(task.assigned_to())
            .or_default()
            .push(task.id());
        self.tasks.insert(task.id(), task.clone());
        Ok(())
    }
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskStoreResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state
            .read()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }

    fn write(&self) -> TaskStoreResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state
            .write()
            .map_err(|err| TaskStoreError::persistence(std::io::Error::other(err.to_string())))
    }
}

/// Clones matching tasks ordered by deadline, then creation time.
fn collect_sorted<'a>(tasks: impl Iterator<Item = &'a Task>) -> Vec<Task> {
    let mut matched: Vec<Task> = tasks.cloned().collect();
    matched.sort_by_key(|task| (task.deadline(), task.created_at(), task.id()));
    matched
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        state.insert(task)
    }

    async fn insert_within_capacity(&self, task: &Task, cap: u64) -> TaskStoreResult<()> {
        // The write lock spans the count and the insert.
        let mut state = self.write()?;
        let active = state.count_active(task.assigned_to());
        if active >= cap {
            return Err(TaskStoreError::CapacityExceeded {
                assignee: task.assigned_to(),
                active,
                cap,
            });
        }
        state.insert(task)
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let mut state = self.write()?;
        let stored = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskStoreError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    async fn mark_overdue(
        &self,
        id: TaskId,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(stored) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        stored.mark_overdue_if_due(now);
        Ok(Some(stored.clone()))
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find_all_by_assignee(&self, assignee: UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(state.assigned_to(assignee)))
    }

    async fn find_active_by_assignee(&self, assignee: UserId) -> TaskStoreResult<Vec<Task>> {
        let state = self.read()?;
        Ok(collect_sorted(
            state.assigned_to(assignee).filter(|task| task.is_active()),
        ))
    }

    async fn count_active_by_assignee(&self, assignee: UserId) -> TaskStoreResult<u64> {
        let state = self.read()?;
        Ok(state.count_active(assignee))
    }
}
