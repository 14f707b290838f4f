//! `PostgreSQL` integration tests for task persistence and the overdue sweep.

use foreman::task::{
    domain::{Task, TaskId, TaskStatus},
    ports::{TaskStore, TaskStoreError},
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{day_offset, fresh_stores, pending_task, seed_team};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inserted_task_is_found_by_id() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let task = pending_task(&team, day_offset(3))?;

    stores.store.insert(&task).await?;
    let fetched = stores
        .store
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task should be stored"))?;

    eyre::ensure!(fetched.title() == task.title());
    eyre::ensure!(fetched.description() == task.description());
    eyre::ensure!(fetched.priority() == task.priority());
    eyre::ensure!(fetched.status() == TaskStatus::Pending);
    eyre::ensure!(fetched.deadline() == task.deadline());
    eyre::ensure!(fetched.assigned_by() == team.manager.id());
    eyre::ensure!(
        fetched.created_at().timestamp_micros() == task.created_at().timestamp_micros()
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_insert_is_rejected() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let task = pending_task(&team, day_offset(3))?;
    stores.store.insert(&task).await?;

    let result = stores.store.insert(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::DuplicateTask(id)) if id == task.id()),
        "expected DuplicateTask, got {result:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_of_unknown_task_is_not_found() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let task = pending_task(&team, day_offset(3))?;

    let result = stores.store.update(&task).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::NotFound(id)) if id == task.id()),
        "expected NotFound, got {result:?}"
    );
    eyre::ensure!(stores.store.find_by_id(TaskId::new()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn inactive_statuses_are_excluded_from_active_queries() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let pending = pending_task(&team, day_offset(1))?;
    let mut in_progress = pending_task(&team, day_offset(2))?;
    let mut completed = pending_task(&team, day_offset(3))?;
    let overdue = pending_task(&team, day_offset(-1))?;
    for task in [&pending, &in_progress, &completed, &overdue] {
        stores.store.insert(task).await?;
    }
    in_progress.set_status(TaskStatus::InProgress, &DefaultClock);
    completed.set_status(TaskStatus::Completed, &DefaultClock);
    stores.store.update(&in_progress).await?;
    stores.store.update(&completed).await?;
    stores.store.mark_overdue(overdue.id(), day_offset(0)).await?;

    let assignee = team.employee.id();
    let active = stores.store.find_active_by_assignee(assignee).await?;
    let everything = stores.store.find_all_by_assignee(assignee).await?;

    let active_ids: Vec<TaskId> = active.iter().map(Task::id).collect();
    let all_ids: Vec<TaskId> = everything.iter().map(Task::id).collect();
    eyre::ensure!(active_ids == vec![pending.id(), in_progress.id()]);
    eyre::ensure!(stores.store.count_active_by_assignee(assignee).await? == 2);
    eyre::ensure!(
        all_ids == vec![overdue.id(), pending.id(), in_progress.id(), completed.id()],
        "expected deadline order, got {all_ids:?}"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_overdue_sweeps_active_task_past_deadline() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let task = pending_task(&team, day_offset(1))?;
    stores.store.insert(&task).await?;
    let now = day_offset(2);

    let swept = stores
        .store
        .mark_overdue(task.id(), now)
        .await?
        .ok_or_else(|| eyre::eyre!("task should still exist"))?;

    eyre::ensure!(swept.status() == TaskStatus::Overdue);
    eyre::ensure!(swept.updated_at() == now);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_overdue_leaves_task_within_deadline() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let task = pending_task(&team, day_offset(1))?;
    stores.store.insert(&task).await?;

    let at_deadline = stores.store.mark_overdue(task.id(), day_offset(1)).await?;
    let unknown = stores.store.mark_overdue(TaskId::new(), day_offset(2)).await?;

    eyre::ensure!(at_deadline.as_ref().map(Task::status) == Some(TaskStatus::Pending));
    eyre::ensure!(unknown.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn mark_overdue_keeps_completion_committed_after_the_read() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let task = pending_task(&team, day_offset(1))?;
    stores.store.insert(&task).await?;

    let listed = stores
        .store
        .find_all_by_assignee(team.employee.id())
        .await?;
    let mut completed = task.clone();
    completed.set_status(TaskStatus::Completed, &DefaultClock);
    stores.store.update(&completed).await?;
    let stale = listed
        .first()
        .ok_or_else(|| eyre::eyre!("listing should contain the task"))?;
    eyre::ensure!(stale.status() == TaskStatus::Pending);

    let after_sweep = stores.store.mark_overdue(stale.id(), day_offset(2)).await?;

    eyre::ensure!(after_sweep.as_ref().map(Task::status) == Some(TaskStatus::Completed));
    Ok(())
}
