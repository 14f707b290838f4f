//! In-memory integration tests for the overdue sweep performed on listing.

use chrono::TimeDelta;

use crate::test_helpers::Organisation;
use foreman::{
    identity::Caller,
    task::{
        domain::{AssignmentPolicy, StatusUpdatePolicy, Task, TaskStatus},
        ports::TaskStore,
        services::{CreateTaskRequest, TaskServiceError, UpdateStatusRequest},
    },
};
use rstest::rstest;

async fn assign(org: &Organisation, title: &str, deadline_hours: i64) -> eyre::Result<Task> {
    let request = CreateTaskRequest::new(
        title,
        "medium",
        org.hours_from_now(deadline_hours),
        org.employee.id(),
    );
    Ok(org
        .assignments(AssignmentPolicy::default())
        .create_task(Caller::manager(org.manager.id()), request)
        .await?)
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn pending_task_becomes_overdue_once_deadline_passes() -> eyre::Result<()> {
    let org = Organisation::provision().await?;
    let task = assign(&org, "Submit timesheet", 4).await?;
    let lifecycle = org.lifecycle(StatusUpdatePolicy::default());
    let caller = Caller::employee(org.employee.id());

    let before = lifecycle.list_mine(caller).await?;
    org.advance_clock(TimeDelta::hours(5));
    let after = lifecycle.list_mine(caller).await?;
    let again = lifecycle.list_mine(caller).await?;

    eyre::ensure!(before.iter().all(|listed| listed.status() == TaskStatus::Pending));
    eyre::ensure!(after.iter().all(|listed| listed.status() == TaskStatus::Overdue));
    eyre::ensure!(after == again, "second sweep changed the tasks");
    let stored = org
        .store
        .find_by_id(task.id())
        .await?
        .ok_or_else(|| eyre::eyre!("task vanished"))?;
    eyre::ensure!(stored.status() == TaskStatus::Overdue);
    eyre::ensure!(stored.updated_at() == org.hours_from_now(0));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deadline_exactly_now_is_not_overdue() -> eyre::Result<()> {
    let org = Organisation::provision().await?;
    assign(&org, "Boundary", 2).await?;
    org.advance_clock(TimeDelta::hours(2));

    let listed = org
        .lifecycle(StatusUpdatePolicy::default())
        .list_mine(Caller::employee(org.employee.id()))
        .await?;

    eyre::ensure!(listed.iter().all(|task| task.status() == TaskStatus::Pending));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completed_tasks_survive_passing_deadlines() -> eyre::Result<()> {
    let org = Organisation::provision().await?;
    let task = assign(&org, "Close ticket", 1).await?;
    let lifecycle = org.lifecycle(StatusUpdatePolicy::default());
    let caller = Caller::employee(org.employee.id());

    lifecycle
        .update_status(caller, UpdateStatusRequest::new(task.id(), "completed"))
        .await?;
    org.advance_clock(TimeDelta::days(3));
    let listed = lifecycle.list_mine(caller).await?;

    eyre::ensure!(listed.iter().all(|listed_task| listed_task.status() == TaskStatus::Completed));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sweep_frees_capacity_for_new_assignments() -> eyre::Result<()> {
    let org = Organisation::provision().await?;
    for index in 0..5 {
        assign(&org, &format!("Slot {index}"), 1).await?;
    }
    org.advance_clock(TimeDelta::hours(2));

    org.lifecycle(StatusUpdatePolicy::default())
        .list_mine(Caller::employee(org.employee.id()))
        .await?;
    let fresh = assign(&org, "After sweep", 24).await?;

    eyre::ensure!(fresh.status() == TaskStatus::Pending);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn overdue_tasks_are_frozen_under_guarded_policy() -> eyre::Result<()> {
    let org = Organisation::provision().await?;
    let task = assign(&org, "Missed", 1).await?;
    org.advance_clock(TimeDelta::hours(2));
    let caller = Caller::employee(org.employee.id());
    let guarded = org.lifecycle(StatusUpdatePolicy::Guarded);
    guarded.list_mine(caller).await?;

    let rejected = guarded
        .update_status(caller, UpdateStatusRequest::new(task.id(), "completed"))
        .await;
    let accepted = org
        .lifecycle(StatusUpdatePolicy::Unrestricted)
        .update_status(caller, UpdateStatusRequest::new(task.id(), "completed"))
        .await?;

    eyre::ensure!(
        matches!(rejected, Err(TaskServiceError::Domain(_))),
        "expected a domain error, got {rejected:?}"
    );
    eyre::ensure!(accepted.status() == TaskStatus::Completed);
    Ok(())
}
