//! `PostgreSQL` integration tests for capacity-guarded task admission.

use std::sync::Arc;

use chrono::{TimeDelta, Utc};
use foreman::{
    identity::Caller,
    task::{
        domain::{AssignmentPolicy, CapacityEnforcement, DEFAULT_ACTIVE_TASK_CAP},
        ports::{TaskStore, TaskStoreError},
        services::{CreateTaskRequest, TaskAssignmentService, TaskServiceError},
    },
};
use mockable::DefaultClock;
use rstest::rstest;

use crate::postgres::helpers::{fresh_stores, pending_task, seed_team};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn store_rejects_insert_at_capacity() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let deadline = Utc::now() + TimeDelta::days(2);
    for _ in 0..2 {
        stores
            .store
            .insert_within_capacity(&pending_task(&team, deadline)?, 2)
            .await?;
    }
    let extra = pending_task(&team, deadline)?;

    let result = stores.store.insert_within_capacity(&extra, 2).await;

    eyre::ensure!(
        matches!(result, Err(TaskStoreError::CapacityExceeded { active: 2, cap: 2, .. })),
        "expected CapacityExceeded, got {result:?}"
    );
    eyre::ensure!(stores.store.find_by_id(extra.id()).await?.is_none());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn strict_enforcement_admits_exactly_cap_concurrent_creates() -> eyre::Result<()> {
    let stores = fresh_stores().await?;
    let team = seed_team(&stores.directory).await?;
    let service = Arc::new(
        TaskAssignmentService::new(
            Arc::clone(&stores.store),
            Arc::clone(&stores.directory),
            Arc::new(DefaultClock),
        )
        .with_policy(AssignmentPolicy {
            enforcement: CapacityEnforcement::Strict,
            ..AssignmentPolicy::default()
        }),
    );
    let caller = Caller::manager(team.manager.id());
    let employee = team.employee.id();
    let deadline = Utc::now() + TimeDelta::days(2);

    let mut handles = Vec::new();
    for index in 0..10 {
        let task_service = Arc::clone(&service);
        let request =
            CreateTaskRequest::new(format!("Parallel task {index}"), "high", deadline, employee);
        handles.push(tokio::spawn(async move {
            task_service.create_task(caller, request).await
        }));
    }

    let mut admitted = 0_u64;
    let mut rejected = 0_u64;
    for handle in handles {
        match handle.await? {
            Ok(_) => admitted += 1,
            Err(TaskServiceError::CapacityExceeded { .. }) => rejected += 1,
            Err(other) => eyre::bail!("unexpected error: {other}"),
        }
    }

    let cap = DEFAULT_ACTIVE_TASK_CAP;
    eyre::ensure!(admitted == cap, "expected {cap} admitted, got {admitted}");
    eyre::ensure!(rejected == 10 - cap, "expected {} rejected, got {rejected}", 10 - cap);
    eyre::ensure!(stores.store.count_active_by_assignee(employee).await? == cap);
    Ok(())
}
