//! Then steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use foreman::task::{
    domain::{Task, TaskStatus},
    ports::TaskStore,
    services::TaskServiceError,
};
use foreman::workload::domain::WorkloadLevel;
use rstest_bdd_macros::then;

fn last_assignment(world: &AssignmentWorld) -> eyre::Result<&Result<Task, TaskServiceError>> {
    world
        .last_assignment
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing assignment result"))
}

#[then(r#"the assignment succeeds with status "{status}""#)]
fn assignment_succeeds(world: &AssignmentWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task = last_assignment(world)?
        .as_ref()
        .map_err(|err| eyre::eyre!("expected assignment to succeed, got {err}"))?;

    if task.status() != expected {
        return Err(eyre::eyre!(
            "expected status {expected}, found {}",
            task.status()
        ));
    }
    Ok(())
}

#[then("the employee holds {count:u64} active tasks")]
fn employee_holds(world: &AssignmentWorld, count: u64) -> Result<(), eyre::Report> {
    let org = world.organisation()?;
    let active = run_async(org.store.count_active_by_assignee(org.employee.id()))?;
    if active != count {
        return Err(eyre::eyre!("expected {count} active tasks, found {active}"));
    }
    Ok(())
}

#[then("the assignment fails because the employee is at capacity")]
fn assignment_fails_at_capacity(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let result = last_assignment(world)?;
    if !matches!(result, Err(TaskServiceError::CapacityExceeded { .. })) {
        return Err(eyre::eyre!("expected CapacityExceeded, got {result:?}"));
    }
    Ok(())
}

#[then("the assignment fails because the assignee is invalid")]
fn assignment_fails_invalid_assignee(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let result = last_assignment(world)?;
    if !matches!(result, Err(TaskServiceError::InvalidAssignee(_))) {
        return Err(eyre::eyre!("expected InvalidAssignee, got {result:?}"));
    }
    Ok(())
}

#[then(r#"every listed task has status "{status}""#)]
fn every_listed_task_has_status(
    world: &AssignmentWorld,
    status: String,
) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let listed = world
        .listed_tasks
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing listed tasks"))?;

    if listed.is_empty() {
        return Err(eyre::eyre!("expected at least one listed task"));
    }
    if let Some(task) = listed.iter().find(|task| task.status() != expected) {
        return Err(eyre::eyre!(
            "task {} has status {}, expected {expected}",
            task.id(),
            task.status()
        ));
    }
    Ok(())
}

#[then(r#"the workload score is {score:u32} with level "{level}""#)]
fn workload_score_is(
    world: &AssignmentWorld,
    score: u32,
    level: String,
) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .ok_or_else(|| eyre::eyre!("missing workload report"))?;

    if report.score() != score {
        return Err(eyre::eyre!(
            "expected score {score}, found {}",
            report.score()
        ));
    }
    if report.level().as_str() != level {
        return Err(eyre::eyre!(
            "expected level {level}, found {}",
            report.level()
        ));
    }
    Ok(())
}

#[then("the workload level is not high")]
fn workload_level_not_high(world: &AssignmentWorld) -> Result<(), eyre::Report> {
    let report = world
        .last_report
        .ok_or_else(|| eyre::eyre!("missing workload report"))?;
    if report.level() == WorkloadLevel::High {
        return Err(eyre::eyre!("expected workload below high"));
    }
    Ok(())
}
