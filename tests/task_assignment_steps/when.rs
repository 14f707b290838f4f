//! When steps for task assignment BDD scenarios.

use chrono::TimeDelta;

use super::world::{AssignmentWorld, run_async};
use foreman::{
    identity::Caller,
    task::{
        domain::{AssignmentPolicy, StatusUpdatePolicy},
        services::CreateTaskRequest,
    },
};
use rstest_bdd_macros::when;

#[when(r#"the manager assigns a "{priority}" priority task due in {days:i64} days"#)]
fn manager_assigns(
    world: &mut AssignmentWorld,
    priority: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let org = world.organisation()?;
    let request = CreateTaskRequest::new(
        "Scenario task",
        priority,
        org.days_from_now(days),
        org.employee.id(),
    );
    let result = run_async(
        org.assignments(AssignmentPolicy::default())
            .create_task(Caller::manager(org.manager.id()), request),
    );
    world.last_assignment = Some(result);
    Ok(())
}

#[when(r#"a rival manager assigns a "{priority}" priority task due in {days:i64} days"#)]
fn rival_assigns(
    world: &mut AssignmentWorld,
    priority: String,
    days: i64,
) -> Result<(), eyre::Report> {
    let org = world.organisation()?;
    let request = CreateTaskRequest::new(
        "Poached task",
        priority,
        org.days_from_now(days),
        org.employee.id(),
    );
    let result = run_async(
        org.assignments(AssignmentPolicy::default())
            .create_task(Caller::manager(org.rival.id()), request),
    );
    world.last_assignment = Some(result);
    Ok(())
}

#[when("{days:i64} days pass")]
fn days_pass(world: &mut AssignmentWorld, days: i64) -> Result<(), eyre::Report> {
    world.organisation()?.advance_clock(TimeDelta::days(days));
    Ok(())
}

#[when("the employee lists their tasks")]
fn employee_lists(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    let org = world.organisation()?;
    let listed = run_async(
        org.lifecycle(StatusUpdatePolicy::default())
            .list_mine(Caller::employee(org.employee.id())),
    )?;
    world.listed_tasks = Some(listed);
    Ok(())
}

#[when("the workload of the employee is computed")]
fn workload_computed(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    let org = world.organisation()?;
    let report = run_async(org.workloads().compute(org.employee.id()))?;
    world.last_report = Some(report);
    Ok(())
}
