//! Given steps for task assignment BDD scenarios.

use super::world::{AssignmentWorld, run_async};
use crate::test_helpers::Organisation;
use eyre::WrapErr;
use foreman::{
    identity::Caller,
    task::{domain::AssignmentPolicy, services::CreateTaskRequest},
};
use rstest_bdd_macros::given;

#[given("an organisation with a manager and their employee")]
fn organisation(world: &mut AssignmentWorld) -> Result<(), eyre::Report> {
    let organisation =
        run_async(Organisation::provision()).wrap_err("provision scenario organisation")?;
    world.organisation = Some(organisation);
    Ok(())
}

#[given("the employee already holds {count:u64} active tasks")]
fn employee_holds_tasks(world: &mut AssignmentWorld, count: u64) -> Result<(), eyre::Report> {
    let org = world.organisation()?;
    let service = org.assignments(AssignmentPolicy::default());
    let caller = Caller::manager(org.manager.id());
    for index in 0..count {
        let request = CreateTaskRequest::new(
            format!("Backlog item {index}"),
            "low",
            org.days_from_now(7),
            org.employee.id(),
        );
        run_async(service.create_task(caller, request)).wrap_err("seed active task")?;
    }
    Ok(())
}

#[given(r#"the manager has assigned a "{priority}" priority task due in {days:i64} days"#)]
fn manager_has_assigned(
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
    run_async(
        org.assignments(AssignmentPolicy::default())
            .create_task(Caller::manager(org.manager.id()), request),
    )
    .wrap_err("assign scenario task")?;
    Ok(())
}
