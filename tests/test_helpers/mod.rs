//! Shared clock and organisation fixtures for integration tests.

use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use foreman::{
    directory::{
        adapters::memory::InMemoryUserDirectory,
        domain::{User, UserId},
        services::{CreateUserRequest, UserProvisioningService},
    },
    identity::Caller,
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{AssignmentPolicy, StatusUpdatePolicy},
        services::{TaskAssignmentService, TaskLifecycleService},
    },
    workload::services::WorkloadScoringService,
};
use mockable::{Clock, MockClock};

/// Fixed working-day morning every organisation starts at.
fn monday_morning() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

fn read(now: &Mutex<DateTime<Utc>>) -> DateTime<Utc> {
    *now.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Builds a mock clock that reports whatever instant `now` holds.
fn clock_reading(now: &Arc<Mutex<DateTime<Utc>>>) -> MockClock {
    let mut clock = MockClock::new();
    let utc_now = Arc::clone(now);
    clock.expect_utc().returning(move || read(&utc_now));
    let local_now = Arc::clone(now);
    clock
        .expect_local()
        .returning(move || read(&local_now).with_timezone(&Local));
    clock
}

/// Assignment service wired to the in-memory adapters.
pub type Assignments = TaskAssignmentService<InMemoryTaskStore, InMemoryUserDirectory, MockClock>;

/// Lifecycle service wired to the in-memory adapters.
pub type Lifecycle = TaskLifecycleService<InMemoryTaskStore, MockClock>;

/// Workload service wired to the in-memory adapters.
pub type Workloads = WorkloadScoringService<InMemoryTaskStore, InMemoryUserDirectory>;

/// A provisioned organisation: one manager with two employees, and a rival
/// manager with one employee of their own.
pub struct Organisation {
    pub directory: Arc<InMemoryUserDirectory>,
    pub store: Arc<InMemoryTaskStore>,
    pub clock: Arc<MockClock>,
    now: Arc<Mutex<DateTime<Utc>>>,
    pub manager: User,
    pub employee: User,
    pub colleague: User,
    pub rival: User,
    pub outsider: User,
}

impl Organisation {
    /// Provisions the organisation through the admin-facing service.
    ///
    /// # Errors
    ///
    /// Returns an error if any user fails to provision.
    pub async fn provision() -> eyre::Result<Self> {
        let directory = Arc::new(InMemoryUserDirectory::new());
        let now = Arc::new(Mutex::new(monday_morning()));
        let clock = Arc::new(clock_reading(&now));
        let provisioning =
            UserProvisioningService::new(Arc::clone(&directory), Arc::clone(&clock));
        let admin = Caller::admin(UserId::new());

        let manager = provisioning
            .create_user(
                admin,
                CreateUserRequest::new("Morgan Reed", "morgan@example.com", "digest", "manager"),
            )
            .await?;
        let rival = provisioning
            .create_user(
                admin,
                CreateUserRequest::new("Riley Chen", "riley@example.com", "digest", "manager"),
            )
            .await?;
        let employee = provisioning
            .create_user(
                Caller::manager(manager.id()),
                CreateUserRequest::new("Ellis Park", "ellis@example.com", "digest", "employee")
                    .with_manager(manager.id()),
            )
            .await?;
        let colleague = provisioning
            .create_user(
                admin,
                CreateUserRequest::new("Casey Ward", "casey@example.com", "digest", "employee")
                    .with_manager(manager.id()),
            )
            .await?;
        let outsider = provisioning
            .create_user(
                admin,
                CreateUserRequest::new("Oakley Shaw", "oakley@example.com", "digest", "employee")
                    .with_manager(rival.id()),
            )
            .await?;

        Ok(Self {
            directory,
            store: Arc::new(InMemoryTaskStore::new()),
            clock,
            now,
            manager,
            employee,
            colleague,
            rival,
            outsider,
        })
    }

    /// Moves the shared clock forward by `delta`.
    pub fn advance_clock(&self, delta: TimeDelta) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += delta;
    }

    /// Returns the assignment service under `policy`.
    pub fn assignments(&self, policy: AssignmentPolicy) -> Assignments {
        TaskAssignmentService::new(
            Arc::clone(&self.store),
            Arc::clone(&self.directory),
            Arc::clone(&self.clock),
        )
        .with_policy(policy)
    }

    /// Returns the lifecycle service under `policy`.
    pub fn lifecycle(&self, policy: StatusUpdatePolicy) -> Lifecycle {
        TaskLifecycleService::new(Arc::clone(&self.store), Arc::clone(&self.clock))
            .with_policy(policy)
    }

    /// Returns the workload service with the default policy.
    pub fn workloads(&self) -> Workloads {
        WorkloadScoringService::new(Arc::clone(&self.store), Arc::clone(&self.directory))
    }

    /// Returns the current instant plus `days`.
    pub fn days_from_now(&self, days: i64) -> DateTime<Utc> {
        self.clock.utc() + TimeDelta::days(days)
    }

    /// Returns the current instant plus `hours`.
    pub fn hours_from_now(&self, hours: i64) -> DateTime<Utc> {
        self.clock.utc() + TimeDelta::hours(hours)
    }
}
