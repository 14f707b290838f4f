//! Workload read models.

use super::WorkloadLevel;
use crate::directory::domain::{FullName, UserId};
use serde::Serialize;

/// Score and band for one employee at the time of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkloadReport {
    score: u32,
    level: WorkloadLevel,
    active_tasks: usize,
}

impl WorkloadReport {
    /// Creates a report.
    #[must_use]
    pub const fn new(score: u32, level: WorkloadLevel, active_tasks: usize) -> Self {
        Self {
            score,
            level,
            active_tasks,
        }
    }

    /// Returns the summed priority weights.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Returns the workload band.
    #[must_use]
    pub const fn level(&self) -> WorkloadLevel {
        self.level
    }

    /// Returns the number of active tasks scored.
    #[must_use]
    pub const fn active_tasks(&self) -> usize {
        self.active_tasks
    }
}

/// Workload of a named employee, as shown on a manager's team view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmployeeWorkload {
    employee: UserId,
    full_name: FullName,
    report: WorkloadReport,
}

impl EmployeeWorkload {
    /// Creates an employee workload entry.
    #[must_use]
    pub const fn new(employee: UserId, full_name: FullName, report: WorkloadReport) -> Self {
        Self {
            employee,
            full_name,
            report,
        }
    }

    /// Returns the employee identifier.
    #[must_use]
    pub const fn employee(&self) -> UserId {
        self.employee
    }

    /// Returns the employee's display name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Returns the workload report.
    #[must_use]
    pub const fn report(&self) -> WorkloadReport {
        self.report
    }
}
