//! Domain model for workload scoring.

mod level;
mod policy;
mod report;

pub use level::WorkloadLevel;
pub use policy::{
    DEFAULT_HIGH_THRESHOLD, DEFAULT_MEDIUM_THRESHOLD, PriorityWeights, WorkloadPolicy,
};
pub use report::{EmployeeWorkload, WorkloadReport};
