//! Application services for workload scoring.

mod scoring;

pub use scoring::{WorkloadScoringService, WorkloadServiceError, WorkloadServiceResult};
