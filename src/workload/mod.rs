//! Workload scoring.
//!
//! Scores how loaded an employee is from the priorities of their active
//! tasks, and exposes authorised per-employee and team views of that score.
//! Scores are recomputed from the task store on every request.
//!
//! - Domain types in [`domain`]
//! - Orchestration services in [`services`]

pub mod domain;
pub mod services;
