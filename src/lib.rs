//! Foreman: task assignment and workload scoring engine.
//!
//! Managers assign tasks to the employees reporting to them, employees work
//! through their own tasks, and the engine scores how loaded each employee
//! is. Deadlines that pass turn active tasks overdue the next time the
//! assignee lists them.
//!
//! # Architecture
//!
//! Foreman follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`identity`]: Authenticated caller handed over by the identity layer
//! - [`directory`]: Users, roles and manager/employee reporting lines
//! - [`task`]: Task assignment, capacity admission and status lifecycle
//! - [`workload`]: Priority-weighted workload scoring
//! - [`config`]: Policy configuration for the services

pub mod config;
pub mod directory;
pub mod identity;
pub mod task;
pub mod workload;
