//! Task assignment and lifecycle.
//!
//! Managers assign tasks to the employees reporting to them, subject to an
//! active-task cap. Employees list their own tasks, which sweeps overdue
//! deadlines, and move them through the status machine. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
