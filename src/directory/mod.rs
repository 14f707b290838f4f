//! Organisational user directory.
//!
//! Resolves user records and manager/employee reporting lines for the task
//! services, and enforces the provisioning rules for new users. The module
//! follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
