//! Application services for task assignment and lifecycle orchestration.

mod assignment;
mod error;
mod lifecycle;

pub use assignment::{CreateTaskRequest, TaskAssignmentService};
pub use error::{TaskServiceError, TaskServiceResult};
pub use lifecycle::{TaskLifecycleService, UpdateStatusRequest};
