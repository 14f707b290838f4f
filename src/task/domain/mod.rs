//! Domain model for task assignment and lifecycle.
//!
//! Tasks are assigned by a manager to one of their employees and carry a
//! small status machine with a deadline-driven overdue state. Infrastructure
//! concerns stay outside the domain boundary.

mod error;
mod ids;
mod policy;
mod priority;
mod status;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError, TaskDomainError};
pub use ids::{MAX_TITLE_LENGTH, TaskId, TaskTitle};
pub use policy::{
    AssignmentPolicy, CapacityEnforcement, DEFAULT_ACTIVE_TASK_CAP, StatusUpdatePolicy,
};
pub use priority::TaskPriority;
pub use status::TaskStatus;
pub use task::{NewTask, PersistedTaskData, Task};
