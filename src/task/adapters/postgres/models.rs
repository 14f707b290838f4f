//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority storage string.
    pub priority: String,
    /// Status storage string.
    pub status: String,
    /// Completion deadline.
    pub deadline: DateTime<Utc>,
    /// Assigned employee.
    pub assigned_to: uuid::Uuid,
    /// Assigning manager.
    pub assigned_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Priority storage string.
    pub priority: String,
    /// Status storage string.
    pub status: String,
    /// Completion deadline.
    pub deadline: DateTime<Utc>,
    /// Assigned employee.
    pub assigned_to: uuid::Uuid,
    /// Assigning manager.
    pub assigned_by: uuid::Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset applied when a task is updated.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskStatusChangeset {
    /// Status storage string.
    pub status: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
