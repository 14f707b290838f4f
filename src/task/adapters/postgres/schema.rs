//! Diesel schema for task persistence.

diesel::table! {
    /// Assigned tasks.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional description.
        description -> Nullable<Text>,
        /// Priority storage string.
        #[max_length = 16]
        priority -> Varchar,
        /// Status storage string.
        #[max_length = 32]
        status -> Varchar,
        /// Completion deadline.
        deadline -> Timestamptz,
        /// Assigned employee.
        assigned_to -> Uuid,
        /// Assigning manager.
        assigned_by -> Uuid,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
