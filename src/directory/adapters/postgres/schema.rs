//! Diesel schema for user directory persistence.

diesel::table! {
    /// Directory users and their reporting lines.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        full_name -> Varchar,
        /// Unique lowercase email address.
        #[max_length = 320]
        email -> Varchar,
        /// Opaque credential digest.
        credential_digest -> Text,
        /// Organisational role.
        #[max_length = 16]
        role -> Varchar,
        /// Manager reference for employees.
        manager_id -> Nullable<Uuid>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
