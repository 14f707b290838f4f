//! `PostgreSQL` implementation of the user directory.

use super::{
    models::{NewUserRow, UserRow},
    schema::users,
};
use crate::directory::{
    domain::{
        CredentialDigest, EmailAddress, FullName, PersistedUserData, Role, User, UserId,
    },
    ports::{UserDirectory, UserDirectoryError, UserDirectoryResult},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by directory adapters.
pub type DirectoryPgPool = Pool<ConnectionManager<PgConnection>>;

/// Name of the unique constraint guarding email addresses.
const EMAIL_UNIQUE_CONSTRAINT: &str = "users_email_key";

/// `PostgreSQL`-backed user directory.
#[derive(Debug, Clone)]
pub struct PostgresUserDirectory {
    pool: DirectoryPgPool,
}

impl PostgresUserDirectory {
    /// Creates a new directory from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: DirectoryPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> UserDirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> UserDirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(UserDirectoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(UserDirectoryError::persistence)?
    }
}

#[async_trait]
impl UserDirectory for PostgresUserDirectory {
    async fn store(&self, user: &User) -> UserDirectoryResult<()> {
        let user_id = user.id();
        let email = user.email().clone();
        let new_row = to_new_row(user);

        self.run_blocking(move |connection| {
            diesel::insert_into(users::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
                        if is_email_unique_violation(info.as_ref()) =>
                    {
                        UserDirectoryError::DuplicateEmail(email.clone())
                    }
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        UserDirectoryError::DuplicateUser(user_id)
                    }
                    _ => UserDirectoryError::persistence(err),
                })?;
            Ok(())
        })
        .await
    }

    async fn find_by_id(&self, id: UserId) -> UserDirectoryResult<Option<User>> {
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::id.eq(id.into_inner()))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn find_by_email(&self, email: &EmailAddress) -> UserDirectoryResult<Option<User>> {
        let lookup = email.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::email.eq(lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()
                .map_err(UserDirectoryError::persistence)?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn list_all(&self) -> UserDirectoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }

    async fn list_by_manager(&self, manager_id: UserId) -> UserDirectoryResult<Vec<User>> {
        self.run_blocking(move |connection| {
            let rows = users::table
                .filter(users::manager_id.eq(manager_id.into_inner()))
                .filter(users::role.eq(Role::Employee.as_str()))
                .order((users::created_at.asc(), users::id.asc()))
                .select(UserRow::as_select())
                .load::<UserRow>(connection)
                .map_err(UserDirectoryError::persistence)?;
            rows.into_iter().map(row_to_user).collect()
        })
        .await
    }
}

fn to_new_row(user: &User) -> NewUserRow {
    NewUserRow {
        id: user.id().into_inner(),
        full_name: user.full_name().as_str().to_owned(),
        email: user.email().as_str().to_owned(),
        credential_digest: user.credential().expose().to_owned(),
        role: user.role().as_str().to_owned(),
        manager_id: user.manager_id().map(UserId::into_inner),
        created_at: user.created_at(),
        updated_at: user.updated_at(),
    }
}

fn row_to_user(row: UserRow) -> UserDirectoryResult<User> {
    let UserRow {
        id,
        full_name,
        email,
        credential_digest,
        role,
        manager_id,
        created_at,
        updated_at,
    } = row;

    let data = PersistedUserData {
        id: UserId::from_uuid(id),
        full_name: FullName::new(full_name).map_err(UserDirectoryError::persistence)?,
        email: EmailAddress::new(email).map_err(UserDirectoryError::persistence)?,
        credential: CredentialDigest::new(credential_digest)
            .map_err(UserDirectoryError::persistence)?,
        role: Role::try_from(role.as_str()).map_err(UserDirectoryError::persistence)?,
        manager_id: manager_id.map(UserId::from_uuid),
        created_at,
        updated_at,
    };
    Ok(User::from_persisted(data))
}

fn is_email_unique_violation(info: &dyn DatabaseErrorInformation) -> bool {
    info.constraint_name()
        .is_some_and(|name| name == EMAIL_UNIQUE_CONSTRAINT)
}
