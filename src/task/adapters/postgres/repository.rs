//! `PostgreSQL` task store.

use super::{
    models::{NewTaskRow, TaskRow, TaskStatusChangeset},
    schema::tasks,
};
use crate::directory::domain::UserId;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskPriority, TaskStatus, TaskTitle},
    ports::{TaskStore, TaskStoreError, TaskStoreResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: TaskPgPool,
}

/// Outcome of a capacity-guarded insert transaction.
enum Admission {
    Inserted,
    AtCapacity(i64),
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn insert(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let new_row = to_new_row(task);

        self.run_blocking(move |connection| {
            diesel::insert_into(tasks::table)
                .values(&new_row)
                .execute(connection)
                .map_err(|err| map_insert_error(err, task_id))?;
            Ok(())
        })
        .await
    }

    async fn insert_within_capacity(&self, task: &Task, cap: u64) -> TaskStoreResult<()> {
        let task_id = task.id();
        let assignee = task.assigned_to();
        let new_row = to_new_row(task);
        let cap_limit = i64::try_from(cap).unwrap_or(i64::MAX);

        let admission = self
            .run_blocking(move |connection| {
                connection
                    .transaction::<Admission, DieselError, _>(|tx| {
                        // Serialises concurrent admissions for one assignee
                        // until this transaction ends.
                        diesel::sql_query(
                            "SELECT pg_advisory_xact_lock(hashtextextended($1::text, 0))",
                        )
                        .bind::<diesel::sql_types::Uuid, _>(assignee.into_inner())
                        .execute(tx)?;

                        let active = count_active(tx, assignee)?;
                        if active >= cap_limit {
                            return Ok(Admission::AtCapacity(active));
                        }

                        diesel::insert_into(tasks::table)
                            .values(&new_row)
                            .execute(tx)?;
                        Ok(Admission::Inserted)
                    })
                    .map_err(|err| map_insert_error(err, task_id))
            })
            .await?;

        match admission {
            Admission::Inserted => Ok(()),
            Admission::AtCapacity(active) => Err(TaskStoreError::CapacityExceeded {
                assignee,
                active: u64::try_from(active).map_err(TaskStoreError::persistence)?,
                cap,
            }),
        }
    }

    async fn update(&self, task: &Task) -> TaskStoreResult<()> {
        let task_id = task.id();
        let changeset = TaskStatusChangeset {
            status: task.status().as_str().to_owned(),
            updated_at: task.updated_at(),
        };

        self.run_blocking(move |connection| {
            let updated = diesel::update(tasks::table.filter(tasks::id.eq(task_id.into_inner())))
                .set(&changeset)
                .execute(connection)
                .map_err(TaskStoreError::persistence)?;
            if updated == 0 {
                return Err(TaskStoreError::NotFound(task_id));
            }
            Ok(())
        })
        .await
    }

    async fn mark_overdue(
        &self,
        id: TaskId,
        now: DateTime<Utc>,
    ) -> TaskStoreResult<Option<Task>> {
        let changeset = TaskStatusChangeset {
            status: TaskStatus::Overdue.as_str().to_owned(),
            updated_at: now,
        };

        self.run_blocking(move |connection| {
            let swept = diesel::update(
                tasks::table
                    .filter(tasks::id.eq(id.into_inner()))
                    .filter(tasks::status.ne_all(inactive_statuses()))
                    .filter(tasks::deadline.lt(now)),
            )
            .set(&changeset)
            .returning(TaskRow::as_returning())
            .get_result::<TaskRow>(connection)
            .optional()
            .map_err(TaskStoreError::persistence)?;

            let row = match swept {
                Some(row) => Some(row),
                None => find_row(connection, id)?,
            };
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| {
            find_row(connection, id)?.map(row_to_task).transpose()
        })
        .await
    }

    async fn find_all_by_assignee(&self, assignee: UserId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(assignee.into_inner()))
                .order((
                    tasks::deadline.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_active_by_assignee(&self, assignee: UserId) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::assigned_to.eq(assignee.into_inner()))
                .filter(tasks::status.ne_all(inactive_statuses()))
                .order((
                    tasks::deadline.asc(),
                    tasks::created_at.asc(),
                    tasks::id.asc(),
                ))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskStoreError::persistence)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn count_active_by_assignee(&self, assignee: UserId) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            let active = count_active(connection, assignee).map_err(TaskStoreError::persistence)?;
            u64::try_from(active).map_err(TaskStoreError::persistence)
        })
        .await
    }
}

fn inactive_statuses() -> Vec<&'static str> {
    TaskStatus::INACTIVE
        .into_iter()
        .map(TaskStatus::as_str)
        .collect()
}

fn find_row(connection: &mut PgConnection, id: TaskId) -> TaskStoreResult<Option<TaskRow>> {
    tasks::table
        .filter(tasks::id.eq(id.into_inner()))
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()
        .map_err(TaskStoreError::persistence)
}

fn count_active(connection: &mut PgConnection, assignee: UserId) -> QueryResult<i64> {
    tasks::table
        .filter(tasks::assigned_to.eq(assignee.into_inner()))
        .filter(tasks::status.ne_all(inactive_statuses()))
        .count()
        .get_result::<i64>(connection)
}

fn map_insert_error(err: DieselError, task_id: TaskId) -> TaskStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            TaskStoreError::DuplicateTask(task_id)
        }
        _ => TaskStoreError::persistence(err),
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        deadline: task.deadline(),
        assigned_to: task.assigned_to().into_inner(),
        assigned_by: task.assigned_by().into_inner(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        priority,
        status,
        deadline,
        assigned_to,
        assigned_by,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title: TaskTitle::new(title).map_err(TaskStoreError::persistence)?,
        description,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskStoreError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskStoreError::persistence)?,
        deadline,
        assigned_to: UserId::from_uuid(assigned_to),
        assigned_by: UserId::from_uuid(assigned_by),
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}
