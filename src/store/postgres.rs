use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::models::{Task, TaskUpdate, User};
use crate::store::{TaskStore, UserStore};

/// Credential store over Postgres.
///
/// Uniqueness is enforced by the UNIQUE index on `users.username`, not by an
/// application-level check: a racing duplicate insert loses at the database
/// and surfaces as `DuplicateUsername`.
#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, username: &str, password: &str) -> Result<User, AppError> {
        let user = User::new(username, &hash_password(password)?);

        let result = sqlx::query(
            "INSERT INTO users (id, username, password_hash, created_at)
             VALUES ($1, $2, $3, $4)",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(user.created_at)
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(user),
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(AppError::DuplicateUsername)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, password_hash, created_at
             FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

/// Task store over Postgres.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn list(&self) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, created_at, updated_at
             FROM tasks ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, status, created_at, updated_at
             FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn insert(&self, task: Task) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, description, status, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING id, title, description, status, created_at, updated_at",
        )
        .bind(task.id)
        .bind(task.title)
        .bind(task.description)
        .bind(task.status)
        .bind(task.created_at)
        .bind(task.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    async fn update(&self, id: Uuid, changes: TaskUpdate) -> Result<Option<Task>, AppError> {
        // COALESCE keeps the stored value for every field the caller left out.
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks
             SET title = COALESCE($2, title),
                 description = COALESCE($3, description),
                 status = COALESCE($4, status),
                 updated_at = NOW()
             WHERE id = $1
             RETURNING id, title, description, status, created_at, updated_at",
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
