//!
//! # Document store
//!
//! The persistence engine is an external collaborator behind two traits:
//! [`UserStore`] for credentials and [`TaskStore`] for task records. The
//! production implementations in [`postgres`] ride on sqlx; the in-memory
//! implementations in [`memory`] back the integration tests. Both uphold the
//! same contract, most importantly that the username uniqueness check and
//! the insert are one atomic operation at the storage layer.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, TaskUpdate, User};

/// Credential storage.
///
/// `create` hashes the password before the record is written, so a stored
/// record can never contain plaintext, and a failed hash writes nothing.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Creates a user from a username and a plaintext password.
    ///
    /// Fails with [`AppError::DuplicateUsername`] when the username exists.
    /// Two concurrent creates with the same name resolve at the storage
    /// layer: exactly one wins.
    async fn create(&self, username: &str, password: &str) -> Result<User, AppError>;

    /// Looks up a user by username, returning the record including the
    /// password hash. For the login path only; the record is never handed
    /// to external callers.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
}

/// Task record storage.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// All tasks, newest first.
    async fn list(&self) -> Result<Vec<Task>, AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    async fn insert(&self, task: Task) -> Result<Task, AppError>;

    /// Applies a partial field set; absent fields keep their stored value.
    /// Returns `None` when no task with the id exists.
    async fn update(&self, id: Uuid, changes: TaskUpdate) -> Result<Option<Task>, AppError>;

    /// Returns `false` when no task with the id exists.
    async fn delete(&self, id: Uuid) -> Result<bool, AppError>;
}
