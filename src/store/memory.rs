use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

use crate::auth::password::hash_password;
use crate::error::AppError;
use crate::models::{Task, TaskUpdate, User};
use crate::store::{TaskStore, UserStore};

/// In-memory credential store.
///
/// Check-and-insert happens under a single lock, which gives the same
/// atomicity the Postgres store gets from its unique index. Used by the
/// integration tests; also handy for running the API without a database.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, username: &str, password: &str) -> Result<User, AppError> {
        // Hash outside the lock; the cost factor makes this the slow part.
        let password_hash = hash_password(password)?;

        let mut users = self.users.lock().expect("user store lock poisoned");
        if users.contains_key(username) {
            return Err(AppError::DuplicateUsername);
        }
        let user = User::new(username, &password_hash);
        users.insert(username.to_string(), user.clone());
        Ok(user)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = self.users.lock().expect("user store lock poisoned");
        Ok(users.get(username).cloned())
    }
}

/// In-memory task store.
#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<HashMap<Uuid, Task>>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn list(&self) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.lock().expect("task store lock poisoned");
        let mut tasks: Vec<Task> = tasks.values().cloned().collect();
        // Newest first, matching the Postgres ordering.
        tasks.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(tasks)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.lock().expect("task store lock poisoned");
        Ok(tasks.get(&id).cloned())
    }

    async fn insert(&self, task: Task) -> Result<Task, AppError> {
        let mut tasks = self.tasks.lock().expect("task store lock poisoned");
        tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update(&self, id: Uuid, changes: TaskUpdate) -> Result<Option<Task>, AppError> {
        let mut tasks = self.tasks.lock().expect("task store lock poisoned");
        match tasks.get_mut(&id) {
            Some(task) => {
                if let Some(title) = changes.title {
                    task.title = title;
                }
                if let Some(description) = changes.description {
                    task.description = Some(description);
                }
                if let Some(status) = changes.status {
                    task.status = status;
                }
                task.updated_at = chrono::Utc::now();
                Ok(Some(task.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        let mut tasks = self.tasks.lock().expect("task store lock poisoned");
        Ok(tasks.remove(&id).is_some())
    }
}
