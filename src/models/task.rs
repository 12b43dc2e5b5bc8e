use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Represents the status of a task.
/// Corresponds to the `task_status` SQL enum.
///
/// Both transitions are legal: a completed task may be reopened.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    /// Task is yet to be done. Initial status.
    Pending,
    /// Task is done.
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// The initial status of the task. Defaults to `pending` when omitted.
    pub status: Option<TaskStatus>,
}

/// Partial field set for updating a task. Fields left unset keep their
/// stored value. A status outside the enum is rejected at deserialization.
#[derive(Debug, Serialize, Deserialize, Validate, Clone)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    pub description: Option<String>,

    pub status: Option<TaskStatus>,
}

/// Represents a task entity as stored and as returned by the API.
///
/// Tasks carry no owner: the board is shared, and any authenticated user may
/// read or mutate any task.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    /// The title of the task.
    pub title: String,
    /// An optional description for the task.
    pub description: Option<String>,
    /// The current status of the task.
    pub status: TaskStatus,
    /// Timestamp of when the task was created.
    pub created_at: DateTime<Utc>,
    /// Timestamp of the last update to the task.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` instance from `TaskInput`.
    /// Sets `created_at` and `updated_at` to the current time, `id` to a new
    /// UUID, and the status to `pending` unless the input chose one.
    pub fn new(input: TaskInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            status: input.status.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }
}
