use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user as stored by the credential store.
///
/// `password_hash` holds the salted bcrypt string, never a plaintext
/// password. The struct deliberately does not implement `Serialize`: user
/// records are consumed only by the login path and must never appear in a
/// response body.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Creates a new `User` record with a fresh identifier from a username
    /// and an already-hashed password.
    pub fn new(username: &str, password_hash: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        }
    }
}
