//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way to
//! represent the failure modes of the API: invalid input, duplicate usernames,
//! bad credentials, missing/forged tokens, unknown resources, and store
//! failures.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert
//! application errors into HTTP responses with small JSON bodies of the form
//! `{"error": "..."}`. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, and `bcrypt::BcryptError` allow conversion
//! with the `?` operator.
//!
//! Store and hashing failures are surfaced to clients as a generic server
//! error; the detail is written to the log and never to the response body.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// A malformed or invalid request body or parameter (HTTP 400).
    BadRequest(String),
    /// Failed input validation on a request payload (HTTP 400).
    Validation(String),
    /// Registration with a username that already exists (HTTP 400).
    DuplicateUsername,
    /// Login with an unknown username or a wrong password (HTTP 400).
    /// One variant for both cases so the response does not reveal which.
    InvalidCredentials,
    /// A missing, malformed, forged, or expired bearer token (HTTP 401).
    Unauthorized(String),
    /// A requested resource that does not exist (HTTP 404).
    NotFound(String),
    /// An error from the backing store (HTTP 500). The message is logged,
    /// never returned to the client.
    Database(String),
    /// Any other unexpected server-side failure (HTTP 500).
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Validation(msg) => write!(f, "Validation Error: {}", msg),
            AppError::DuplicateUsername => write!(f, "Username is already taken"),
            AppError::InvalidCredentials => write!(f, "Invalid username or password"),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Database(msg) => write!(f, "Database Error: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::Validation(msg) => HttpResponse::BadRequest().json(json!({
                "error": msg
            })),
            AppError::DuplicateUsername => HttpResponse::BadRequest().json(json!({
                "error": "Username is already taken"
            })),
            AppError::InvalidCredentials => HttpResponse::BadRequest().json(json!({
                "error": "Invalid username or password"
            })),
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "error": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "error": msg
            })),
            // Store and internal failures: log the detail, answer generically.
            AppError::Database(msg) => {
                log::error!("store error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Server error"
                }))
            }
            AppError::Internal(msg) => {
                log::error!("internal error: {}", msg);
                HttpResponse::InternalServerError().json(json!({
                    "error": "Server error"
                }))
            }
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; everything else
/// becomes `AppError::Database`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::Database(error.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::Validation(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::Internal`.
///
/// Hashing failures (bad cost parameter, RNG failure) are server-side
/// problems; a wrong password is not an error and never takes this path.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::Internal(format!("Failed to hash password: {}", error))
    }
}
