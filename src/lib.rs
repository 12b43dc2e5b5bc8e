#![doc = "The `taskboard` library crate."]
#![doc = ""]
#![doc = "A small multi-user task-tracking API: users register and log in, then"]
#![doc = "work a shared task board through bearer-token-protected endpoints."]
#![doc = "This crate holds the domain models, authentication (hashing, tokens,"]
#![doc = "authorization gate), the document-store seam, routing configuration,"]
#![doc = "and error handling. The binary (`main.rs`) assembles and runs the app."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
