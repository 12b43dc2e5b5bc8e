pub mod auth;
pub mod health;
pub mod tasks;

use actix_web::web;
use std::sync::Arc;

use crate::auth::{AuthMiddleware, TokenService};

/// Mounts the API routes: the public `/auth` scope and the `/tasks` scope
/// behind the authorization gate. The gate needs the shared verifier, so the
/// caller passes it in.
pub fn config(cfg: &mut web::ServiceConfig, tokens: Arc<TokenService>) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware::new(tokens))
            .service(tasks::get_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    );
}
